//! Fan controller configuration parameters
//!
//! Every threshold, gain and timing constant used by the control core lives
//! here with its documented default.  The firmware validates the active
//! config once at boot and logs it as JSON.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Core fan controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FanConfig {
    pub filter: FilterConfig,
    pub current_curve: CurrentCurve,
    pub thermal_curve: ThermalCurve,
    pub fusion: FusionConfig,
    pub run: RunConfig,
    pub self_test: SelfTestConfig,
    pub polling: PollingConfig,
}

/// Exponential smoothing factors (0 < α ≤ 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Motor current channel.
    pub current_alpha: f32,
    /// NTC cell temperature channel.
    pub cell_alpha: f32,
    /// On-die (room) temperature sensor.
    pub die_alpha: f32,
    /// Self-heating bias subtracted from every on-die sample (°C).
    pub die_self_heat_c: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            current_alpha: 0.093_75,
            cell_alpha: 0.0625,
            die_alpha: 0.031_25,
            die_self_heat_c: 0.75,
        }
    }
}

/// Three-segment current → duty curve.  Breakpoints are in calibrated
/// millivolts of the current-sense channel (1 mV ≙ 1 mA).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentCurve {
    pub offset0: f32,
    pub offset1: f32,
    pub offset2: f32,
    pub gain0: f32,
    pub gain1: f32,
    pub gain2: f32,
}

impl Default for CurrentCurve {
    fn default() -> Self {
        Self {
            offset0: 0.0,
            offset1: 400.0,
            offset2: 1500.0,
            gain0: 1.0e-3,
            gain1: 3.636_36e-4,
            gain2: 1.0e-4,
        }
    }
}

/// Room/cell temperature → duty curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalCurve {
    /// Width of the thermal-gradient band (°C of cell-above-room).
    pub gradient_span_c: f32,
    /// Temperature mapped to zero duty.
    pub zero_c: f32,
    /// Temperature mapped to full duty.
    pub full_c: f32,
    /// Cell colder than room by more than this is treated as a faulty sensor.
    pub sensor_fault_delta_c: f32,
}

impl Default for ThermalCurve {
    fn default() -> Self {
        Self {
            gradient_span_c: 10.0,
            zero_c: 25.0,
            full_c: 50.0,
            sensor_fault_delta_c: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionConfig {
    /// Weight of the thermal estimate; the blend is scaled by 1/W.
    pub thermal_weight: f32,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            thermal_weight: 0.681,
        }
    }
}

/// Run/stop hysteresis parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Fused duty above which the fan is started (and kept running).
    pub start_duty: f32,
    /// Reserved stop threshold.  The run-state controller never consults it:
    /// stopping is driven by missing rotation together with a duty at or
    /// below `start_duty`.
    pub stop_duty: f32,
    /// Pulses per sampling window above which the fan counts as rotating.
    pub rotation_pulses: i32,
    /// Pulse sampling window while running (ms).
    pub sample_window_ms: u32,
    /// Idle wait per cycle while stopped (ms).
    pub stopped_idle_ms: u32,
    /// RPM per pulse counted in one sampling window (2 poles, 2 s window).
    pub rpm_per_pulse: i32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            start_duty: 0.23,
            stop_duty: 0.17,
            rotation_pulses: 12,
            sample_window_ms: 2000,
            stopped_idle_ms: 4000,
            rpm_per_pulse: 15,
        }
    }
}

/// Startup self-test sweep and spin-down wait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelfTestConfig {
    /// Fraction of the 8-bit range swept downward from 255.
    pub sweep_span: f32,
    /// Hold time after each duty step (ms).
    pub step_settle_ms: u32,
    /// Indicator blink length per step (ms).
    pub blink_ms: u32,
    /// Hold time after the start duty was found (ms).
    pub detected_hold_ms: u32,
    /// Window in which the pulse count must stay at zero (ms).
    pub spin_down_window_ms: u32,
    /// Extra settle once the fan stands still (ms).
    pub spin_down_settle_ms: u32,
}

impl Default for SelfTestConfig {
    fn default() -> Self {
        Self {
            sweep_span: 0.35,
            step_settle_ms: 150,
            blink_ms: 50,
            detected_hold_ms: 1000,
            spin_down_window_ms: 1000,
            spin_down_settle_ms: 3000,
        }
    }
}

/// Sensor poller cadence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Delay before the first on-die temperature read (ms).
    pub die_first_read_ms: u32,
    /// On-die poll interval while the fan runs (ms).
    pub die_running_ms: u32,
    /// On-die poll interval while the fan is stopped (ms).
    pub die_stopped_ms: u32,
    /// Analog (current + NTC) poll interval (ms).
    pub analog_ms: u32,
    /// Settle time between ADC unit teardown and re-creation (ms).
    pub analog_resync_settle_ms: u32,
    /// Delay after spawning the pollers before the pulse counter comes up (ms).
    pub startup_settle_ms: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            die_first_read_ms: 100,
            die_running_ms: 6000,
            die_stopped_ms: 4000,
            analog_ms: 2000,
            analog_resync_settle_ms: 6000,
            startup_settle_ms: 2000,
        }
    }
}

/// Reasons a [`FanConfig`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

fn unit_interval(value: f32) -> bool {
    value > 0.0 && value <= 1.0
}

impl FanConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.filter;
        if !unit_interval(f.current_alpha) || !unit_interval(f.cell_alpha) || !unit_interval(f.die_alpha) {
            return Err(ConfigError::ValidationFailed("filter factors must be in (0, 1]"));
        }

        let c = &self.current_curve;
        if !(c.offset1 > 0.0 && c.offset2 > c.offset1) {
            return Err(ConfigError::ValidationFailed("current breakpoints must be increasing"));
        }

        let t = &self.thermal_curve;
        if t.gradient_span_c <= 0.0 || t.sensor_fault_delta_c <= 0.0 {
            return Err(ConfigError::ValidationFailed("thermal bands must be positive"));
        }
        if t.full_c <= t.zero_c {
            return Err(ConfigError::ValidationFailed("thermal full point must exceed zero point"));
        }

        if !unit_interval(self.fusion.thermal_weight) {
            return Err(ConfigError::ValidationFailed("thermal weight must be in (0, 1]"));
        }

        let r = &self.run;
        if !(0.0..1.0).contains(&r.start_duty) {
            return Err(ConfigError::ValidationFailed("start duty must be in [0, 1)"));
        }
        if r.stop_duty > r.start_duty {
            return Err(ConfigError::ValidationFailed("stop duty must not exceed start duty"));
        }
        if r.rotation_pulses < 0 || r.sample_window_ms == 0 {
            return Err(ConfigError::ValidationFailed("rotation detection window invalid"));
        }

        if !unit_interval(self.self_test.sweep_span) {
            return Err(ConfigError::ValidationFailed("self-test sweep span must be in (0, 1]"));
        }
        if self.self_test.spin_down_window_ms == 0 {
            return Err(ConfigError::ValidationFailed("spin-down window must be non-zero"));
        }

        let p = &self.polling;
        if p.die_running_ms == 0 || p.die_stopped_ms == 0 || p.analog_ms == 0 {
            return Err(ConfigError::ValidationFailed("poll intervals must be non-zero"));
        }

        Ok(())
    }
}
