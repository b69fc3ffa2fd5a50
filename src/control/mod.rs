//! Duty-cycle estimation: smoothing, mapping and fusion.
//!
//! ```text
//!  current ──▶ current_to_duty ──┐
//!                                ├──▶ fuse ──▶ merged ∈ [0, 1]
//!  room, cell ──▶ thermal_to_duty┘
//! ```

pub mod duty;
pub mod filter;
pub mod fusion;

use crate::config::FanConfig;
use crate::shared::Readings;

/// The per-cycle duty estimates.  `thermal` and `current` are unclamped;
/// `merged` is the single authoritative value in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DutyEstimate {
    pub thermal: f32,
    pub current: f32,
    pub merged: f32,
}

impl DutyEstimate {
    /// Map and fuse one set of filtered readings.
    pub fn compute(readings: &Readings, config: &FanConfig) -> Self {
        let thermal = duty::thermal_to_duty(readings.room_c, readings.cell_c, &config.thermal_curve);
        let current = duty::current_to_duty(readings.current_ma, &config.current_curve);
        let merged = fusion::fuse(thermal, current, config.fusion.thermal_weight);
        Self {
            thermal,
            current,
            merged,
        }
    }

    /// Merged duty as a whole percentage (truncated).
    pub fn percent(&self) -> i32 {
        (self.merged * 100.0) as i32
    }

    /// Inverted 8-bit PWM code for the merged duty: 255 is off, 0 is full.
    pub fn pwm_code(&self) -> u8 {
        duty_to_code(self.merged)
    }
}

/// Invert a fractional duty onto the 8-bit code range (truncating).
pub fn duty_to_code(duty: f32) -> u8 {
    ((1.0 - duty) * 255.0) as u8
}
