//! Port traits: the hexagonal boundary between the control core and the
//! peripherals.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ FanService / pollers / self-test
//! ```
//!
//! Driven adapters (PWM, pulse counter, indicator, ADC, on-die sensor,
//! event sinks) implement these traits.  The domain consumes them via
//! generics, so it never touches hardware directly.  Blocking waits go
//! through [`embedded_hal::delay::DelayNs`].
//!
//! Every hardware call is fallible; an error is fatal for the calling task.

use crate::error::Result;

// ───────────────────────────────────────────────────────────────
// Fan drive (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The fan PWM output.  Codes are inverted: 255 = off, 0 = full drive.
pub trait FanOutputPort {
    /// Drive the fan at the given inverted 8-bit duty code.
    fn set_duty_code(&mut self, code: u8) -> Result<()>;

    /// Stop the PWM output, leaving the line idle (fan off).
    fn stop_output(&mut self) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Tachometer pulse counter (hardware ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Rotation pulse counter fed by the fan's FG/tach line.
pub trait PulseCounterPort {
    fn enable_counter(&mut self) -> Result<()>;

    fn disable_counter(&mut self) -> Result<()>;

    fn start_counter(&mut self) -> Result<()>;

    /// Reset the count to zero.
    fn clear_count(&mut self) -> Result<()>;

    /// Signed pulse count since the last clear.
    fn pulse_count(&mut self) -> Result<i32>;
}

// ───────────────────────────────────────────────────────────────
// Indicator (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Single indicator LED used for self-test signalling.
pub trait IndicatorPort {
    fn set_indicator(&mut self, on: bool) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Sensor front-ends (hardware → pollers)
// ───────────────────────────────────────────────────────────────

/// Oneshot ADC unit sampling the current-sense and NTC channels.
///
/// Readings are calibrated millivolts, or raw counts when no calibration
/// scheme is available on this chip.
pub trait AnalogSensorPort {
    fn read_current_mv(&mut self) -> Result<i32>;

    fn read_ntc_mv(&mut self) -> Result<i32>;

    /// Delete the ADC unit.
    fn teardown(&mut self) -> Result<()>;

    /// Re-create the ADC unit and reconfigure both channels.
    fn reinit(&mut self) -> Result<()>;
}

/// On-die temperature sensor.
pub trait DieTemperaturePort {
    fn read_celsius(&mut self) -> Result<f32>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
