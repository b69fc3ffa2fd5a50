//! Hardware adapter: bridges the main-task peripherals to the port traits.
//!
//! Owns the fan PWM, the tach pulse counter and the indicator, exposing
//! them through [`FanOutputPort`], [`PulseCounterPort`] and
//! [`IndicatorPort`].  The controller and the self-test both take this one
//! value, which avoids double mutable borrows while keeping the port
//! boundary explicit.  On non-espidf targets the drivers use their
//! simulation stubs.

use log::debug;

use crate::app::ports::{FanOutputPort, IndicatorPort, PulseCounterPort};
use crate::drivers::fan_pwm::FanPwm;
use crate::drivers::indicator::Indicator;
use crate::drivers::pulse_counter::PulseCounter;
use crate::error::Result;

pub struct HardwareAdapter {
    fan: FanPwm,
    counter: PulseCounter,
    indicator: Indicator,
}

impl HardwareAdapter {
    pub fn new(fan: FanPwm, counter: PulseCounter, indicator: Indicator) -> Self {
        Self {
            fan,
            counter,
            indicator,
        }
    }

    pub fn fan(&self) -> &FanPwm {
        &self.fan
    }

    pub fn counter(&self) -> &PulseCounter {
        &self.counter
    }

    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }
}

// ── FanOutputPort ─────────────────────────────────────────────

impl FanOutputPort for HardwareAdapter {
    fn set_duty_code(&mut self, code: u8) -> Result<()> {
        self.fan.set_code(code)
    }

    fn stop_output(&mut self) -> Result<()> {
        self.fan.stop()
    }
}

// ── PulseCounterPort ──────────────────────────────────────────

impl PulseCounterPort for HardwareAdapter {
    fn enable_counter(&mut self) -> Result<()> {
        self.counter.enable()
    }

    fn disable_counter(&mut self) -> Result<()> {
        self.counter.disable()
    }

    fn start_counter(&mut self) -> Result<()> {
        self.counter.start()
    }

    fn clear_count(&mut self) -> Result<()> {
        self.counter.clear()
    }

    fn pulse_count(&mut self) -> Result<i32> {
        let n = self.counter.count()?;
        debug!("pulse count: {n}");
        Ok(n)
    }
}

// ── IndicatorPort ─────────────────────────────────────────────

impl IndicatorPort for HardwareAdapter {
    fn set_indicator(&mut self, on: bool) -> Result<()> {
        self.indicator.set(on)
    }
}
