//! 4-wire fan PWM driver (LEDC channel 0, 25 kHz).
//!
//! The PWM line passes through an inverting transistor stage, so the
//! numeric duty code is inverted: 255 holds the fan off, 0 is full drive.
//! Stopping the channel parks the line idle-high, which is also off.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the LEDC channel via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::error::Result;
use crate::pins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanOutput {
    /// Channel stopped, line idle-high.
    Stopped,
    /// Channel generating PWM at this inverted code.
    Driving { code: u8 },
}

pub struct FanPwm {
    state: FanOutput,
}

impl Default for FanPwm {
    fn default() -> Self {
        Self::new()
    }
}

impl FanPwm {
    /// Wrap an already-initialised channel (see [`hw_init::init_fan_pwm`]).
    pub fn new() -> Self {
        Self {
            state: FanOutput::Stopped,
        }
    }

    pub fn set_code(&mut self, code: u8) -> Result<()> {
        hw_init::ledc_set(pins::FAN_LEDC_CHANNEL, code)?;
        self.state = FanOutput::Driving { code };
        Ok(())
    }

    pub fn stop(&mut self) -> Result<()> {
        hw_init::ledc_stop(pins::FAN_LEDC_CHANNEL, true)?;
        self.state = FanOutput::Stopped;
        Ok(())
    }

    pub fn state(&self) -> FanOutput {
        self.state
    }

    pub fn is_driving(&self) -> bool {
        matches!(self.state, FanOutput::Driving { .. })
    }

    /// Effective code on the line: the off code while stopped.
    pub fn current_code(&self) -> u8 {
        match self.state {
            FanOutput::Stopped => pins::FAN_PWM_OFF_CODE,
            FanOutput::Driving { code } => code,
        }
    }
}
