//! Blue indicator LED on a plain GPIO output.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::error::Result;
use crate::pins;

pub struct Indicator {
    on: bool,
}

impl Default for Indicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator {
    pub fn new() -> Self {
        Self { on: false }
    }

    pub fn set(&mut self, on: bool) -> Result<()> {
        hw_init::gpio_write(pins::INDICATOR_GPIO, on)?;
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
