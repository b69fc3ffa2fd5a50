//! Room temperature poller backed by the on-die sensor.
//!
//! The die runs warmer than the air around it; a fixed self-heating offset
//! is removed before each sample enters the filter.  The poll interval
//! follows the controller: slower while the fan is running.

use std::sync::Arc;

use embedded_hal::delay::DelayNs;
use log::info;

use crate::app::ports::DieTemperaturePort;
use crate::config::{FanConfig, PollingConfig};
use crate::control::filter::ExpFilter;
use crate::error::Result;
use crate::shared::SharedState;

pub struct DieTempPoller<S> {
    sensor: S,
    shared: Arc<SharedState>,
    filter: ExpFilter,
    self_heat_c: f32,
    polling: PollingConfig,
}

impl<S: DieTemperaturePort> DieTempPoller<S> {
    /// Wait for the sensor to settle, then seed the filter with one
    /// unfiltered reading and publish it.
    pub fn init(
        mut sensor: S,
        shared: Arc<SharedState>,
        config: &FanConfig,
        delay: &mut impl DelayNs,
    ) -> Result<Self> {
        delay.delay_ms(config.polling.die_first_read_ms);
        let first = sensor.read_celsius()?;
        info!("Temperature first read: {first:.1} °C");
        shared.set_room_c(first);

        Ok(Self {
            sensor,
            shared,
            filter: ExpFilter::new(config.filter.die_alpha, first),
            self_heat_c: config.filter.die_self_heat_c,
            polling: config.polling,
        })
    }

    /// Sleep before the next sample, chosen from the current run state.
    pub fn interval_ms(&self) -> u32 {
        if self.shared.is_running() {
            self.polling.die_running_ms
        } else {
            self.polling.die_stopped_ms
        }
    }

    /// Take one sample, filter it and publish the result.
    pub fn step(&mut self) -> Result<f32> {
        let raw = self.sensor.read_celsius()?;
        let room = self.filter.update(raw - self.self_heat_c);
        self.shared.set_room_c(room);
        Ok(room)
    }

    /// One poll cycle: sleep, then sample.
    pub fn cycle(&mut self, delay: &mut impl DelayNs) -> Result<f32> {
        delay.delay_ms(self.interval_ms());
        self.step()
    }

    /// Poll forever.  Returns only on a sensor error.
    pub fn run(mut self, delay: &mut impl DelayNs) -> Result<()> {
        loop {
            self.cycle(delay)?;
        }
    }

    pub fn filtered(&self) -> f32 {
        self.filter.value()
    }
}
