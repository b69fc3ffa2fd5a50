//! Current-sense and cell-temperature poller.
//!
//! Samples both ADC channels every cycle.  When the controller has flagged
//! the ADC as out of sync (the fan just stopped), the poller tears the unit
//! down, lets the front-end settle and brings it back up before the next
//! sample.

use std::sync::Arc;

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::{AnalogSensorPort, EventSink};
use crate::config::{FanConfig, PollingConfig};
use crate::control::filter::ExpFilter;
use crate::error::Result;
use crate::shared::{Readings, SharedState};

use super::ntc::ntc_to_celsius;

pub struct AnalogPoller<A> {
    adc: A,
    shared: Arc<SharedState>,
    current: ExpFilter,
    cell: ExpFilter,
    polling: PollingConfig,
}

impl<A: AnalogSensorPort> AnalogPoller<A> {
    /// Seed both filters from an unfiltered first read and publish them.
    pub fn init(mut adc: A, shared: Arc<SharedState>, config: &FanConfig) -> Result<Self> {
        let current_mv = adc.read_current_mv()?;
        let ntc_mv = adc.read_ntc_mv()?;
        info!("ADC first read: current {current_mv} mV, NTC {ntc_mv} mV");

        let current = current_mv as f32;
        let cell = ntc_to_celsius(ntc_mv);
        shared.set_current_ma(current);
        shared.set_cell_c(cell);

        Ok(Self {
            adc,
            shared,
            current: ExpFilter::new(config.filter.current_alpha, current),
            cell: ExpFilter::new(config.filter.cell_alpha, cell),
            polling: config.polling,
        })
    }

    /// Sample both channels, filter and publish.
    pub fn step(&mut self) -> Result<()> {
        let current_mv = self.adc.read_current_mv()?;
        let ntc_mv = self.adc.read_ntc_mv()?;
        let cell = self.cell.update(ntc_to_celsius(ntc_mv));
        let current = self.current.update(current_mv as f32);
        self.shared.set_cell_c(cell);
        self.shared.set_current_ma(current);
        Ok(())
    }

    /// Re-create the ADC unit if the controller asked for it.
    ///
    /// Afterwards the unit counts as in sync only while the fan runs, so a
    /// stopped fan keeps getting a fresh unit every cycle.
    pub fn resync_if_needed(&mut self, delay: &mut impl DelayNs) -> Result<bool> {
        if self.shared.in_sync() {
            return Ok(false);
        }
        debug!("ADC resync: tearing down unit");
        self.adc.teardown()?;
        delay.delay_ms(self.polling.analog_resync_settle_ms);
        self.adc.reinit()?;
        self.shared.set_in_sync(self.shared.is_running());
        Ok(true)
    }

    /// One poll cycle: sample, sleep, resync if flagged, report.
    pub fn cycle(&mut self, delay: &mut impl DelayNs, sink: &mut impl EventSink) -> Result<Readings> {
        self.step()?;
        delay.delay_ms(self.polling.analog_ms);
        self.resync_if_needed(delay)?;
        let readings = self.shared.readings();
        sink.emit(&AppEvent::Readings(readings));
        Ok(readings)
    }

    /// Poll forever.  Returns only on an ADC error.
    pub fn run(mut self, delay: &mut impl DelayNs, sink: &mut impl EventSink) -> Result<()> {
        loop {
            self.cycle(delay, sink)?;
        }
    }

    pub fn filtered_current(&self) -> f32 {
        self.current.value()
    }

    pub fn filtered_cell(&self) -> f32 {
        self.cell.value()
    }
}
