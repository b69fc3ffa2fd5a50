//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production).

use log::{error, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::DutyEstimated(d) => {
                info!(
                    "T->duty: {:.2}, I->duty: {:.2} => Merger: {:.2}",
                    d.thermal, d.current, d.merged
                );
            }
            AppEvent::Readings(r) => {
                info!(
                    "Room-T: {:.1}, Cell-T: {:.1}, Current: {:.0}mA",
                    r.room_c, r.cell_c, r.current_ma
                );
            }
            AppEvent::FanStarted { duty_percent } => {
                info!("Duty: {}%, Fan => START", duty_percent);
            }
            AppEvent::FanRunning { duty_percent, rpm } => {
                info!("Duty: {}%, RPM={}", duty_percent, rpm);
            }
            AppEvent::FanStopped { duty_percent } => {
                info!("Low RPM: {}%, Fan => OFF", duty_percent);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from, to);
            }
            AppEvent::SelfTestPassed { start_percent, .. } => {
                info!("Startup duty cycle detected at: {}%", start_percent);
            }
            AppEvent::SelfTestFailed => {
                error!("Fan self-test failed: no FG signal!");
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state);
            }
        }
    }
}
