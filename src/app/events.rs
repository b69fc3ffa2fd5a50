//! Outbound application events.
//!
//! The controller, pollers and self-test emit these through the
//! [`EventSink`](super::ports::EventSink) port.  The log adapter renders
//! them as the firmware's serial console lines.

use crate::control::DutyEstimate;
use crate::fsm::RunState;
use crate::shared::Readings;

/// Structured events emitted by the control core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The controller has started (carries initial state).
    Started(RunState),

    /// Duty estimates computed for this control cycle.
    DutyEstimated(DutyEstimate),

    /// Periodic report of the filtered sensor values.
    Readings(Readings),

    /// Fan commanded on from standstill.
    FanStarted { duty_percent: i32 },

    /// Fan kept running this cycle.
    FanRunning { duty_percent: i32, rpm: i32 },

    /// No rotation and low demand: fan switched off.
    FanStopped { duty_percent: i32 },

    /// The run-state machine transitioned.
    StateChanged { from: RunState, to: RunState },

    /// Self-test found the minimum start duty.
    SelfTestPassed { code: u8, start_percent: u8 },

    /// Self-test swept the full range without a tach signal.
    SelfTestFailed,
}
