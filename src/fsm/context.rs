//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the blackboard state handlers read from and write to:
//! the cycle's duty estimate and pulse count come in, fan commands go out.

use crate::config::FanConfig;
use crate::control::DutyEstimate;

// ---------------------------------------------------------------------------
// Commands (written by state handlers; consumed by the controller)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCommand {
    /// Drive the PWM at this inverted code.
    Drive(u8),
    /// Stop the PWM output (fan off).
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterCommand {
    /// Enable and start the pulse counter.
    Resume,
    /// Disable the pulse counter.
    Suspend,
}

/// Commands requested by the last handler call.  `None` means "leave as is".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanCommands {
    pub output: Option<OutputCommand>,
    pub counter: Option<CounterCommand>,
    /// Ask the analog poller to re-create its ADC unit.
    pub resync: bool,
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

pub struct FsmContext {
    // -- Timing --
    pub ticks_in_state: u64,
    pub total_ticks: u64,

    // -- Inputs --
    /// Duty estimate for the current cycle.  Updated before each tick.
    pub duty: DutyEstimate,
    /// Pulses counted during the last sample window (0 while stopped).
    pub pulse_count: i32,

    // -- Outputs --
    pub commands: FanCommands,

    pub config: FanConfig,
}

impl FsmContext {
    pub fn new(config: FanConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            duty: DutyEstimate::default(),
            pulse_count: 0,
            commands: FanCommands::default(),
            config,
        }
    }

    /// Hand the pending commands to the caller, leaving none behind.
    pub fn take_commands(&mut self) -> FanCommands {
        core::mem::take(&mut self.commands)
    }

    /// Rotation detected during the last sample window.
    pub fn is_rotating(&self) -> bool {
        self.pulse_count > self.config.run.rotation_pulses
    }

    /// Demand is above the start threshold.
    pub fn demand_high(&self) -> bool {
        self.duty.merged > self.config.run.start_duty
    }
}
