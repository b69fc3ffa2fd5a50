//! Concrete state handler functions and table builder.
//!
//! ```text
//!  STOPPED ──[merged > start_duty]──▶ RUNNING
//!     ▲                                  │
//!     └──[no rotation, merged ≤ start]───┘
//! ```

use super::context::{CounterCommand, FsmContext, OutputCommand};
use super::{RunState, StateDescriptor};
use log::{debug, info};

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; RunState::COUNT] {
    [
        // Index 0: Stopped
        StateDescriptor {
            id: RunState::Stopped,
            name: "Stopped",
            on_enter: Some(stopped_enter),
            on_exit: None,
            on_update: stopped_update,
        },
        // Index 1: Running
        StateDescriptor {
            id: RunState::Running,
            name: "Running",
            on_enter: Some(running_enter),
            on_exit: None,
            on_update: running_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  STOPPED state
// ═══════════════════════════════════════════════════════════════════════════

fn stopped_enter(ctx: &mut FsmContext) {
    ctx.commands.output = Some(OutputCommand::Stop);
    ctx.commands.counter = Some(CounterCommand::Suspend);
    ctx.commands.resync = true;
    ctx.pulse_count = 0;
    debug!("STOPPED: output off, counter suspended, ADC resync requested");
}

fn stopped_update(ctx: &mut FsmContext) -> Option<RunState> {
    if ctx.demand_high() {
        return Some(RunState::Running);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  RUNNING state
// ═══════════════════════════════════════════════════════════════════════════

fn running_enter(ctx: &mut FsmContext) {
    let code = ctx.duty.pwm_code();
    ctx.commands.output = Some(OutputCommand::Drive(code));
    ctx.commands.counter = Some(CounterCommand::Resume);
    info!("RUNNING: drive code {code}");
}

fn running_update(ctx: &mut FsmContext) -> Option<RunState> {
    if ctx.is_rotating() || ctx.demand_high() {
        ctx.commands.output = Some(OutputCommand::Drive(ctx.duty.pwm_code()));
        return None;
    }
    Some(RunState::Stopped)
}
