//! Fan controller service, the hexagonal core.
//!
//! [`FanService`] owns the run-state FSM and its context.  Each
//! [`tick`](FanService::tick) is one control cycle: read the shared
//! filtered values, estimate duty, sample rotation while running, step the
//! FSM, apply its commands through the ports and publish the outcome.
//!
//! ```text
//!  SharedState ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │       FanService       │
//! PulseCounter ◀──▶│   DutyEstimate · FSM   │──▶ FanOutputPort
//!                  └────────────────────────┘
//! ```

use std::sync::Arc;

use embedded_hal::delay::DelayNs;
use log::info;

use crate::config::FanConfig;
use crate::control::DutyEstimate;
use crate::error::Result;
use crate::fsm::context::{CounterCommand, FanCommands, FsmContext, OutputCommand};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, RunState};
use crate::shared::SharedState;

use super::events::AppEvent;
use super::ports::{EventSink, FanOutputPort, PulseCounterPort};

/// The run-state controller.
pub struct FanService {
    fsm: Fsm,
    ctx: FsmContext,
    shared: Arc<SharedState>,
    cycles: u64,
}

impl FanService {
    /// Construct the controller.  Does **not** start the FSM; call
    /// [`start`](Self::start) once the self-test has finished.
    pub fn new(config: FanConfig, shared: Arc<SharedState>) -> Self {
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), RunState::Stopped);
        Self {
            fsm,
            ctx,
            shared,
            cycles: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter the initial `Stopped` state: output off, counter suspended.
    pub fn start(
        &mut self,
        hw: &mut (impl FanOutputPort + PulseCounterPort),
        sink: &mut impl EventSink,
    ) -> Result<()> {
        self.fsm.start(&mut self.ctx);
        self.apply_commands(hw)?;
        self.publish_state();
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("FanService started in {}", self.fsm.current_state());
        Ok(())
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one control cycle.
    ///
    /// While running, the cycle spends `sample_window_ms` counting pulses;
    /// a cycle that begins stopped ends with `stopped_idle_ms` of idle.
    pub fn tick(
        &mut self,
        hw: &mut (impl FanOutputPort + PulseCounterPort),
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        self.cycles += 1;
        let prev = self.fsm.current_state();

        // 1. Duty estimate from the latest filtered readings
        let duty = DutyEstimate::compute(&self.shared.readings(), &self.ctx.config);
        self.ctx.duty = duty;
        sink.emit(&AppEvent::DutyEstimated(duty));

        // 2. Rotation sample (running only)
        if prev == RunState::Running {
            hw.clear_count()?;
            delay.delay_ms(self.ctx.config.run.sample_window_ms);
            self.ctx.pulse_count = hw.pulse_count()?;
        }

        // 3. FSM step, then hardware
        self.fsm.tick(&mut self.ctx);
        self.apply_commands(hw)?;
        self.publish_state();

        // 4. Report
        let next = self.fsm.current_state();
        let duty_percent = duty.percent();
        match (prev, next) {
            (RunState::Stopped, RunState::Running) => {
                sink.emit(&AppEvent::FanStarted { duty_percent });
            }
            (RunState::Running, RunState::Running) => {
                sink.emit(&AppEvent::FanRunning {
                    duty_percent,
                    rpm: self.rpm(),
                });
            }
            (RunState::Running, RunState::Stopped) => {
                sink.emit(&AppEvent::FanStopped { duty_percent });
            }
            (RunState::Stopped, RunState::Stopped) => {}
        }
        if next != prev {
            sink.emit(&AppEvent::StateChanged {
                from: prev,
                to: next,
            });
        }

        // 5. Idle after a stopped-state cycle, whether or not the fan started
        if prev == RunState::Stopped {
            delay.delay_ms(self.ctx.config.run.stopped_idle_ms);
        }

        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> RunState {
        self.fsm.current_state()
    }

    /// Duty estimate from the most recent cycle.
    pub fn last_duty(&self) -> DutyEstimate {
        self.ctx.duty
    }

    /// Pulses counted in the most recent sample window.
    pub fn pulse_count(&self) -> i32 {
        self.ctx.pulse_count
    }

    /// Reported fan speed for the most recent sample window.
    pub fn rpm(&self) -> i32 {
        self.ctx.pulse_count * self.ctx.config.run.rpm_per_pulse
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn config(&self) -> &FanConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_commands(&mut self, hw: &mut (impl FanOutputPort + PulseCounterPort)) -> Result<()> {
        let FanCommands {
            output,
            counter,
            resync,
        } = self.ctx.take_commands();

        match output {
            Some(OutputCommand::Drive(code)) => hw.set_duty_code(code)?,
            Some(OutputCommand::Stop) => hw.stop_output()?,
            None => {}
        }
        match counter {
            Some(CounterCommand::Resume) => {
                hw.enable_counter()?;
                hw.start_counter()?;
            }
            Some(CounterCommand::Suspend) => hw.disable_counter()?,
            None => {}
        }
        if resync {
            self.shared.mark_out_of_sync();
        }
        Ok(())
    }

    fn publish_state(&self) {
        self.shared
            .set_running(self.fsm.current_state() == RunState::Running);
    }
}
