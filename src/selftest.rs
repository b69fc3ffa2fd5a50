//! Startup spin-down wait and self-test sweep.
//!
//! Both run once on the main task before the controller starts cycling.
//! They block through the injected [`DelayNs`], so tests drive them with a
//! recording delay and simulated ports.

use embedded_hal::delay::DelayNs;
use log::{error, info};

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, FanOutputPort, IndicatorPort, PulseCounterPort};
use crate::config::{RunConfig, SelfTestConfig};
use crate::error::Result;
use crate::pins::FAN_PWM_OFF_CODE;

/// Code-to-percent factor: 100/255, as used by the detection report.
const PERCENT_PER_CODE: f32 = 0.392151;

/// Result of the startup sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfTestOutcome {
    /// Rotation first seen at `code`, i.e. `start_percent` physical duty.
    StartDetected { code: u8, start_percent: u8 },
    /// No rotation through the whole sweep; indicator latched high.
    NoRotation,
}

/// Physical duty percentage for an inverted PWM code.
pub fn start_percent(code: u8) -> u8 {
    let pct = 100.0 - (PERCENT_PER_CODE * f32::from(code)).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Exclusive lower bound of the sweep: `trunc(255 − span·255)`.
pub fn sweep_floor(span: f32) -> u8 {
    let off = f32::from(FAN_PWM_OFF_CODE);
    (off - span.clamp(0.0, 1.0) * off) as u8
}

/// Block until the counter reads zero over a whole window, then settle.
///
/// Returns the number of windows it took.
pub fn wait_for_spin_down(
    counter: &mut impl PulseCounterPort,
    delay: &mut impl DelayNs,
    cfg: &SelfTestConfig,
) -> Result<u32> {
    info!("waiting for fan to stop rotating...");
    let mut windows = 0u32;
    loop {
        counter.clear_count()?;
        delay.delay_ms(cfg.spin_down_window_ms);
        windows += 1;
        if counter.pulse_count()? == 0 {
            break;
        }
    }
    delay.delay_ms(cfg.spin_down_settle_ms);
    Ok(windows)
}

/// Sweep the drive code down from off until the fan starts turning.
///
/// The pulse count is not cleared between steps: any rotation since the
/// spin-down wait accumulates toward the threshold.
pub fn run(
    hw: &mut (impl FanOutputPort + PulseCounterPort + IndicatorPort),
    delay: &mut impl DelayNs,
    st: &SelfTestConfig,
    run_cfg: &RunConfig,
    sink: &mut impl EventSink,
) -> Result<SelfTestOutcome> {
    info!("fan self-test in progress...");
    let floor = sweep_floor(st.sweep_span);

    let mut code = FAN_PWM_OFF_CODE;
    while code > floor {
        hw.set_duty_code(code)?;
        delay.delay_ms(st.step_settle_ms);
        hw.set_indicator(true)?;
        delay.delay_ms(st.blink_ms);
        hw.set_indicator(false)?;

        if hw.pulse_count()? > run_cfg.rotation_pulses {
            let start_percent = start_percent(code);
            sink.emit(&AppEvent::SelfTestPassed {
                code,
                start_percent,
            });
            delay.delay_ms(st.detected_hold_ms);
            return Ok(SelfTestOutcome::StartDetected {
                code,
                start_percent,
            });
        }
        code -= 1;
    }

    hw.set_indicator(true)?;
    error!("fan self-test swept to code {floor} without rotation");
    sink.emit(&AppEvent::SelfTestFailed);
    Ok(SelfTestOutcome::NoRotation)
}
