//! Spin-down wait and self-test sweep against the recording mocks.

use fanctl::app::events::AppEvent;
use fanctl::config::FanConfig;
use fanctl::selftest::{self, SelfTestOutcome};

use crate::mock_hw::{HwCall, MockDelay, MockHardware, RecordingSink};

// ── Spin-down wait ────────────────────────────────────────────

#[test]
fn spin_down_waits_until_a_quiet_window() {
    let cfg = FanConfig::default();
    let mut hw = MockHardware::with_script([5, 3, 0]);
    let mut delay = MockDelay::new();

    let windows = selftest::wait_for_spin_down(&mut hw, &mut delay, &cfg.self_test).unwrap();

    assert_eq!(windows, 3);
    assert_eq!(delay.waits_ms, vec![1000, 1000, 1000, 3000]);
    assert_eq!(hw.count_of(HwCall::ClearCount), 3);
    assert_eq!(hw.count_of(HwCall::ReadCount), 3);
}

#[test]
fn spin_down_on_still_fan_takes_one_window() {
    let cfg = FanConfig::default();
    let mut hw = MockHardware::new();
    let mut delay = MockDelay::new();

    let windows = selftest::wait_for_spin_down(&mut hw, &mut delay, &cfg.self_test).unwrap();

    assert_eq!(windows, 1);
    assert_eq!(delay.total_ms(), 4000);
    assert_eq!(hw.calls, vec![HwCall::ClearCount, HwCall::ReadCount]);
}

// ── Sweep ─────────────────────────────────────────────────────

#[test]
fn sweep_detects_start_duty() {
    let cfg = FanConfig::default();
    let mut hw = MockHardware::with_pulses(|code| if code <= 200 { 20 } else { 0 });
    let mut delay = MockDelay::new();
    let mut sink = RecordingSink::new();

    let outcome = selftest::run(&mut hw, &mut delay, &cfg.self_test, &cfg.run, &mut sink).unwrap();

    assert_eq!(
        outcome,
        SelfTestOutcome::StartDetected {
            code: 200,
            start_percent: 22
        }
    );
    let writes = hw.duty_writes();
    assert_eq!(writes.len(), 56);
    assert_eq!(writes.first(), Some(&255));
    assert_eq!(writes.last(), Some(&200));
    assert_eq!(delay.total_ms(), 56 * (150 + 50) + 1000);
    assert!(!hw.indicator, "indicator ends each blink low");
    assert_eq!(hw.count_of(HwCall::Indicator(true)), 56);
    assert_eq!(
        sink.events,
        vec![AppEvent::SelfTestPassed {
            code: 200,
            start_percent: 22
        }]
    );
}

#[test]
fn sweep_step_order_is_set_settle_blink_read() {
    let cfg = FanConfig::default();
    let mut hw = MockHardware::with_pulses(|_| 13);
    let mut delay = MockDelay::new();
    let mut sink = RecordingSink::new();

    let outcome = selftest::run(&mut hw, &mut delay, &cfg.self_test, &cfg.run, &mut sink).unwrap();

    assert_eq!(
        outcome,
        SelfTestOutcome::StartDetected {
            code: 255,
            start_percent: 0
        }
    );
    assert_eq!(
        hw.calls,
        vec![
            HwCall::SetDuty(255),
            HwCall::Indicator(true),
            HwCall::Indicator(false),
            HwCall::ReadCount
        ]
    );
    assert_eq!(delay.waits_ms, vec![150, 50, 1000]);
}

#[test]
fn sweep_without_rotation_latches_indicator() {
    let cfg = FanConfig::default();
    let mut hw = MockHardware::with_pulses(|_| 12);
    let mut delay = MockDelay::new();
    let mut sink = RecordingSink::new();

    let outcome = selftest::run(&mut hw, &mut delay, &cfg.self_test, &cfg.run, &mut sink).unwrap();

    assert_eq!(outcome, SelfTestOutcome::NoRotation);
    let writes = hw.duty_writes();
    assert_eq!(writes.len(), 90);
    assert_eq!(writes.last(), Some(&166));
    assert!(hw.indicator);
    assert_eq!(hw.calls.last(), Some(&HwCall::Indicator(true)));
    assert_eq!(sink.events, vec![AppEvent::SelfTestFailed]);
}

#[test]
fn sweep_read_failure_aborts() {
    let cfg = FanConfig::default();
    let mut hw = MockHardware::new();
    hw.fail_reads();
    let mut delay = MockDelay::new();
    let mut sink = RecordingSink::new();

    assert!(selftest::run(&mut hw, &mut delay, &cfg.self_test, &cfg.run, &mut sink).is_err());
    assert_eq!(hw.duty_writes(), vec![255]);
    assert!(sink.events.is_empty());
}
