//! Sensor pollers: seeding, cadence, filtering and ADC resync.

use std::sync::Arc;

use fanctl::app::events::AppEvent;
use fanctl::config::FanConfig;
use fanctl::error::{Error, SensorError};
use fanctl::sensors::{AnalogPoller, DieTempPoller};
use fanctl::shared::SharedState;

use crate::mock_hw::{MockAnalog, MockDelay, MockDieTemp, RecordingSink};

// ── Room temperature ──────────────────────────────────────────

#[test]
fn die_init_waits_then_publishes_first_read_raw() {
    let shared = Arc::new(SharedState::new());
    let mut delay = MockDelay::new();

    let poller = DieTempPoller::init(
        MockDieTemp::new([27.5]),
        Arc::clone(&shared),
        &FanConfig::default(),
        &mut delay,
    )
    .unwrap();

    assert_eq!(delay.waits_ms, vec![100]);
    assert_eq!(shared.readings().room_c, 27.5, "first read keeps self-heating");
    assert_eq!(poller.filtered(), 27.5);
}

#[test]
fn die_interval_follows_run_state() {
    let shared = Arc::new(SharedState::new());
    let mut delay = MockDelay::new();
    let poller = DieTempPoller::init(
        MockDieTemp::new([25.0]),
        Arc::clone(&shared),
        &FanConfig::default(),
        &mut delay,
    )
    .unwrap();

    assert_eq!(poller.interval_ms(), 4000);
    shared.set_running(true);
    assert_eq!(poller.interval_ms(), 6000);
}

#[test]
fn die_cycle_removes_self_heat_and_filters() {
    let shared = Arc::new(SharedState::new());
    let mut delay = MockDelay::new();
    let mut poller = DieTempPoller::init(
        MockDieTemp::new([30.0, 40.75]),
        Arc::clone(&shared),
        &FanConfig::default(),
        &mut delay,
    )
    .unwrap();
    delay.clear();

    let room = poller.cycle(&mut delay).unwrap();

    // 30·(1 − 1/32) + (40.75 − 0.75)/32
    assert_eq!(room, 30.3125);
    assert_eq!(shared.readings().room_c, 30.3125);
    assert_eq!(delay.waits_ms, vec![4000]);
}

#[test]
fn die_init_failure_propagates() {
    let shared = Arc::new(SharedState::new());
    let mut delay = MockDelay::new();
    let result = DieTempPoller::init(
        MockDieTemp::new(Vec::<f32>::new()),
        shared,
        &FanConfig::default(),
        &mut delay,
    );
    assert_eq!(
        result.err(),
        Some(Error::Sensor(SensorError::DieTempReadFailed(-1)))
    );
}

// ── Current + cell temperature ────────────────────────────────

#[test]
fn analog_init_seeds_both_channels() {
    let shared = Arc::new(SharedState::new());
    let poller =
        AnalogPoller::init(MockAnalog::new([800], [0]), Arc::clone(&shared), &FanConfig::default())
            .unwrap();

    let r = shared.readings();
    assert_eq!(r.current_ma, 800.0);
    assert_eq!(r.cell_c, 116.0);
    assert_eq!(poller.filtered_current(), 800.0);
    assert_eq!(poller.filtered_cell(), 116.0);
}

#[test]
fn analog_step_filters_current() {
    let shared = Arc::new(SharedState::new());
    let mut poller =
        AnalogPoller::init(MockAnalog::new([0, 1000], [0]), Arc::clone(&shared), &FanConfig::default())
            .unwrap();

    poller.step().unwrap();

    assert!((shared.readings().current_ma - 93.75).abs() < 1e-3);
    assert_eq!(shared.readings().cell_c, 116.0);
}

#[test]
fn analog_cycle_resyncs_when_flagged() {
    let shared = Arc::new(SharedState::new());
    shared.set_running(true);
    let mut poller =
        AnalogPoller::init(MockAnalog::new([500], [1500]), Arc::clone(&shared), &FanConfig::default())
            .unwrap();
    let mut delay = MockDelay::new();
    let mut sink = RecordingSink::new();

    let readings = poller.cycle(&mut delay, &mut sink).unwrap();

    assert_eq!(delay.waits_ms, vec![2000, 6000]);
    assert!(shared.in_sync(), "running fan leaves the unit in sync");
    assert_eq!(sink.events, vec![AppEvent::Readings(readings)]);
    assert_eq!(readings.current_ma, 500.0);
}

#[test]
fn analog_resync_tears_down_and_reinits() {
    let shared = Arc::new(SharedState::new());
    let mut poller =
        AnalogPoller::init(MockAnalog::new([500], [1500]), Arc::clone(&shared), &FanConfig::default())
            .unwrap();
    let mut delay = MockDelay::new();

    assert!(poller.resync_if_needed(&mut delay).unwrap());
    assert_eq!(delay.waits_ms, vec![6000]);
    assert!(!shared.in_sync(), "stopped fan keeps requesting resync");

    // Unit is live again: the next sample succeeds.
    poller.step().unwrap();
}

#[test]
fn analog_in_sync_skips_resync() {
    let shared = Arc::new(SharedState::new());
    shared.set_in_sync(true);
    let mut poller =
        AnalogPoller::init(MockAnalog::new([500], [1500]), Arc::clone(&shared), &FanConfig::default())
            .unwrap();
    let mut delay = MockDelay::new();
    let mut sink = RecordingSink::new();

    poller.cycle(&mut delay, &mut sink).unwrap();

    assert_eq!(delay.waits_ms, vec![2000]);
    assert!(shared.in_sync());
}

#[test]
fn analog_read_failure_propagates() {
    let shared = Arc::new(SharedState::new());
    let mut adc = MockAnalog::new([500], [1500]);
    adc.fail_reads();
    let result = AnalogPoller::init(adc, shared, &FanConfig::default());
    assert_eq!(
        result.err(),
        Some(Error::Sensor(SensorError::AdcReadFailed(-1)))
    );
}
