//! Fan controller firmware entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        OneshotAdc        OnDieSensor          │
//! │  (Fan+Counter+Ind.)     (AnalogSensor)    (DieTemperature)     │
//! │  LogEventSink (EventSink)   SystemDelay (DelayNs)              │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌──────────────────┐   ┌──────────────────────────────────┐   │
//! │  │ Pollers (tasks)  │──▶│ SharedState ──▶ FanService (FSM) │   │
//! │  └──────────────────┘   └──────────────────────────────────┘   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Boot order: logger, config, PWM + indicator, pollers, settle, pulse
//! counter, spin-down wait, self-test, then the control loop forever.

#![deny(unused_must_use)]

use std::sync::Arc;

use anyhow::Result;
use embedded_hal::delay::DelayNs;
use log::{error, info};

use fanctl::adapters::adc::OneshotAdc;
use fanctl::adapters::die_temp::OnDieSensor;
use fanctl::adapters::hardware::HardwareAdapter;
use fanctl::adapters::log_sink::LogEventSink;
use fanctl::adapters::time::SystemDelay;
use fanctl::app::service::FanService;
use fanctl::config::FanConfig;
use fanctl::drivers::fan_pwm::FanPwm;
use fanctl::drivers::hw_init;
use fanctl::drivers::indicator::Indicator;
use fanctl::drivers::pulse_counter::PulseCounter;
use fanctl::drivers::task_pin::{self, Core};
use fanctl::error::{Error, InitError};
use fanctl::selftest;
use fanctl::sensors::{AnalogPoller, DieTempPoller};
use fanctl::shared::SharedState;

/// Poller task priority and stack, matching the sensor tasks' needs.
const POLLER_PRIORITY: u8 = 2;
const POLLER_STACK_KB: usize = 6;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    // ── 2. Configuration ──────────────────────────────────────
    let config = FanConfig::default();
    config.validate().map_err(Error::from)?;
    info!("config: {}", serde_json::to_string(&config)?);

    // ── 3. Outputs ────────────────────────────────────────────
    hw_init::init_fan_pwm()?;
    hw_init::init_indicator()?;
    info!("FAN PWM and indicator initialized");

    // ── 4. Sensor pollers ─────────────────────────────────────
    let shared = Arc::new(SharedState::new());
    spawn_pollers(&config, &shared)?;

    let mut delay = SystemDelay::new();
    let mut sink = LogEventSink::new();
    delay.delay_ms(config.polling.startup_settle_ms);

    // ── 5. Pulse counter ──────────────────────────────────────
    let mut counter = PulseCounter::new()?;
    counter.enable()?;
    counter.clear()?;
    counter.start()?;
    let mut hw = HardwareAdapter::new(FanPwm::new(), counter, Indicator::new());

    // ── 6. Spin-down wait + self-test ─────────────────────────
    let windows = selftest::wait_for_spin_down(&mut hw, &mut delay, &config.self_test)?;
    info!("fan at rest after {windows} window(s)");
    let outcome = selftest::run(
        &mut hw,
        &mut delay,
        &config.self_test,
        &config.run,
        &mut sink,
    )?;
    info!("self-test outcome: {outcome:?}");

    // ── 7. Control loop ───────────────────────────────────────
    let mut service = FanService::new(config, Arc::clone(&shared));
    service.start(&mut hw, &mut sink)?;
    info!("System ready. Entering control loop.");

    loop {
        service.tick(&mut hw, &mut delay, &mut sink)?;
    }
}

/// Spawn both sensor pollers.  Each builds its own peripheral inside the
/// task; a peripheral error there is fatal and aborts the firmware.
fn spawn_pollers(config: &FanConfig, shared: &Arc<SharedState>) -> Result<()> {
    let cfg = config.clone();
    let state = Arc::clone(shared);
    task_pin::spawn_on_core(Core::App, POLLER_PRIORITY, POLLER_STACK_KB, "tempread\0", move || {
        let mut delay = SystemDelay::new();
        let result = OnDieSensor::new()
            .and_then(|sensor| DieTempPoller::init(sensor, state, &cfg, &mut delay))
            .and_then(|poller| poller.run(&mut delay));
        if let Err(e) = result {
            error!("temperature poller halted: {e}");
            std::process::abort();
        }
    })
    .map_err(spawn_failed)?;

    let cfg = config.clone();
    let state = Arc::clone(shared);
    task_pin::spawn_on_core(Core::App, POLLER_PRIORITY, POLLER_STACK_KB, "adcread\0", move || {
        let mut delay = SystemDelay::new();
        let mut sink = LogEventSink::new();
        let result = OneshotAdc::new()
            .and_then(|adc| AnalogPoller::init(adc, state, &cfg))
            .and_then(|poller| poller.run(&mut delay, &mut sink));
        if let Err(e) = result {
            error!("ADC poller halted: {e}");
            std::process::abort();
        }
    })
    .map_err(spawn_failed)?;

    Ok(())
}

fn spawn_failed(e: std::io::Error) -> Error {
    error!("poller task spawn failed: {e}");
    InitError::TaskSpawnFailed.into()
}
