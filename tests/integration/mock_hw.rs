//! Mock adapters for integration tests.
//!
//! Records every port call so tests can assert on the full command
//! history without touching real LEDC/PCNT/GPIO registers.  Delays are
//! recorded instead of slept.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use fanctl::app::events::AppEvent;
use fanctl::app::ports::{
    AnalogSensorPort, DieTemperaturePort, EventSink, FanOutputPort, IndicatorPort,
    PulseCounterPort,
};
use fanctl::error::{ActuatorError, Error, InitError, Result, SensorError};

// ── Hardware call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwCall {
    SetDuty(u8),
    StopOutput,
    EnableCounter,
    DisableCounter,
    StartCounter,
    ClearCount,
    ReadCount,
    Indicator(bool),
}

// ── MockHardware ──────────────────────────────────────────────

/// Pulse source: given the code currently on the line, how many pulses
/// does the next read report.
type PulseModel = Box<dyn FnMut(u8) -> i32>;

pub struct MockHardware {
    pub calls: Vec<HwCall>,
    /// Code on the PWM line; 255 while stopped.
    pub code: u8,
    pub indicator: bool,
    pub counter_enabled: bool,
    pulses: PulseModel,
    fail_reads: bool,
    fail_writes: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::with_pulses(|_| 0)
    }

    pub fn with_pulses(model: impl FnMut(u8) -> i32 + 'static) -> Self {
        Self {
            calls: Vec::new(),
            code: 255,
            indicator: false,
            counter_enabled: false,
            pulses: Box::new(model),
            fail_reads: false,
            fail_writes: false,
        }
    }

    /// Reads return the scripted values in order, then zero.
    pub fn with_script(counts: impl IntoIterator<Item = i32>) -> Self {
        let mut script: VecDeque<i32> = counts.into_iter().collect();
        Self::with_pulses(move |_| script.pop_front().unwrap_or(0))
    }

    pub fn set_pulses(&mut self, model: impl FnMut(u8) -> i32 + 'static) {
        self.pulses = Box::new(model);
    }

    pub fn fail_reads(&mut self) {
        self.fail_reads = true;
    }

    pub fn fail_writes(&mut self) {
        self.fail_writes = true;
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn count_of(&self, call: HwCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    pub fn duty_writes(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::SetDuty(code) => Some(*code),
                _ => None,
            })
            .collect()
    }

    pub fn driving(&self) -> bool {
        self.code != 255
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl FanOutputPort for MockHardware {
    fn set_duty_code(&mut self, code: u8) -> Result<()> {
        if self.fail_writes {
            return Err(ActuatorError::PwmWriteFailed(-1).into());
        }
        self.calls.push(HwCall::SetDuty(code));
        self.code = code;
        Ok(())
    }

    fn stop_output(&mut self) -> Result<()> {
        self.calls.push(HwCall::StopOutput);
        self.code = 255;
        Ok(())
    }
}

impl PulseCounterPort for MockHardware {
    fn enable_counter(&mut self) -> Result<()> {
        self.calls.push(HwCall::EnableCounter);
        self.counter_enabled = true;
        Ok(())
    }

    fn disable_counter(&mut self) -> Result<()> {
        self.calls.push(HwCall::DisableCounter);
        self.counter_enabled = false;
        Ok(())
    }

    fn start_counter(&mut self) -> Result<()> {
        self.calls.push(HwCall::StartCounter);
        Ok(())
    }

    fn clear_count(&mut self) -> Result<()> {
        self.calls.push(HwCall::ClearCount);
        Ok(())
    }

    fn pulse_count(&mut self) -> Result<i32> {
        if self.fail_reads {
            return Err(SensorError::PulseCountFailed(-1).into());
        }
        self.calls.push(HwCall::ReadCount);
        Ok((self.pulses)(self.code))
    }
}

impl IndicatorPort for MockHardware {
    fn set_indicator(&mut self, on: bool) -> Result<()> {
        self.calls.push(HwCall::Indicator(on));
        self.indicator = on;
        Ok(())
    }
}

// ── MockDelay ─────────────────────────────────────────────────

/// Records each requested wait in milliseconds.
#[derive(Debug, Default)]
pub struct MockDelay {
    pub waits_ms: Vec<u32>,
}

#[allow(dead_code)]
impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> u64 {
        self.waits_ms.iter().map(|&ms| u64::from(ms)).sum()
    }

    pub fn clear(&mut self) {
        self.waits_ms.clear();
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── MockAnalog ────────────────────────────────────────────────

/// Scripted ADC: each read pops the next value, repeating the last one.
pub struct MockAnalog {
    current: VecDeque<i32>,
    ntc: VecDeque<i32>,
    pub teardowns: u32,
    pub reinits: u32,
    pub live: bool,
    fail_reads: bool,
}

#[allow(dead_code)]
impl MockAnalog {
    pub fn new(current: impl IntoIterator<Item = i32>, ntc: impl IntoIterator<Item = i32>) -> Self {
        Self {
            current: current.into_iter().collect(),
            ntc: ntc.into_iter().collect(),
            teardowns: 0,
            reinits: 0,
            live: true,
            fail_reads: false,
        }
    }

    pub fn fail_reads(&mut self) {
        self.fail_reads = true;
    }

    fn next(queue: &mut VecDeque<i32>) -> i32 {
        if queue.len() > 1 {
            queue.pop_front().unwrap_or(0)
        } else {
            queue.front().copied().unwrap_or(0)
        }
    }

    fn check(&self) -> Result<()> {
        if self.fail_reads {
            return Err(SensorError::AdcReadFailed(-1).into());
        }
        if !self.live {
            return Err(Error::Init(InitError::AdcInitFailed(-1)));
        }
        Ok(())
    }
}

impl AnalogSensorPort for MockAnalog {
    fn read_current_mv(&mut self) -> Result<i32> {
        self.check()?;
        Ok(Self::next(&mut self.current))
    }

    fn read_ntc_mv(&mut self) -> Result<i32> {
        self.check()?;
        Ok(Self::next(&mut self.ntc))
    }

    fn teardown(&mut self) -> Result<()> {
        self.teardowns += 1;
        self.live = false;
        Ok(())
    }

    fn reinit(&mut self) -> Result<()> {
        self.reinits += 1;
        self.live = true;
        Ok(())
    }
}

// ── MockDieTemp ───────────────────────────────────────────────

/// Scripted on-die sensor, repeating the last value.
pub struct MockDieTemp {
    readings: VecDeque<f32>,
    pub reads: u32,
}

impl MockDieTemp {
    pub fn new(readings: impl IntoIterator<Item = f32>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
            reads: 0,
        }
    }
}

impl DieTemperaturePort for MockDieTemp {
    fn read_celsius(&mut self) -> Result<f32> {
        self.reads += 1;
        let v = if self.readings.len() > 1 {
            self.readings.pop_front()
        } else {
            self.readings.front().copied()
        };
        v.ok_or(Error::Sensor(SensorError::DieTempReadFailed(-1)))
    }
}
