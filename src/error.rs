//! Unified error types for the fan controller firmware.
//!
//! A single `Error` enum that every subsystem converts into.  Variants carry
//! the raw ESP-IDF return code where one exists.  Any of these reaching the
//! top of a task is fatal: the task halts and the device reboots.

use core::fmt;

use crate::config::ConfigError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read.
    Sensor(SensorError),
    /// An actuator or counter command failed.
    Actuator(ActuatorError),
    /// Peripheral creation or configuration failed.
    Init(InitError),
    /// Configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Oneshot ADC read failed.
    AdcReadFailed(i32),
    /// On-die temperature sensor read failed.
    DieTempReadFailed(i32),
    /// Pulse counter read failed.
    PulseCountFailed(i32),
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcReadFailed(rc) => write!(f, "ADC read failed (rc={rc})"),
            Self::DieTempReadFailed(rc) => write!(f, "temperature sensor read failed (rc={rc})"),
            Self::PulseCountFailed(rc) => write!(f, "pulse count read failed (rc={rc})"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// LEDC duty write/update failed.
    PwmWriteFailed(i32),
    /// LEDC stop failed.
    PwmStopFailed(i32),
    /// GPIO level write failed.
    GpioWriteFailed(i32),
    /// Pulse counter enable/disable/start/clear failed.
    CounterControlFailed(i32),
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed(rc) => write!(f, "PWM write failed (rc={rc})"),
            Self::PwmStopFailed(rc) => write!(f, "PWM stop failed (rc={rc})"),
            Self::GpioWriteFailed(rc) => write!(f, "GPIO write failed (rc={rc})"),
            Self::CounterControlFailed(rc) => write!(f, "pulse counter control failed (rc={rc})"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Peripheral initialisation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    AdcInitFailed(i32),
    AdcDeinitFailed(i32),
    DieTempInitFailed(i32),
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
    PcntInitFailed(i32),
    TaskSpawnFailed,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={rc})"),
            Self::AdcDeinitFailed(rc) => write!(f, "ADC1 teardown failed (rc={rc})"),
            Self::DieTempInitFailed(rc) => write!(f, "temperature sensor init failed (rc={rc})"),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={rc})"),
            Self::LedcInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={rc})"),
            Self::PcntInitFailed(rc) => write!(f, "PCNT unit/channel config failed (rc={rc})"),
            Self::TaskSpawnFailed => write!(f, "task spawn failed"),
        }
    }
}

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Map an ESP-IDF return code to `Ok(())` or the given error constructor.
pub fn esp_check<E: Into<Error>>(rc: i32, err: impl FnOnce(i32) -> E) -> Result<()> {
    if rc == 0 { Ok(()) } else { Err(err(rc).into()) }
}
