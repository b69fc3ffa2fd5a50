//! Application core: fan control logic, zero direct I/O.
//!
//! The run-state controller lives in [`service`]; all interaction with
//! peripherals happens through the **port traits** in [`ports`], keeping
//! this layer testable with mock adapters.

pub mod events;
pub mod ports;
pub mod service;
