//! Sensor subsystem: the NTC conversion and the two background pollers.
//!
//! Each poller owns its front-end port and filters, and publishes filtered
//! values into [`SharedState`](crate::shared::SharedState) for the
//! controller to read.

pub mod analog;
pub mod die_temp;
pub mod ntc;

pub use analog::AnalogPoller;
pub use die_temp::DieTempPoller;
