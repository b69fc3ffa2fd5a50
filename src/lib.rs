//! Fan controller firmware library.
//!
//! Exposes the control core, ports and adapters for integration testing.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module; host builds run against in-memory simulations.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod selftest;
pub mod sensors;
pub mod shared;

pub mod adapters;
pub mod drivers;
