//! Lock-free state shared between the sensor pollers and the controller.
//!
//! ```text
//!  die-temp poller ──▶ room_c ─────┐
//!  analog poller   ──▶ current_ma ─┼──▶ SharedState ──▶ controller
//!                  ──▶ cell_c ─────┘        │
//!  controller ──▶ running, in_sync ─────────┴──▶ pollers (cadence, resync)
//! ```
//!
//! Each field has exactly one writer.  Values are slow-moving physical
//! quantities, so readers may see a value one poll cycle stale; `Relaxed`
//! ordering is sufficient.  Floats are stored as their bit pattern in an
//! `AtomicU32`, so a read never observes a torn value.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// An `f32` stored atomically as its IEEE-754 bits.
#[derive(Debug)]
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    const fn zero() -> Self {
        Self(AtomicU32::new(0))
    }

    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Snapshot of the three filtered sensor values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Readings {
    /// Filtered current-sense reading (mV ≙ mA).
    pub current_ma: f32,
    /// Filtered room (on-die) temperature, self-heating removed (°C).
    pub room_c: f32,
    /// Filtered cell (NTC) temperature (°C).
    pub cell_c: f32,
}

/// Filtered readings plus the controller's run/sync flags.
#[derive(Debug)]
pub struct SharedState {
    current_ma: AtomicF32,
    room_c: AtomicF32,
    cell_c: AtomicF32,
    /// Mirrors `RunState::Running`.
    running: AtomicBool,
    /// Cleared by the controller when the fan stops; the analog poller then
    /// re-creates the ADC unit and sets it back to `running`.
    in_sync: AtomicBool,
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedState {
    /// All readings zero, fan stopped, ADC resync pending.
    pub const fn new() -> Self {
        Self {
            current_ma: AtomicF32::zero(),
            room_c: AtomicF32::zero(),
            cell_c: AtomicF32::zero(),
            running: AtomicBool::new(false),
            in_sync: AtomicBool::new(false),
        }
    }

    pub fn readings(&self) -> Readings {
        Readings {
            current_ma: self.current_ma.load(),
            room_c: self.room_c.load(),
            cell_c: self.cell_c.load(),
        }
    }

    pub fn set_current_ma(&self, value: f32) {
        self.current_ma.store(value);
    }

    pub fn set_room_c(&self, value: f32) {
        self.room_c.store(value);
    }

    pub fn set_cell_c(&self, value: f32) {
        self.cell_c.store(value);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Relaxed);
    }

    pub fn in_sync(&self) -> bool {
        self.in_sync.load(Ordering::Relaxed)
    }

    pub fn set_in_sync(&self, in_sync: bool) {
        self.in_sync.store(in_sync, Ordering::Relaxed);
    }

    /// Request an ADC unit re-creation on the next analog poll.
    pub fn mark_out_of_sync(&self) {
        self.set_in_sync(false);
    }
}
