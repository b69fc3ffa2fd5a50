//! Fan tachometer pulse counter (PCNT unit, one channel).
//!
//! The FG line is counted on the falling edge and held on the rising edge,
//! behind a 6 µs glitch filter.  Two poles means two pulses per revolution.
//!
//! Enable/disable are tracked so that repeated calls are no-ops; the
//! ESP-IDF driver rejects enabling an enabled unit.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: owns the PCNT unit and channel handles.
//! On host/test: counts pulses injected with [`sim_add_pulses`] into a
//! static atomic, mirroring an edge ISR.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicI32, Ordering};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
use log::info;

use crate::error::Result;
#[cfg(target_os = "espidf")]
use crate::error::{esp_check, ActuatorError, InitError, SensorError};
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(not(target_os = "espidf"))]
static SIM_PULSES: AtomicI32 = AtomicI32::new(0);

/// Inject tach edges in simulation.  Only counted while the unit runs.
#[cfg(not(target_os = "espidf"))]
pub fn sim_add_pulses(n: i32) {
    SIM_PULSES.fetch_add(n, Ordering::Relaxed);
}

pub struct PulseCounter {
    #[cfg(target_os = "espidf")]
    unit: pcnt_unit_handle_t,
    #[cfg(target_os = "espidf")]
    _channel: pcnt_channel_handle_t,
    enabled: bool,
    started: bool,
}

impl PulseCounter {
    /// Install the unit and channel.  The unit is left disabled.
    #[cfg(target_os = "espidf")]
    pub fn new() -> Result<Self> {
        let unit_cfg = pcnt_unit_config_t {
            low_limit: pins::PCNT_LOW_LIMIT,
            high_limit: pins::PCNT_HIGH_LIMIT,
            ..Default::default()
        };
        let mut unit: pcnt_unit_handle_t = core::ptr::null_mut();
        // SAFETY: out-pointer to a local; the handle is owned by `Self`.
        esp_check(unsafe { pcnt_new_unit(&unit_cfg, &mut unit) }, InitError::PcntInitFailed)?;

        let filter = pcnt_glitch_filter_config_t {
            max_glitch_ns: pins::PCNT_GLITCH_NS,
        };
        // SAFETY: `unit` was just created and is still in the init state.
        esp_check(
            unsafe { pcnt_unit_set_glitch_filter(unit, &filter) },
            InitError::PcntInitFailed,
        )?;

        let chan_cfg = pcnt_chan_config_t {
            edge_gpio_num: pins::FAN_TACH_GPIO,
            level_gpio_num: -1,
            ..Default::default()
        };
        let mut channel: pcnt_channel_handle_t = core::ptr::null_mut();
        // SAFETY: as above.
        esp_check(
            unsafe { pcnt_new_channel(unit, &chan_cfg, &mut channel) },
            InitError::PcntInitFailed,
        )?;
        // SAFETY: `channel` belongs to `unit`.
        esp_check(
            unsafe {
                pcnt_channel_set_edge_action(
                    channel,
                    pcnt_channel_edge_action_t_PCNT_CHANNEL_EDGE_ACTION_HOLD,
                    pcnt_channel_edge_action_t_PCNT_CHANNEL_EDGE_ACTION_INCREASE,
                )
            },
            InitError::PcntInitFailed,
        )?;

        info!("pulse counter installed on GPIO{}", pins::FAN_TACH_GPIO);
        Ok(Self {
            unit,
            _channel: channel,
            enabled: false,
            started: false,
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Result<Self> {
        info!("pulse counter (sim) installed");
        SIM_PULSES.store(0, Ordering::Relaxed);
        Ok(Self {
            enabled: false,
            started: false,
        })
    }

    pub fn enable(&mut self) -> Result<()> {
        if self.enabled {
            return Ok(());
        }
        self.hw_enable()?;
        self.enabled = true;
        Ok(())
    }

    /// Disabling also halts counting; `start` is needed after re-enabling.
    pub fn disable(&mut self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        self.hw_disable()?;
        self.enabled = false;
        self.started = false;
        Ok(())
    }

    pub fn start(&mut self) -> Result<()> {
        self.hw_start()?;
        self.started = true;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.hw_clear()
    }

    pub fn count(&mut self) -> Result<i32> {
        self.hw_count()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_counting(&self) -> bool {
        self.enabled && self.started
    }

    // ── ESP-IDF ───────────────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn hw_enable(&mut self) -> Result<()> {
        // SAFETY: `unit` is a live handle owned by `self`.
        esp_check(unsafe { pcnt_unit_enable(self.unit) }, ActuatorError::CounterControlFailed)
    }

    #[cfg(target_os = "espidf")]
    fn hw_disable(&mut self) -> Result<()> {
        // SAFETY: as above.
        esp_check(unsafe { pcnt_unit_disable(self.unit) }, ActuatorError::CounterControlFailed)
    }

    #[cfg(target_os = "espidf")]
    fn hw_start(&mut self) -> Result<()> {
        // SAFETY: as above.
        esp_check(unsafe { pcnt_unit_start(self.unit) }, ActuatorError::CounterControlFailed)
    }

    #[cfg(target_os = "espidf")]
    fn hw_clear(&mut self) -> Result<()> {
        // SAFETY: as above.
        esp_check(unsafe { pcnt_unit_clear_count(self.unit) }, ActuatorError::CounterControlFailed)
    }

    #[cfg(target_os = "espidf")]
    fn hw_count(&mut self) -> Result<i32> {
        let mut count: i32 = 0;
        // SAFETY: as above; out-pointer to a local.
        esp_check(
            unsafe { pcnt_unit_get_count(self.unit, &mut count) },
            SensorError::PulseCountFailed,
        )?;
        Ok(count)
    }

    // ── Simulation ────────────────────────────────────────────

    #[cfg(not(target_os = "espidf"))]
    fn hw_enable(&mut self) -> Result<()> {
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn hw_disable(&mut self) -> Result<()> {
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn hw_start(&mut self) -> Result<()> {
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn hw_clear(&mut self) -> Result<()> {
        SIM_PULSES.store(0, Ordering::Relaxed);
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn hw_count(&mut self) -> Result<i32> {
        let pending = SIM_PULSES.load(Ordering::Relaxed);
        Ok(if self.is_counting() { pending } else { 0 })
    }
}
