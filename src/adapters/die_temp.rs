//! On-die temperature sensor adapter.
//!
//! On ESP-IDF: installs and enables the internal sensor for the
//! −10 … 80 °C range.
//! On host/test: returns the value set with [`sim_set_die_celsius`].

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU32, Ordering};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
use log::info;

use crate::app::ports::DieTemperaturePort;
use crate::error::Result;
#[cfg(target_os = "espidf")]
use crate::error::{esp_check, InitError, SensorError};
use crate::pins;

/// 25.0 °C as `f32` bits.
#[cfg(not(target_os = "espidf"))]
static SIM_DIE_C_BITS: AtomicU32 = AtomicU32::new(0x41C8_0000);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_die_celsius(c: f32) {
    SIM_DIE_C_BITS.store(c.to_bits(), Ordering::Relaxed);
}

pub struct OnDieSensor {
    #[cfg(target_os = "espidf")]
    handle: temperature_sensor_handle_t,
}

impl OnDieSensor {
    #[cfg(target_os = "espidf")]
    pub fn new() -> Result<Self> {
        info!(
            "Install temperature sensor, expected range: {}~{} \u{2103}",
            pins::DIE_TEMP_RANGE_MIN_C,
            pins::DIE_TEMP_RANGE_MAX_C
        );
        let cfg = temperature_sensor_config_t {
            range_min: pins::DIE_TEMP_RANGE_MIN_C,
            range_max: pins::DIE_TEMP_RANGE_MAX_C,
            clk_src: soc_periph_temperature_sensor_clk_src_t_TEMPERATURE_SENSOR_CLK_SRC_DEFAULT,
            ..Default::default()
        };
        let mut handle: temperature_sensor_handle_t = core::ptr::null_mut();
        // SAFETY: out-pointer to a local; the handle is owned by `Self`.
        esp_check(
            unsafe { temperature_sensor_install(&cfg, &mut handle) },
            InitError::DieTempInitFailed,
        )?;
        // SAFETY: handle was just installed.
        esp_check(
            unsafe { temperature_sensor_enable(handle) },
            InitError::DieTempInitFailed,
        )?;
        Ok(Self { handle })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Result<Self> {
        info!(
            "temperature sensor (sim), range {}~{} \u{2103}",
            pins::DIE_TEMP_RANGE_MIN_C,
            pins::DIE_TEMP_RANGE_MAX_C
        );
        Ok(Self {})
    }
}

impl DieTemperaturePort for OnDieSensor {
    #[cfg(target_os = "espidf")]
    fn read_celsius(&mut self) -> Result<f32> {
        let mut c: f32 = 0.0;
        // SAFETY: handle is installed and enabled for the life of `self`.
        esp_check(
            unsafe { temperature_sensor_get_celsius(self.handle, &mut c) },
            SensorError::DieTempReadFailed,
        )?;
        Ok(c)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_celsius(&mut self) -> Result<f32> {
        Ok(f32::from_bits(SIM_DIE_C_BITS.load(Ordering::Relaxed)))
    }
}
