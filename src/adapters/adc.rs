//! Oneshot ADC1 adapter for the current-sense and NTC channels.
//!
//! Both channels run at 12 dB attenuation and default bit width.  Each
//! channel gets a curve-fitting calibration scheme when the eFuse carries
//! one; otherwise readings fall back to raw counts with a warning.
//! Calibration handles outlive unit teardown, so a resync only rebuilds
//! the unit.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: owns the oneshot unit and calibration handles.
//! On host/test: returns millivolts injected with [`sim_set_millivolts`].

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicI32, Ordering};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
use log::{info, warn};

use crate::app::ports::AnalogSensorPort;
use crate::error::Result;
#[cfg(target_os = "espidf")]
use crate::error::{esp_check, InitError, SensorError};
use crate::pins;

#[cfg(not(target_os = "espidf"))]
static SIM_CURRENT_MV: AtomicI32 = AtomicI32::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_NTC_MV: AtomicI32 = AtomicI32::new(0);

/// Set the values the simulated channels return.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_millivolts(current_mv: i32, ntc_mv: i32) {
    SIM_CURRENT_MV.store(current_mv, Ordering::Relaxed);
    SIM_NTC_MV.store(ntc_mv, Ordering::Relaxed);
}

pub struct OneshotAdc {
    #[cfg(target_os = "espidf")]
    unit: adc_oneshot_unit_handle_t,
    #[cfg(target_os = "espidf")]
    cali_current: Option<adc_cali_handle_t>,
    #[cfg(target_os = "espidf")]
    cali_ntc: Option<adc_cali_handle_t>,
    live: bool,
    rebuilds: u32,
}

impl OneshotAdc {
    /// Create the unit, configure both channels and set up calibration.
    #[cfg(target_os = "espidf")]
    pub fn new() -> Result<Self> {
        let unit = create_unit()?;
        let cali_current = calibration_for(pins::ADC1_CH_CURRENT);
        let cali_ntc = calibration_for(pins::ADC1_CH_NTC);
        info!("ADC1 initialized and configured");
        Ok(Self {
            unit,
            cali_current,
            cali_ntc,
            live: true,
            rebuilds: 0,
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Result<Self> {
        info!(
            "ADC1 (sim) initialized: CH{}=current, CH{}=NTC",
            pins::ADC1_CH_CURRENT,
            pins::ADC1_CH_NTC
        );
        Ok(Self {
            live: true,
            rebuilds: 0,
        })
    }

    /// Whether the unit currently exists.
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Number of teardown/re-create cycles so far.
    pub fn rebuilds(&self) -> u32 {
        self.rebuilds
    }

    // ── ESP-IDF ───────────────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn read_channel(&mut self, channel: u32, cali: Option<adc_cali_handle_t>) -> Result<i32> {
        let mut raw: i32 = 0;
        // SAFETY: `unit` is live (teardown is always followed by reinit
        // before the next read) and owned by `self`.
        esp_check(
            unsafe { adc_oneshot_read(self.unit, channel, &mut raw) },
            SensorError::AdcReadFailed,
        )?;
        let Some(cali) = cali else {
            return Ok(raw);
        };
        let mut mv: i32 = 0;
        // SAFETY: `cali` was created by calibration_for() and never freed.
        esp_check(
            unsafe { adc_cali_raw_to_voltage(cali, raw, &mut mv) },
            SensorError::AdcReadFailed,
        )?;
        Ok(mv)
    }

    #[cfg(target_os = "espidf")]
    fn hw_teardown(&mut self) -> Result<()> {
        // SAFETY: `unit` is live; it is not used again until hw_reinit().
        esp_check(unsafe { adc_oneshot_del_unit(self.unit) }, InitError::AdcDeinitFailed)?;
        self.unit = core::ptr::null_mut();
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn hw_reinit(&mut self) -> Result<()> {
        self.unit = create_unit()?;
        Ok(())
    }

    // ── Simulation ────────────────────────────────────────────

    #[cfg(not(target_os = "espidf"))]
    fn hw_teardown(&mut self) -> Result<()> {
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn hw_reinit(&mut self) -> Result<()> {
        Ok(())
    }
}

impl AnalogSensorPort for OneshotAdc {
    #[cfg(target_os = "espidf")]
    fn read_current_mv(&mut self) -> Result<i32> {
        self.read_channel(pins::ADC1_CH_CURRENT, self.cali_current)
    }

    #[cfg(target_os = "espidf")]
    fn read_ntc_mv(&mut self) -> Result<i32> {
        self.read_channel(pins::ADC1_CH_NTC, self.cali_ntc)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_current_mv(&mut self) -> Result<i32> {
        Ok(SIM_CURRENT_MV.load(Ordering::Relaxed))
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_ntc_mv(&mut self) -> Result<i32> {
        Ok(SIM_NTC_MV.load(Ordering::Relaxed))
    }

    fn teardown(&mut self) -> Result<()> {
        if !self.live {
            warn!("ADC1 teardown requested while already down");
            return Ok(());
        }
        self.hw_teardown()?;
        self.live = false;
        Ok(())
    }

    fn reinit(&mut self) -> Result<()> {
        if self.live {
            self.teardown()?;
        }
        self.hw_reinit()?;
        self.live = true;
        self.rebuilds += 1;
        Ok(())
    }
}

#[cfg(target_os = "espidf")]
fn create_unit() -> Result<adc_oneshot_unit_handle_t> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    let mut unit: adc_oneshot_unit_handle_t = core::ptr::null_mut();
    // SAFETY: out-pointer to a local; ownership passes to OneshotAdc.
    esp_check(
        unsafe { adc_oneshot_new_unit(&init_cfg, &mut unit) },
        InitError::AdcInitFailed,
    )?;

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_DEFAULT,
    };
    for channel in [pins::ADC1_CH_CURRENT, pins::ADC1_CH_NTC] {
        // SAFETY: `unit` was just created.
        esp_check(
            unsafe { adc_oneshot_config_channel(unit, channel, &chan_cfg) },
            InitError::AdcInitFailed,
        )?;
    }
    Ok(unit)
}

/// Curve-fitting calibration for one channel, or `None` to use raw counts.
#[cfg(target_os = "espidf")]
fn calibration_for(channel: u32) -> Option<adc_cali_handle_t> {
    let cfg = adc_cali_curve_fitting_config_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        chan: channel,
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_DEFAULT,
    };
    let mut handle: adc_cali_handle_t = core::ptr::null_mut();
    // SAFETY: out-pointer to a local; the handle lives for the process.
    let ret = unsafe { adc_cali_create_scheme_curve_fitting(&cfg, &mut handle) };
    if ret == ESP_OK as i32 {
        info!("ADC1 CH{channel}: curve-fitting calibration enabled");
        Some(handle)
    } else {
        warn!("ADC1 CH{channel}: calibration unavailable (rc={ret}), using raw counts");
        None
    }
}
