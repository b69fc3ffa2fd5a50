//! Raw peripheral helpers: LEDC fan PWM and the indicator GPIO.
//!
//! Thin wrappers over ESP-IDF sys calls, each returning the crate `Result`.
//! Called from the fan and indicator drivers; the one-shot init functions
//! run once from `main()` before any task is spawned.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::info;

use crate::error::Result;
#[cfg(target_os = "espidf")]
use crate::error::{esp_check, ActuatorError, InitError};
#[cfg(target_os = "espidf")]
use crate::pins;

// ── LEDC PWM ─────────────────────────────────────────────────

/// Timer 0 at 25 kHz, 8-bit, on the RC_FAST clock; channel 0 on the fan
/// GPIO.  The output is left stopped with the line idle-high (fan off).
#[cfg(target_os = "espidf")]
pub fn init_fan_pwm() -> Result<()> {
    let timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: pins::FAN_LEDC_TIMER,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
        freq_hz: pins::FAN_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_USE_RC_FAST_CLK,
        ..Default::default()
    };
    // SAFETY: called once from main() before any other LEDC access.
    esp_check(unsafe { ledc_timer_config(&timer) }, InitError::LedcInitFailed)?;

    let channel = ledc_channel_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        channel: pins::FAN_LEDC_CHANNEL,
        timer_sel: pins::FAN_LEDC_TIMER,
        intr_type: ledc_intr_type_t_LEDC_INTR_DISABLE,
        gpio_num: pins::FAN_PWM_GPIO,
        duty: u32::from(pins::FAN_PWM_OFF_CODE),
        hpoint: 0,
        ..Default::default()
    };
    // SAFETY: as above.
    esp_check(unsafe { ledc_channel_config(&channel) }, InitError::LedcInitFailed)?;

    ledc_stop(pins::FAN_LEDC_CHANNEL, true)?;
    info!("hw_init: fan PWM configured ({} Hz, 8-bit)", pins::FAN_PWM_FREQ_HZ);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_fan_pwm() -> Result<()> {
    log::info!("hw_init(sim): fan PWM init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u8) -> Result<()> {
    // SAFETY: channel configured in init_fan_pwm(); only the main task
    // writes the fan duty.
    unsafe {
        esp_check(
            ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, u32::from(duty)),
            ActuatorError::PwmWriteFailed,
        )?;
        esp_check(
            ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel),
            ActuatorError::PwmWriteFailed,
        )
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u8) -> Result<()> {
    Ok(())
}

/// Stop the channel output, holding the line at `idle_high`.
#[cfg(target_os = "espidf")]
pub fn ledc_stop(channel: u32, idle_high: bool) -> Result<()> {
    // SAFETY: channel configured in init_fan_pwm().
    esp_check(
        unsafe { esp_idf_svc::sys::ledc_stop(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, u32::from(idle_high)) },
        ActuatorError::PwmStopFailed,
    )
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_stop(_channel: u32, _idle_high: bool) -> Result<()> {
    Ok(())
}

// ── GPIO Outputs ──────────────────────────────────────────────

/// Configure the indicator as a plain push-pull output, driven low.
#[cfg(target_os = "espidf")]
pub fn init_indicator() -> Result<()> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::INDICATOR_GPIO,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        ..Default::default()
    };
    // SAFETY: called once from main() before the pin is used.
    esp_check(unsafe { gpio_config(&cfg) }, InitError::GpioConfigFailed)?;
    gpio_write(pins::INDICATOR_GPIO, false)?;
    info!("hw_init: indicator GPIO{} configured", pins::INDICATOR_GPIO);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_indicator() -> Result<()> {
    log::info!("hw_init(sim): indicator init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> Result<()> {
    // SAFETY: writes an output pin configured in init_indicator().
    esp_check(
        unsafe { gpio_set_level(pin, u32::from(high)) },
        ActuatorError::GpioWriteFailed,
    )
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) -> Result<()> {
    Ok(())
}
