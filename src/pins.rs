//! GPIO / peripheral assignments for the fan controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers or channel indices.

// ---------------------------------------------------------------------------
// Fan drive (LEDC PWM, inverted through the driver transistor)
// ---------------------------------------------------------------------------

/// LEDC output driving the fan PWM line.
pub const FAN_PWM_GPIO: i32 = 12;
/// LEDC timer and channel used for the fan.
pub const FAN_LEDC_TIMER: u32 = 0;
pub const FAN_LEDC_CHANNEL: u32 = 0;
/// 25 kHz, above the audible band as 4-wire fans expect.
pub const FAN_PWM_FREQ_HZ: u32 = 25_000;
/// LEDC duty resolution (bits).  8-bit gives 0 – 255 duty codes.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// Duty code that holds the fan off (inverted output).
pub const FAN_PWM_OFF_CODE: u8 = 255;

// ---------------------------------------------------------------------------
// Tachometer (PCNT)
// ---------------------------------------------------------------------------

/// Fan FG/tach output, counted on the falling edge.
pub const FAN_TACH_GPIO: i32 = 11;
pub const PCNT_HIGH_LIMIT: i32 = 1024;
pub const PCNT_LOW_LIMIT: i32 = -1024;
/// Glitch filter applied to the tach input.
pub const PCNT_GLITCH_NS: u32 = 6000;

// ---------------------------------------------------------------------------
// Indicator LED
// ---------------------------------------------------------------------------

/// Blue indicator: blinks during self-test, latched on self-test failure.
pub const INDICATOR_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Analog inputs (ADC1, 12 dB attenuation)
// ---------------------------------------------------------------------------

/// Current-sense amplifier output.
pub const ADC1_CH_CURRENT: u32 = 0;
/// NTC divider on the cell.
pub const ADC1_CH_NTC: u32 = 1;

// ---------------------------------------------------------------------------
// On-die temperature sensor
// ---------------------------------------------------------------------------

/// Expected measurement range (°C) used to select the sensor's range.
pub const DIE_TEMP_RANGE_MIN_C: i32 = -10;
pub const DIE_TEMP_RANGE_MAX_C: i32 = 80;
