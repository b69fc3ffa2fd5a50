//! NTC divider voltage to cell temperature.
//!
//! A fitted cubic over the divider's working range:
//! `T(V) = (C3 − C4·V)·V² − C1·V + C0`, V in millivolts.  No range check;
//! outside the fitted range the result is meaningless but finite.

const C0: f32 = 116.0;
const C1: f32 = 9.65e-2;
const C3: f32 = 3.79e-5;
const C4: f32 = 6.76e-9;

/// Cell temperature (°C) for a calibrated NTC reading in millivolts.
pub fn ntc_to_celsius(mv: i32) -> f32 {
    let v = mv as f32;
    (C3 - C4 * v) * v * v - C1 * v + C0
}
