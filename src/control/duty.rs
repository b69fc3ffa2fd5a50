//! Duty mappers: motor current → duty and room/cell temperature → duty.
//!
//! Both return an unclamped fractional duty; saturation happens once, in
//! [`fuse`](super::fusion::fuse).

use log::warn;

use crate::config::{CurrentCurve, ThermalCurve};

/// Piecewise-linear current → duty.
///
/// ```text
///  duty
///   │                       ___----- gain2
///   │            ___----‾‾‾
///   │      _--‾‾‾  gain1
///   │   _-‾ gain0
///   └──┴──────┴──────────────┴──────── current (mV ≙ mA)
///          offset1        offset2
/// ```
///
/// Each segment carries the accumulated offset of the previous ones, so the
/// curve is continuous at both breakpoints.
pub fn current_to_duty(current: f32, c: &CurrentCurve) -> f32 {
    if current < c.offset1 {
        c.offset0 + c.gain0 * current
    } else if current < c.offset2 {
        c.offset0 + c.gain0 * c.offset1 - c.gain1 * c.offset1 + c.gain1 * current
    } else {
        c.offset0 + c.gain0 * c.offset1 - c.gain1 * c.offset1 + c.gain1 * c.offset2
            - c.gain2 * c.offset2
            + c.gain2 * current
    }
}

/// Room/cell temperature → duty.
///
/// | `cell − room`            | duty                                   |
/// |--------------------------|----------------------------------------|
/// | `> span`                 | cell scaled between zero and full      |
/// | `(0, span]`              | the same, weighted by `delta / span`   |
/// | `< −sensor_fault_delta`  | room scaled (cell sensor unhealthy)    |
/// | otherwise                | 0                                      |
pub fn thermal_to_duty(room_c: f32, cell_c: f32, t: &ThermalCurve) -> f32 {
    let range = t.full_c - t.zero_c;
    let delta = cell_c - room_c;

    if delta > t.gradient_span_c {
        (cell_c - t.zero_c) / range
    } else if delta > 0.0 {
        (delta / t.gradient_span_c) * (cell_c - t.zero_c) / range
    } else if delta < -t.sensor_fault_delta_c {
        warn!(
            "Cell sensor unhealthy (cell {:.1} vs room {:.1}), room temperature used",
            cell_c, room_c
        );
        (room_c - t.zero_c) / range
    } else {
        0.0
    }
}
