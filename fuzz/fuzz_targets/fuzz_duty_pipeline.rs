//! Fuzz target: duty estimation
//!
//! Feeds arbitrary bit patterns (NaN, infinities, subnormals included) as
//! the three filtered readings and verifies:
//! - No panics
//! - The merged duty is always in `[0, 1]`
//! - The PWM code is the inverted merged duty
//!
//! cargo fuzz run fuzz_duty_pipeline

#![no_main]

use fanctl::config::FanConfig;
use fanctl::control::filter::ExpFilter;
use fanctl::control::{DutyEstimate, duty_to_code};
use fanctl::shared::Readings;
use libfuzzer_sys::fuzz_target;

fn f32_at(data: &[u8], at: usize) -> f32 {
    let mut word = [0u8; 4];
    for (i, b) in word.iter_mut().enumerate() {
        *b = data.get(at + i).copied().unwrap_or(0);
    }
    f32::from_le_bytes(word)
}

fuzz_target!(|data: &[u8]| {
    let config = FanConfig::default();
    let readings = Readings {
        current_ma: f32_at(data, 0),
        room_c: f32_at(data, 4),
        cell_c: f32_at(data, 8),
    };

    let d = DutyEstimate::compute(&readings, &config);
    assert!((0.0..=1.0).contains(&d.merged), "merged duty out of range: {}", d.merged);
    assert_eq!(d.pwm_code(), duty_to_code(d.merged));

    // Remaining words stream through a cell filter seeded from the first.
    let mut filter = ExpFilter::new(config.filter.cell_alpha, readings.cell_c);
    for chunk in data.get(12..).unwrap_or_default().chunks(4) {
        let _ = filter.update(f32_at(chunk, 0));
    }
});
