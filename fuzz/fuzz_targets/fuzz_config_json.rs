//! Fuzz target: JSON config ingestion
//!
//! Parses arbitrary bytes as a `FanConfig` and, for any config that passes
//! validation, verifies:
//! - No panics in `validate`
//! - Duty estimation stays in `[0, 1]` for a spread of readings
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use fanctl::config::FanConfig;
use fanctl::control::DutyEstimate;
use fanctl::shared::Readings;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(config) = serde_json::from_slice::<FanConfig>(data) else {
        return;
    };
    if config.validate().is_err() {
        return;
    }

    for &(current_ma, room_c, cell_c) in &[
        (0.0, 25.0, 25.0),
        (400.0, 20.0, 35.0),
        (1800.0, 25.0, 60.0),
        (100.0, 40.0, 15.0),
    ] {
        let r = Readings {
            current_ma,
            room_c,
            cell_c,
        };
        let d = DutyEstimate::compute(&r, &config);
        assert!((0.0..=1.0).contains(&d.merged));
    }
});
