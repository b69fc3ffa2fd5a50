//! End-to-end control cycle on the real `HardwareAdapter` with the
//! simulated LEDC and PCNT drivers.
//!
//! The only test in this binary that touches the shared pulse simulation.

use std::sync::Arc;

use embedded_hal::delay::DelayNs;
use fanctl::adapters::hardware::HardwareAdapter;
use fanctl::app::service::FanService;
use fanctl::config::FanConfig;
use fanctl::drivers::fan_pwm::{FanOutput, FanPwm};
use fanctl::drivers::indicator::Indicator;
use fanctl::drivers::pulse_counter::{self, PulseCounter};
use fanctl::fsm::RunState;
use fanctl::shared::SharedState;

use crate::mock_hw::RecordingSink;

/// Delay that feeds tach pulses into the simulated counter while "waiting".
struct SpinningFan {
    pulses_per_wait: i32,
}

impl DelayNs for SpinningFan {
    fn delay_ns(&mut self, _ns: u32) {
        pulse_counter::sim_add_pulses(self.pulses_per_wait);
    }

    fn delay_ms(&mut self, _ms: u32) {
        pulse_counter::sim_add_pulses(self.pulses_per_wait);
    }
}

#[test]
fn sim_drivers_follow_run_state() {
    let shared = Arc::new(SharedState::new());
    let mut hw = HardwareAdapter::new(FanPwm::new(), PulseCounter::new().unwrap(), Indicator::new());
    let mut service = FanService::new(FanConfig::default(), Arc::clone(&shared));
    let mut sink = RecordingSink::new();
    let mut fan = SpinningFan { pulses_per_wait: 30 };

    service.start(&mut hw, &mut sink).unwrap();
    assert_eq!(hw.fan().state(), FanOutput::Stopped);
    assert!(!hw.counter().is_enabled());

    // Hot cell: start.
    shared.set_room_c(25.0);
    shared.set_cell_c(50.0);
    service.tick(&mut hw, &mut fan, &mut sink).unwrap();
    assert_eq!(service.state(), RunState::Running);
    assert_eq!(hw.fan().state(), FanOutput::Driving { code: 0 });
    assert!(hw.counter().is_counting());

    // Cooled down, but the fan still spins: keep running at the off code.
    shared.set_cell_c(25.0);
    service.tick(&mut hw, &mut fan, &mut sink).unwrap();
    assert_eq!(service.state(), RunState::Running);
    assert_eq!(service.pulse_count(), 30);
    assert_eq!(service.rpm(), 450);
    assert_eq!(hw.fan().current_code(), 255);

    // Fan coasts to a halt: stop, counter suspended.
    fan.pulses_per_wait = 0;
    service.tick(&mut hw, &mut fan, &mut sink).unwrap();
    assert_eq!(service.state(), RunState::Stopped);
    assert_eq!(hw.fan().state(), FanOutput::Stopped);
    assert!(!hw.counter().is_enabled());
    assert!(!shared.is_running());
    assert!(!shared.in_sync());
}
