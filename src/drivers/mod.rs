//! Actuator drivers, raw peripheral helpers and task spawning.

pub mod fan_pwm;
pub mod hw_init;
pub mod indicator;
pub mod pulse_counter;
pub mod task_pin;
