//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements                          | Connects to            |
//! |-------------|-------------------------------------|------------------------|
//! | `hardware`  | FanOutputPort, PulseCounterPort,    | LEDC, PCNT, GPIO       |
//! |             | IndicatorPort                       |                        |
//! | `adc`       | AnalogSensorPort                    | ADC1 oneshot + cali    |
//! | `die_temp`  | DieTemperaturePort                  | On-die temp sensor     |
//! | `log_sink`  | EventSink                           | Serial log output      |
//! | `time`      | embedded_hal `DelayNs`              | FreeRTOS delay         |

pub mod adc;
pub mod die_temp;
pub mod hardware;
pub mod log_sink;
pub mod time;
