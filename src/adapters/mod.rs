//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                   | Connects to              |
//! |------------|------------------------------|--------------------------|
//! | `board`    | OutputPin, InputPin          | ESP32 GPIO               |
//! |            | AdcRegisters                 | ADC1 oneshot driver      |
//! |            | FanPwm                       | LEDC channel 0           |
//! |            | TitleChannel, ByteSink       | UART driver              |
//! | `hardware` | SensorPort, ActuatorPort     | all board drivers        |
//! |            | TextDisplay, TitleChannel    |                          |
//! |            | TachTimer                    |                          |
//! | `log_sink` | EventSink                    | Serial log output        |
//! | `time`     | TachTimer                    | ESP32 system timer       |

pub mod board;
pub mod hardware;
pub mod log_sink;
pub mod time;
