//! Sensor subsystem — the blocking ADC sampler and the conversions that
//! turn raw samples and tachometer pulses into physical values.

pub mod adc;
pub mod tach;
pub mod temperature;
pub mod volume;

pub use adc::AnalogSampler;
pub use tach::FanState;
pub use temperature::TemperatureSensor;
