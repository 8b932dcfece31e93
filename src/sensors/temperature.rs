//! LM335 temperature sensor.
//!
//! The sensor output is read straight off the ADC against the reference
//! voltage and scaled linearly: `raw / 1023 × V_ref(mV) × scale`.  The
//! result is truncated to whole degrees.

use super::adc::ADC_MAX;
use crate::config::AmpConfig;

#[derive(Debug, Clone, Copy)]
pub struct TemperatureSensor {
    ref_mv: f32,
    scale_per_mv: f32,
}

impl TemperatureSensor {
    pub fn new(ref_mv: f32, scale_per_mv: f32) -> Self {
        Self {
            ref_mv,
            scale_per_mv,
        }
    }

    pub fn from_config(config: &AmpConfig) -> Self {
        Self::new(config.adc_ref_mv, config.temp_scale_per_mv)
    }

    /// Whole degrees Celsius for a raw sample.
    pub fn celsius(&self, raw: u16) -> u16 {
        let raw = raw.min(ADC_MAX);
        (f32::from(raw) / f32::from(ADC_MAX) * self.ref_mv * self.scale_per_mv) as u16
    }
}
