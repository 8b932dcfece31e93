//! Volume knob: 10-bit wiper reading to a 0..=100 percentage.

use super::adc::ADC_MAX;

/// Rounds to the nearest percent.
pub fn volume_percent(raw: u16) -> u8 {
    let raw = raw.min(ADC_MAX);
    (f32::from(raw) / f32::from(ADC_MAX) * 100.0).round() as u8
}
