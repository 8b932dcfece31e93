//! System configuration parameters
//!
//! Every tunable constant of the amplifier controller.  The values are
//! fixed at build time; there is no runtime reconfiguration and nothing is
//! persisted.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmpConfig {
    // --- Timing base ---
    /// CPU clock the bit-toggle overheads are expressed in (Hz)
    pub cpu_hz: u32,

    // --- Display link ---
    /// Baud rate of the display serial line
    pub lcd_baud: u32,
    /// CPU cycles spent toggling the line around a start/stop bit
    pub lcd_start_stop_overhead_cycles: u32,
    /// CPU cycles spent toggling the line around a data bit
    pub lcd_data_overhead_cycles: u32,
    /// Settle time after the init command (milliseconds)
    pub lcd_boot_ms: u32,
    /// Settle time after a clear command (milliseconds)
    pub lcd_clear_ms: u32,
    /// Settle time after a goto command (milliseconds)
    pub lcd_goto_ms: u32,

    // --- Digital potentiometers ---
    /// Clock high / low time per frame bit (microseconds)
    pub pot_clock_half_period_us: u32,

    // --- Fan ---
    /// Fan speed at 0 °C (RPM)
    pub fan_rpm_min: u16,
    /// Fan speed at `fan_temp_max_c` (RPM)
    pub fan_rpm_max: u16,
    /// Temperature mapped to full fan speed (Celsius)
    pub fan_temp_max_c: u16,
    /// PWM compare value the error is added to
    pub pwm_midpoint: u8,
    /// Lower bound of the clamped RPM error
    pub fan_error_clamp_min: i16,
    /// Upper bound of the clamped RPM error
    pub fan_error_clamp_max: i16,
    /// Duration of one tachometer timer tick (seconds)
    pub tach_tick_secs: f32,

    // --- Analog ---
    /// ADC reference voltage (millivolts)
    pub adc_ref_mv: f32,
    /// Temperature sensor scale (degrees per millivolt)
    pub temp_scale_per_mv: f32,

    // --- Title receive ---
    /// Maximum bytes consumed for one received line
    pub title_rx_max: usize,
}

impl Default for AmpConfig {
    fn default() -> Self {
        Self {
            cpu_hz: 8_000_000,

            // Display
            lcd_baud: 19_200,
            lcd_start_stop_overhead_cycles: 20,
            lcd_data_overhead_cycles: 60,
            lcd_boot_ms: 50,
            lcd_clear_ms: 10,
            lcd_goto_ms: 10,

            // Potentiometers
            pot_clock_half_period_us: 1,

            // Fan
            fan_rpm_min: 1200,
            fan_rpm_max: 6000,
            fan_temp_max_c: 80,
            pwm_midpoint: 127,
            fan_error_clamp_min: 125,
            fan_error_clamp_max: 127,
            tach_tick_secs: 1.28e-4, // /1024 prescaler at 8 MHz

            // Analog
            adc_ref_mv: 5000.0,
            temp_scale_per_mv: 0.01,

            // Title
            title_rx_max: 100,
        }
    }
}

impl AmpConfig {
    /// Reject combinations the control core cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.cpu_hz == 0 {
            return Err(Error::Config("cpu_hz must be non-zero"));
        }
        if self.lcd_baud == 0 || self.lcd_baud > self.cpu_hz {
            return Err(Error::Config("lcd_baud out of range"));
        }
        let bit_ns = 1_000_000_000 / u64::from(self.lcd_baud);
        let cycle_ns = 1_000_000_000 / u64::from(self.cpu_hz);
        let worst = u64::from(
            self.lcd_start_stop_overhead_cycles
                .max(self.lcd_data_overhead_cycles),
        );
        if worst * cycle_ns >= bit_ns {
            return Err(Error::Config("bit overhead exceeds the bit period"));
        }
        if self.fan_rpm_min >= self.fan_rpm_max {
            return Err(Error::Config("fan_rpm_min must be below fan_rpm_max"));
        }
        if self.fan_temp_max_c == 0 {
            return Err(Error::Config("fan_temp_max_c must be non-zero"));
        }
        if self.fan_error_clamp_min > self.fan_error_clamp_max {
            return Err(Error::Config("fan error clamp bounds inverted"));
        }
        let lowest = i32::from(self.pwm_midpoint) + i32::from(self.fan_error_clamp_min);
        let highest = i32::from(self.pwm_midpoint) + i32::from(self.fan_error_clamp_max);
        if lowest < 0 || highest > i32::from(u8::MAX) {
            return Err(Error::Config("fan duty leaves the 8-bit range"));
        }
        if self.tach_tick_secs.is_nan() || self.tach_tick_secs <= 0.0 {
            return Err(Error::Config("tach_tick_secs must be positive"));
        }
        if self.title_rx_max < 8 {
            return Err(Error::Config("title_rx_max too small for the prefix"));
        }
        Ok(())
    }
}
