//! Fan speed regulator.
//!
//! Plain proportional step, no integral or derivative term:
//!
//! ```text
//!  target = T / T_max × (RPM_max − RPM_min) + RPM_min
//!  error  = target − 60 / period
//!  duty   = PWM_mid + clamp(error, ERR_min, ERR_max)
//! ```
//!
//! The clamp band is applied to the raw error before the midpoint is
//! added.  The constants come straight from the board bring-up and are
//! kept as they are.

use log::trace;

use super::clamp;
use crate::config::AmpConfig;
use crate::sensors::tach::rpm_from_period;

/// One regulator evaluation, kept for display and logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanCommand {
    pub target_rpm: u16,
    pub actual_rpm: f32,
    pub error: i16,
    pub duty: u8,
}

#[derive(Debug, Clone, Copy)]
pub struct FanRegulator {
    rpm_min: u16,
    rpm_max: u16,
    temp_max_c: u16,
    midpoint: u8,
    error_min: i16,
    error_max: i16,
}

impl FanRegulator {
    pub fn new(config: &AmpConfig) -> Self {
        Self {
            rpm_min: config.fan_rpm_min,
            rpm_max: config.fan_rpm_max,
            temp_max_c: config.fan_temp_max_c,
            midpoint: config.pwm_midpoint,
            error_min: config.fan_error_clamp_min,
            error_max: config.fan_error_clamp_max,
        }
    }

    /// Linear temperature → RPM map, truncated to whole RPM.
    pub fn target_rpm(&self, temp_c: u16) -> u16 {
        let span = f32::from(self.rpm_max.saturating_sub(self.rpm_min));
        (f32::from(temp_c) / f32::from(self.temp_max_c) * span + f32::from(self.rpm_min)) as u16
    }

    pub fn update(&self, temp_c: u16, period_secs: f32) -> FanCommand {
        let target_rpm = self.target_rpm(temp_c);
        let actual_rpm = rpm_from_period(period_secs);
        let error = (f32::from(target_rpm) - actual_rpm) as i16;

        let step = clamp(error, self.error_min, self.error_max);
        let duty = i16::from(self.midpoint).saturating_add(step).clamp(0, i16::from(u8::MAX)) as u8;

        trace!(
            "fan: T={}C target={}rpm actual={:.0}rpm err={} duty={}",
            temp_c, target_rpm, actual_rpm, error, duty
        );

        FanCommand {
            target_rpm,
            actual_rpm,
            error,
            duty,
        }
    }
}
