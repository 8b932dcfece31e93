//! Fan tachometer period measurement.
//!
//! A free-running timer counts between consecutive rising edges of the
//! tach pulse.  On each edge the count becomes the new period and the
//! timer restarts.  If the timer overflows first the fan is too slow to
//! measure and the period falls back to [`INVALID_PERIOD_SECS`].

use crate::app::ports::TachTimer;
use crate::drivers::button::rising_edge;

/// Period reported when no usable measurement exists.
pub const INVALID_PERIOD_SECS: f32 = 1.0;

/// RPM for a tach period.  Non-positive periods are treated as
/// [`INVALID_PERIOD_SECS`].
pub fn rpm_from_period(period_secs: f32) -> f32 {
    let period = if period_secs <= 0.0 {
        INVALID_PERIOD_SECS
    } else {
        period_secs
    };
    60.0 / period
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanState {
    /// Seconds between tach pulses.
    pub period_secs: f32,
    /// Tach pin level seen on the previous iteration.
    pub last_tach_level: bool,
}

impl Default for FanState {
    fn default() -> Self {
        Self {
            period_secs: INVALID_PERIOD_SECS,
            last_tach_level: false,
        }
    }
}

impl FanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the period from this iteration's tach level.
    pub fn sample(&mut self, timer: &mut impl TachTimer, tach_level: bool, tick_secs: f32) {
        if timer.take_overflow() {
            self.period_secs = INVALID_PERIOD_SECS;
        }

        if rising_edge(u8::from(tach_level), 1, self.last_tach_level) {
            self.period_secs = f32::from(timer.count()) * tick_secs;
            timer.reset_count();
        }
        self.last_tach_level = tach_level;
    }

    pub fn rpm(&self) -> f32 {
        rpm_from_period(self.period_secs)
    }
}
