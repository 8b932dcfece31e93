//! Tachometer timer on top of the monotonic clock.
//!
//! Presents the microsecond system clock as a 16-bit tick counter for
//! [`FanState::sample`](crate::sensors::FanState::sample).  The counter
//! saturates instead of wrapping; the first read past the 16-bit range
//! raises the overflow flag once.
//!
//! - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`** — uses `std::time::Instant` for
//!   host-side testing and simulation.

use crate::app::ports::TachTimer;

pub struct ClockTachTimer {
    tick_us: f32,
    start_us: u64,
    overflow_reported: bool,
    #[cfg(not(target_os = "espidf"))]
    origin: std::time::Instant,
}

impl ClockTachTimer {
    /// `tick_secs` is the duration of one counter tick.
    pub fn new(tick_secs: f32) -> Self {
        let mut timer = Self {
            tick_us: tick_secs * 1_000_000.0,
            start_us: 0,
            overflow_reported: false,
            #[cfg(not(target_os = "espidf"))]
            origin: std::time::Instant::now(),
        };
        timer.start_us = timer.now_us();
        timer
    }

    /// Microseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    fn now_us(&self) -> u64 {
        // SAFETY: esp_timer_get_time() only reads the system timer; it is callable from any task after boot.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since construction (monotonic).
    #[cfg(not(target_os = "espidf"))]
    fn now_us(&self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }

    fn elapsed_ticks(&self) -> f32 {
        self.now_us().saturating_sub(self.start_us) as f32 / self.tick_us
    }
}

impl TachTimer for ClockTachTimer {
    fn count(&self) -> u16 {
        self.elapsed_ticks().min(f32::from(u16::MAX)) as u16
    }

    fn reset_count(&mut self) {
        self.start_us = self.now_us();
        self.overflow_reported = false;
    }

    fn take_overflow(&mut self) -> bool {
        if self.overflow_reported || self.elapsed_ticks() < f32::from(u16::MAX) {
            return false;
        }
        self.overflow_reported = true;
        true
    }
}
