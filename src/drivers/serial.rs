//! Bit-banged asynchronous serial transmitter.
//!
//! Frames each byte as 1 start bit (line low), 8 data bits LSB first and
//! 1 stop bit (line high), timed entirely with busy-wait delays.  No
//! interrupts, no buffering, no readback.
//!
//! ## Timing
//!
//! The nominal bit period is `1 / baud`.  Toggling the line costs a fixed
//! number of CPU cycles, so each delay is shortened by that overhead or the
//! effective baud rate drifts low:
//!
//! | Bit         | Delay                                   |
//! |-------------|-----------------------------------------|
//! | start, stop | `bit − start_stop_overhead × cycle`     |
//! | data        | `bit − data_overhead × cycle`           |

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::app::ports::ByteSink;
use crate::config::AmpConfig;
use crate::error::{Error, Result};

/// Precomputed per-bit delays in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitTiming {
    pub start_stop_ns: u32,
    pub data_ns: u32,
}

impl BitTiming {
    pub fn new(baud: u32, cpu_hz: u32, start_stop_overhead: u32, data_overhead: u32) -> Self {
        let bit_ns = 1_000_000_000 / baud.max(1);
        let cycle_ns = 1_000_000_000 / cpu_hz.max(1);
        Self {
            start_stop_ns: bit_ns.saturating_sub(start_stop_overhead.saturating_mul(cycle_ns)),
            data_ns: bit_ns.saturating_sub(data_overhead.saturating_mul(cycle_ns)),
        }
    }

    /// Display-link timing from the system configuration.
    pub fn for_display(config: &AmpConfig) -> Self {
        Self::new(
            config.lcd_baud,
            config.cpu_hz,
            config.lcd_start_stop_overhead_cycles,
            config.lcd_data_overhead_cycles,
        )
    }
}

pub struct BitBangSerial<P, D> {
    tx: P,
    delay: D,
    timing: BitTiming,
}

impl<P, D> BitBangSerial<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Take ownership of the TX pin and park it at the idle (high) level.
    pub fn new(mut tx: P, delay: D, timing: BitTiming) -> Result<Self> {
        tx.set_high().map_err(Error::gpio)?;
        Ok(Self { tx, delay, timing })
    }

    /// Give the pin and delay back (tests inspect the recorded waveform).
    pub fn release(self) -> (P, D) {
        (self.tx, self.delay)
    }

    fn send_byte(&mut self, byte: u8) -> Result<()> {
        // Start bit
        self.tx.set_low().map_err(Error::gpio)?;
        self.delay.delay_ns(self.timing.start_stop_ns);

        for i in 0..8 {
            if byte & (1 << i) != 0 {
                self.tx.set_high().map_err(Error::gpio)?;
            } else {
                self.tx.set_low().map_err(Error::gpio)?;
            }
            self.delay.delay_ns(self.timing.data_ns);
        }

        // Stop bit
        self.tx.set_high().map_err(Error::gpio)?;
        self.delay.delay_ns(self.timing.start_stop_ns);
        Ok(())
    }
}

impl<P, D> ByteSink for BitBangSerial<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn send(&mut self, byte: u8) -> Result<()> {
        self.send_byte(byte)
    }
}
