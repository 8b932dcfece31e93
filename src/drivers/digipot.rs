//! Dual-swiper digital potentiometer driver (stereo volume).
//!
//! Each audio channel has its own clock and reset lines; the data line is
//! shared.  A write is a 16-clock frame:
//!
//! ```text
//!  bit  15 14 13 .. 8  7  6  5 .. 0
//!       -- M  swiper1  -- M  swiper0
//! ```
//!
//! The pot orders its 64 steps from maximum level (step 0) to maximum
//! attenuation (step 63), so the volume percentage is inverted before
//! scaling.  The mute bit does not fully silence the output.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::error::{Error, Result};

/// Highest swiper step.
pub const POT_MAX_STEP: u8 = 63;
/// Clock pulses per frame.
pub const FRAME_BITS: u8 = 16;

const MUTE_BIT_0: u16 = 1 << 6;
const MUTE_BIT_1: u16 = 1 << 14;

/// Map a 0..=100 volume to a swiper step.  Truncates, never rounds up.
pub fn volume_to_step(volume: u8) -> u8 {
    let vol = f32::from(volume.min(100)) / 100.0;
    ((1.0 - vol) * f32::from(POT_MAX_STEP)) as u8
}

/// Build the 16-bit frame for a volume and mute flag.
pub fn frame(volume: u8, mute: bool) -> u16 {
    let step = u16::from(volume_to_step(volume) & 0x3F);
    let mut word = step | (step << 8);
    if mute {
        word |= MUTE_BIT_0 | MUTE_BIT_1;
    }
    word
}

/// Clock and reset lines of one audio channel.
pub struct PotChannel<C, R> {
    clk: C,
    rst: R,
}

impl<C, R> PotChannel<C, R>
where
    C: OutputPin,
    R: OutputPin,
{
    pub fn new(clk: C, rst: R) -> Self {
        Self { clk, rst }
    }

    pub fn release(self) -> (C, R) {
        (self.clk, self.rst)
    }
}

/// Shared data line plus the clock timing.
pub struct DigiPot<P, D> {
    data: P,
    delay: D,
    half_period_us: u32,
}

impl<P, D> DigiPot<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    pub fn new(data: P, delay: D, half_period_us: u32) -> Self {
        Self {
            data,
            delay,
            half_period_us,
        }
    }

    pub fn release(self) -> (P, D) {
        (self.data, self.delay)
    }

    /// Set both swipers of `channel` to `volume` with the given mute state.
    pub fn set_volume<C, R>(
        &mut self,
        channel: &mut PotChannel<C, R>,
        volume: u8,
        mute: bool,
    ) -> Result<()>
    where
        C: OutputPin,
        R: OutputPin,
    {
        self.write_frame(channel, frame(volume, mute))
    }

    /// Clock a raw frame out, bit 0 first, framed by reset high … low.
    pub fn write_frame<C, R>(&mut self, channel: &mut PotChannel<C, R>, word: u16) -> Result<()>
    where
        C: OutputPin,
        R: OutputPin,
    {
        channel.rst.set_high().map_err(Error::gpio)?;

        for i in 0..FRAME_BITS {
            let level = PinState::from(word & (1 << i) != 0);
            self.data.set_state(level).map_err(Error::gpio)?;

            channel.clk.set_high().map_err(Error::gpio)?;
            self.delay.delay_us(self.half_period_us);
            channel.clk.set_low().map_err(Error::gpio)?;
            self.delay.delay_us(self.half_period_us);
        }

        channel.rst.set_low().map_err(Error::gpio)
    }
}
