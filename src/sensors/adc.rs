//! Single-channel, blocking ADC sampler.
//!
//! One conversion per call: select the mux input, clear the stale
//! conversion-complete flag, start, and spin until the flag sets.  No scan
//! queue, no interrupt.
//!
//! If platform init never enabled the converter the sampler returns 0
//! instead of failing.  Downstream this reads as minimum volume and 0 °C.

use crate::app::ports::AdcRegisters;

/// Width of the mux selection field.
pub const MUX_MASK: u8 = 0x1F;
/// Full-scale 10-bit reading.
pub const ADC_MAX: u16 = 1023;

pub struct AnalogSampler<R> {
    regs: R,
}

impl<R: AdcRegisters> AnalogSampler<R> {
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Convert `channel` and return the 10-bit result.
    pub fn read_channel(&mut self, channel: u8) -> u16 {
        if !self.regs.is_enabled() {
            return 0;
        }

        self.regs.clear_complete();
        self.regs.select_channel(channel & MUX_MASK);
        self.regs.start_conversion();
        while !self.regs.conversion_complete() {
            core::hint::spin_loop();
        }

        self.regs.data() & ADC_MAX
    }
}
