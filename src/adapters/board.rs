//! ESP32 peripheral handles behind the embedded-hal traits and the
//! register-level ports.
//!
//! Every handle is a thin wrapper over the [`hw_init`] helpers, so it is
//! only meaningful after [`hw_init::init_peripherals`] has run.  On the
//! host the helpers are no-ops and the handles read back idle values.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::app::ports::{AdcRegisters, ByteSink, FanPwm, TitleChannel};
use crate::drivers::hw_init;
use crate::error::{Error, Result};

// ── GPIO ──────────────────────────────────────────────────────

/// Output pin addressed by GPIO number.
#[derive(Debug, Clone, Copy)]
pub struct GpioOut(pub i32);

impl ErrorType for GpioOut {
    type Error = Infallible;
}

impl OutputPin for GpioOut {
    fn set_low(&mut self) -> core::result::Result<(), Infallible> {
        hw_init::gpio_write(self.0, false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Infallible> {
        hw_init::gpio_write(self.0, true);
        Ok(())
    }
}

/// Input pin addressed by GPIO number.
#[derive(Debug, Clone, Copy)]
pub struct GpioIn(pub i32);

impl ErrorType for GpioIn {
    type Error = Infallible;
}

impl InputPin for GpioIn {
    fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
        Ok(hw_init::gpio_read(self.0))
    }

    fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
        Ok(!hw_init::gpio_read(self.0))
    }
}

// ── ADC ───────────────────────────────────────────────────────

/// The ADC1 oneshot driver presented as mux / start / flag / data
/// registers.  The driver converts synchronously, so the complete flag is
/// already set when `start_conversion` returns.  The 12-bit result is
/// scaled down to 10 bits.
#[derive(Debug, Default)]
pub struct OneshotAdc {
    mux: u8,
    complete: bool,
    data: u16,
}

impl OneshotAdc {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AdcRegisters for OneshotAdc {
    fn is_enabled(&self) -> bool {
        hw_init::adc1_ready()
    }

    fn clear_complete(&mut self) {
        self.complete = false;
    }

    fn select_channel(&mut self, mux: u8) {
        self.mux = mux;
    }

    fn start_conversion(&mut self) {
        self.data = hw_init::adc1_read(self.mux) >> 2;
        self.complete = true;
    }

    fn conversion_complete(&self) -> bool {
        self.complete
    }

    fn data(&self) -> u16 {
        self.data
    }
}

// ── Fan PWM ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct LedcFan {
    channel: u32,
}

impl LedcFan {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }
}

impl FanPwm for LedcFan {
    fn set_duty(&mut self, duty: u8) {
        hw_init::ledc_set(self.channel, duty);
    }
}

// ── UART ──────────────────────────────────────────────────────

/// Receive side of a UART, used for the title link.
#[derive(Debug, Clone, Copy)]
pub struct UartRx(pub i32);

impl TitleChannel for UartRx {
    fn byte_available(&mut self) -> bool {
        hw_init::uart_pending(self.0) > 0
    }

    fn read_byte(&mut self) -> u8 {
        hw_init::uart_read(self.0)
    }
}

/// Transmit side of a UART, used as the display link with `lcd-uart`.
#[derive(Debug, Clone, Copy)]
pub struct UartTx(pub i32);

impl ByteSink for UartTx {
    fn send(&mut self, byte: u8) -> Result<()> {
        if hw_init::uart_write(self.0, byte) {
            Ok(())
        } else {
            Err(Error::Init("uart transmit refused"))
        }
    }
}
