//! Port traits — the boundary between the control core and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Digital pins and busy-wait delays use the embedded-hal 1.0 traits
//! directly.  Everything else the core needs from the platform (ADC
//! registers, the tachometer timer, the fan PWM compare register, the
//! title receive channel, the display byte link) is expressed here, so the
//! whole control loop runs on the host against mocks.

use super::context::AudioState;
use super::events::AppEvent;
use crate::error::Result;

// ───────────────────────────────────────────────────────────────
// Analog (register-level)
// ───────────────────────────────────────────────────────────────

/// Register-level view of a single-conversion ADC.
pub trait AdcRegisters {
    /// Whether the converter has been enabled by platform init.
    fn is_enabled(&self) -> bool;
    /// Clear a pending conversion-complete flag.
    fn clear_complete(&mut self);
    /// Write the input mux field.
    fn select_channel(&mut self, mux: u8);
    /// Kick off one conversion on the selected channel.
    fn start_conversion(&mut self);
    /// Conversion-complete flag.
    fn conversion_complete(&self) -> bool;
    /// Result register.
    fn data(&self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Fan hardware
// ───────────────────────────────────────────────────────────────

/// Free-running counter used to time tachometer pulses.
pub trait TachTimer {
    /// Ticks since the last [`reset_count`](Self::reset_count).
    fn count(&self) -> u16;
    /// Restart counting from zero.
    fn reset_count(&mut self);
    /// Read and clear the overflow flag.
    fn take_overflow(&mut self) -> bool;
}

/// 8-bit PWM compare output driving the fan.
pub trait FanPwm {
    fn set_duty(&mut self, duty: u8);
}

// ───────────────────────────────────────────────────────────────
// Serial links
// ───────────────────────────────────────────────────────────────

/// One-byte transmit capability shared by both display backends.
///
/// Fire-and-forget: once `send` returns the byte is considered sent.
pub trait ByteSink {
    fn send(&mut self, byte: u8) -> Result<()>;
}

/// Line-oriented receive channel delivering "now playing" titles.
pub trait TitleChannel {
    /// Non-blocking: is at least one byte waiting?
    fn byte_available(&mut self) -> bool;
    /// Blocking single-byte read.
    fn read_byte(&mut self) -> u8;
}

// ───────────────────────────────────────────────────────────────
// Board-level ports
// ───────────────────────────────────────────────────────────────

/// Character display with cursor addressing.
pub trait TextDisplay {
    fn init(&mut self) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
    fn goto(&mut self, x: u8, y: u8) -> Result<()>;
    fn print(&mut self, text: &[u8]) -> Result<()>;
    fn set_cursor_visible(&mut self, visible: bool) -> Result<()>;
}

/// Inputs sampled once per iteration.
pub trait SensorPort {
    /// Button levels packed as [`Button::mask`](crate::drivers::button::Button::mask) bits.
    fn buttons(&mut self) -> Result<u8>;
    /// One 10-bit conversion on `channel`.
    fn read_analog(&mut self, channel: u8) -> u16;
    /// Current level of the fan tach line.
    fn tach_level(&mut self) -> Result<bool>;
}

/// Outputs driven by the controller.
pub trait ActuatorPort {
    /// Program both pot channels to the same level.
    fn write_volume(&mut self, volume: u8, mute: bool) -> Result<()>;
    /// Drive the effect, source and mute-LED lines from `audio`.
    fn apply_audio(&mut self, audio: &AudioState) -> Result<()>;
    fn set_fan_duty(&mut self, duty: u8);
}

/// Everything the controller needs from one board.
pub trait Board: SensorPort + ActuatorPort + TextDisplay + TitleChannel + TachTimer {}

impl<T> Board for T where T: SensorPort + ActuatorPort + TextDisplay + TitleChannel + TachTimer {}

// ───────────────────────────────────────────────────────────────
// Event sink (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The controller emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
