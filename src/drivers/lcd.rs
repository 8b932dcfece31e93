//! Serial character display driver (4 rows × 16 columns).
//!
//! The display speaks a private command protocol over a one-way byte link.
//! A leading command byte selects how the following bytes are read:
//!
//! | Byte   | Meaning                                         |
//! |--------|-------------------------------------------------|
//! | `0xA0` | init (device boots, then needs a settle time)   |
//! | `0xA1` | goto: next two raw bytes are column, row        |
//! | `0xA2` | ASCII mode: text bytes until a `0x00` byte      |
//! | `0xA3` | command mode: next byte is an opcode            |
//!
//! Command-mode opcodes: `0x01` clear + home, `0x0E` cursor on, `0x0C`
//! cursor off.  Nothing is ever read back; every call assumes the device
//! kept pace with the settle delays.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{ByteSink, TextDisplay};
use crate::config::AmpConfig;
use crate::error::Result;

pub const CMD_INIT: u8 = 0xA0;
pub const CMD_GOTO: u8 = 0xA1;
pub const CMD_ASCII: u8 = 0xA2;
pub const CMD_COMMAND: u8 = 0xA3;
pub const ASCII_END: u8 = 0x00;

pub const OP_CLEAR: u8 = 0x01;
pub const OP_CURSOR_ON: u8 = 0x0E;
pub const OP_CURSOR_OFF: u8 = 0x0C;

/// Display geometry.
pub const LCD_COLS: usize = 16;
pub const LCD_ROWS: usize = 4;

/// Settle times in milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct LcdSettle {
    pub boot_ms: u32,
    pub clear_ms: u32,
    pub goto_ms: u32,
}

impl LcdSettle {
    pub fn from_config(config: &AmpConfig) -> Self {
        Self {
            boot_ms: config.lcd_boot_ms,
            clear_ms: config.lcd_clear_ms,
            goto_ms: config.lcd_goto_ms,
        }
    }
}

pub struct Lcd<S, D> {
    link: S,
    delay: D,
    settle: LcdSettle,
}

impl<S, D> Lcd<S, D>
where
    S: ByteSink,
    D: DelayNs,
{
    pub fn new(link: S, delay: D, settle: LcdSettle) -> Self {
        Self { link, delay, settle }
    }

    pub fn release(self) -> (S, D) {
        (self.link, self.delay)
    }
}

impl<S, D> TextDisplay for Lcd<S, D>
where
    S: ByteSink,
    D: DelayNs,
{
    /// Boot the device and leave it cleared.
    fn init(&mut self) -> Result<()> {
        self.link.send(CMD_INIT)?;
        self.delay.delay_ms(self.settle.boot_ms);
        self.clear()
    }

    /// Clear the screen and home the cursor.
    fn clear(&mut self) -> Result<()> {
        self.link.send(CMD_COMMAND)?;
        self.link.send(OP_CLEAR)?;
        self.delay.delay_ms(self.settle.clear_ms);
        Ok(())
    }

    /// Move the cursor to column `x`, row `y`.
    fn goto(&mut self, x: u8, y: u8) -> Result<()> {
        self.link.send(CMD_GOTO)?;
        self.link.send(x)?;
        self.link.send(y)?;
        self.delay.delay_ms(self.settle.goto_ms);
        Ok(())
    }

    /// Stream `text` in ASCII mode.
    ///
    /// Bytes up to 31 are device-defined glyphs and pass through untouched.
    /// A zero byte would end ASCII mode early, so the text stops there.
    fn print(&mut self, text: &[u8]) -> Result<()> {
        self.link.send(CMD_ASCII)?;
        for &b in text.iter().take_while(|&&b| b != ASCII_END) {
            self.link.send(b)?;
        }
        self.link.send(ASCII_END)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        self.link.send(CMD_COMMAND)?;
        self.link.send(if visible { OP_CURSOR_ON } else { OP_CURSOR_OFF })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Wire {
        bytes: Vec<u8>,
    }

    impl ByteSink for Wire {
        fn send(&mut self, byte: u8) -> Result<()> {
            self.bytes.push(byte);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Clock {
        total_ns: u64,
    }

    impl DelayNs for Clock {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    fn lcd() -> Lcd<Wire, Clock> {
        Lcd::new(
            Wire::default(),
            Clock::default(),
            LcdSettle::from_config(&AmpConfig::default()),
        )
    }

    #[test]
    fn init_boots_then_clears() {
        let mut d = lcd();
        d.init().unwrap();
        let (wire, clock) = d.release();
        assert_eq!(wire.bytes, vec![CMD_INIT, CMD_COMMAND, OP_CLEAR]);
        assert_eq!(clock.total_ns, 60_000_000);
    }

    #[test]
    fn goto_sends_raw_coordinates() {
        let mut d = lcd();
        d.goto(12, 1).unwrap();
        let (wire, clock) = d.release();
        assert_eq!(wire.bytes, vec![CMD_GOTO, 12, 1]);
        assert_eq!(clock.total_ns, 10_000_000);
    }

    #[test]
    fn print_is_zero_terminated() {
        let mut d = lcd();
        d.print(b"Hi\x05").unwrap();
        let (wire, _) = d.release();
        assert_eq!(wire.bytes, vec![CMD_ASCII, b'H', b'i', 0x05, ASCII_END]);
    }

    #[test]
    fn print_stops_at_embedded_nul() {
        let mut d = lcd();
        d.print(b"ab\0cd").unwrap();
        let (wire, _) = d.release();
        assert_eq!(wire.bytes, vec![CMD_ASCII, b'a', b'b', ASCII_END]);
    }

    #[test]
    fn cursor_visibility_opcodes() {
        let mut d = lcd();
        d.set_cursor_visible(true).unwrap();
        d.set_cursor_visible(false).unwrap();
        let (wire, clock) = d.release();
        assert_eq!(
            wire.bytes,
            vec![CMD_COMMAND, OP_CURSOR_ON, CMD_COMMAND, OP_CURSOR_OFF]
        );
        assert_eq!(clock.total_ns, 0);
    }
}
