//! Shadow copy of the four display rows.
//!
//! The display cannot be read back, so the screen keeps its own copy of
//! what each row shows.  Static redraws rewrite every row; field writes
//! patch a row in place and only touch the device when the text actually
//! changes.  Nothing is ever written past column 16 or below row 3.

use heapless::Vec;

use crate::app::ports::TextDisplay;
use crate::drivers::lcd::{LCD_COLS, LCD_ROWS};
use crate::error::Result;

/// Shadow marker for a cell whose device content is not known.  The
/// display protocol never prints NUL, so it never matches real text.
const UNKNOWN: u8 = 0x00;

/// One display row.
pub type DisplayLine = Vec<u8, LCD_COLS>;

#[derive(Debug, Clone, Default)]
pub struct Screen {
    rows: [DisplayLine; LCD_ROWS],
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self, y: usize) -> &[u8] {
        match self.rows.get(y) {
            Some(row) => row.as_slice(),
            None => &[],
        }
    }

    /// Row `y` as text, for logs and tests.
    pub fn row_text(&self, y: usize) -> &str {
        core::str::from_utf8(self.row(y)).unwrap_or("")
    }

    /// Clear the device and paint `layout`, one row per entry.
    ///
    /// On a failed write the affected cells are marked unknown so the
    /// next field write resends them.
    pub fn redraw(&mut self, lcd: &mut impl TextDisplay, layout: &[&[u8]; LCD_ROWS]) -> Result<()> {
        if let Err(e) = lcd.clear() {
            for y in 0..LCD_ROWS {
                self.forget(0, y, LCD_COLS);
            }
            return Err(e);
        }
        for row in &mut self.rows {
            row.clear();
        }

        for (y, text) in layout.iter().enumerate() {
            let text = &text[..text.len().min(LCD_COLS)];
            if let Err(e) = lcd.goto(0, y as u8).and_then(|()| lcd.print(text)) {
                self.forget(0, y, text.len());
                return Err(e);
            }
            self.patch(0, y, text);
        }
        Ok(())
    }

    /// Overwrite `text` at column `x` of row `y`.
    ///
    /// Text running past the last column is cut; writes outside the
    /// display are dropped.  Returns whether anything was sent.
    pub fn write_field(&mut self, lcd: &mut impl TextDisplay, x: usize, y: usize, text: &[u8]) -> Result<bool> {
        if y >= LCD_ROWS || x >= LCD_COLS {
            return Ok(false);
        }
        let text = &text[..text.len().min(LCD_COLS - x)];
        if text.is_empty() || self.shows(x, y, text) {
            return Ok(false);
        }

        if let Err(e) = lcd.goto(x as u8, y as u8).and_then(|()| lcd.print(text)) {
            self.forget(x, y, text.len());
            return Err(e);
        }
        self.patch(x, y, text);
        Ok(true)
    }

    /// Copy `text` into the shadow at (`x`, `y`), padding the row with
    /// spaces up to it.  Callers keep `x + text.len() <= LCD_COLS`.
    fn patch(&mut self, x: usize, y: usize, text: &[u8]) {
        let row = &mut self.rows[y];
        while row.len() < x + text.len() {
            // Cannot fail: x + len <= LCD_COLS.
            let _ = row.push(b' ');
        }
        row[x..x + text.len()].copy_from_slice(text);
    }

    fn forget(&mut self, x: usize, y: usize, len: usize) {
        self.patch(x, y, &[UNKNOWN; LCD_COLS][..len]);
    }

    fn shows(&self, x: usize, y: usize, text: &[u8]) -> bool {
        let row = &self.rows[y];
        text.iter().enumerate().all(|(i, &b)| {
            let shown = row.get(x + i).copied().unwrap_or(b' ');
            shown == b
        })
    }
}
