//! "Now playing" title receive framing.
//!
//! Wire format, one command per line:
//!
//! ```text
//! ┌────────────┬───────┬──────────────────┬──────┐
//! │ "cTitle"   │ delim │ title (≤ 16 B)   │ '\n' │
//! └────────────┴───────┴──────────────────┴──────┘
//! ```
//!
//! At most `title_rx_max` bytes are consumed per line; anything beyond
//! belongs to the next read.  Lines with any other prefix are dropped.

use heapless::Vec;
use log::debug;

use crate::app::ports::TitleChannel;

/// Longest title kept.
pub const TITLE_LEN: usize = 16;
/// Hard upper bound on the line buffer.
pub const LINE_CAPACITY: usize = 100;

const PREFIX: &[u8] = b"cTitle";
/// Prefix plus delimiter.
const HEADER_LEN: usize = PREFIX.len() + 1;

pub type TitleBuffer = Vec<u8, TITLE_LEN>;
pub type LineBuffer = Vec<u8, LINE_CAPACITY>;

/// Extract the title from one received line, if it is a title command.
pub fn parse_title_line(line: &[u8]) -> Option<TitleBuffer> {
    if line.len() < HEADER_LEN || !line.starts_with(PREFIX) {
        return None;
    }

    let payload = &line[HEADER_LEN..];
    let payload = &payload[..payload.len().min(TITLE_LEN)];
    let end = payload.iter().position(|&b| b == 0).unwrap_or(payload.len());

    let mut title = TitleBuffer::new();
    // Cannot fail: at most TITLE_LEN bytes.
    let _ = title.extend_from_slice(&payload[..end]);
    Some(title)
}

/// Pulls one capped line from the receive channel.
pub struct LineReader {
    max_len: usize,
    line: LineBuffer,
}

impl LineReader {
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len: max_len.clamp(1, LINE_CAPACITY),
            line: LineBuffer::new(),
        }
    }

    /// If a byte is waiting, read one line (blocking until newline or the
    /// byte cap) and return it without the newline.
    pub fn poll(&mut self, rx: &mut impl TitleChannel) -> Option<&[u8]> {
        if !rx.byte_available() {
            return None;
        }

        self.line.clear();
        for _ in 0..self.max_len {
            let b = rx.read_byte();
            if b == b'\n' {
                break;
            }
            // Cannot fail: max_len <= LINE_CAPACITY.
            let _ = self.line.push(b);
        }
        Some(self.line.as_slice())
    }

    /// Read a pending line and, if it carries a title, return it.
    pub fn poll_title(&mut self, rx: &mut impl TitleChannel) -> Option<TitleBuffer> {
        let line = self.poll(rx)?;
        let title = parse_title_line(line);
        if title.is_none() {
            debug!("title: dropped {}-byte line without prefix", line.len());
        }
        title
    }
}
