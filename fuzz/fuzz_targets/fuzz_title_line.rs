//! Fuzz target: title receive framing
//!
//! Streams arbitrary bytes through `LineReader` and checks that every
//! line stays within the configured cap and every parsed title fits the
//! display field.
//!
//! cargo fuzz run fuzz_title_line

#![no_main]

use std::collections::VecDeque;

use ampctl::app::ports::TitleChannel;
use ampctl::title::{LineReader, TITLE_LEN, parse_title_line};
use libfuzzer_sys::fuzz_target;

struct Stream(VecDeque<u8>);

impl TitleChannel for Stream {
    fn byte_available(&mut self) -> bool {
        !self.0.is_empty()
    }

    fn read_byte(&mut self) -> u8 {
        self.0.pop_front().unwrap_or(b'\n')
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&cap, rest)) = data.split_first() else {
        return;
    };
    let max_len = usize::from(cap);

    if let Some(title) = parse_title_line(rest) {
        assert!(title.len() <= TITLE_LEN);
    }

    let mut reader = LineReader::new(max_len);
    let mut rx = Stream(rest.iter().copied().collect());
    let mut lines = 0usize;
    while let Some(line) = reader.poll(&mut rx) {
        assert!(line.len() <= max_len.clamp(1, 100));
        assert!(!line.contains(&b'\n'));
        lines += 1;
    }
    assert!(lines <= rest.len());
});
