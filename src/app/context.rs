//! Device context: the single owner of every piece of mutable state.
//!
//! The controller passes it by `&mut` into each stage of the iteration,
//! so each datum has exactly one writer.

use crate::drivers::button::EdgeState;
use crate::menu::Menu;
use crate::menu::screen::Screen;
use crate::sensors::FanState;
use crate::title::TitleBuffer;

// ---------------------------------------------------------------------------
// Audio state
// ---------------------------------------------------------------------------

/// Effect toggles, one bit per effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Effects(u8);

impl Effects {
    pub const BASS: u8 = 0x01;
    pub const DIST: u8 = 0x02;

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & (Self::BASS | Self::DIST))
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    pub fn toggle(&mut self, flag: u8) {
        self.0 ^= flag & (Self::BASS | Self::DIST);
    }
}

/// Everything the buttons change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioState {
    /// `true` = jack input, `false` = RCA.
    pub source_jack: bool,
    pub effects: Effects,
    pub mute: bool,
}

// ---------------------------------------------------------------------------
// DeviceContext
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct DeviceContext {
    pub menu: Menu,
    pub edges: EdgeState,
    pub audio: AudioState,
    pub fan: FanState,
    pub title: TitleBuffer,
    pub screen: Screen,
    /// Last volume percentage read from the knob.
    pub volume: u8,
    /// Last temperature reading (°C).
    pub temperature_c: u16,
    /// Completed control iterations.
    pub iterations: u64,
}

impl DeviceContext {
    pub fn new() -> Self {
        Self::default()
    }
}
