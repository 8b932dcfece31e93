//! Front-panel push-buttons: snapshot read and rising-edge extraction.
//!
//! ## Hardware
//!
//! Four active-high momentary switches (menu, minus, plus, mute).  The
//! main loop samples all four once per iteration into a bit snapshot; a
//! press is reported on the low → high transition only, once per press.
//!
//! There is no debounce filter.  Contact bounce that straddles two
//! iterations can register as two presses.

use embedded_hal::digital::InputPin;

use crate::error::{Error, Result};

/// Logical buttons, in snapshot bit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Button {
    Menu = 0,
    Minus = 1,
    Plus = 2,
    Mute = 3,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Menu, Button::Minus, Button::Plus, Button::Mute];

    /// Snapshot bit for this button.
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// `true` exactly when `mask` is set in `snapshot` and was not set before.
pub fn rising_edge(snapshot: u8, mask: u8, previous: bool) -> bool {
    let current = snapshot & mask != 0;
    current && current != previous && !previous
}

/// Edges detected in one iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonEdges(u8);

impl ButtonEdges {
    pub fn fired(self, button: Button) -> bool {
        self.0 & button.mask() != 0
    }

    pub fn any(self) -> bool {
        self.0 != 0
    }
}

/// Level of every button as seen on the previous iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeState {
    previous: [bool; 4],
}

impl EdgeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract this iteration's edges, then record the new levels.
    ///
    /// Must be called exactly once per iteration so an edge is neither
    /// reported twice nor lost.
    pub fn update(&mut self, snapshot: u8) -> ButtonEdges {
        let mut edges = 0;
        for button in Button::ALL {
            let idx = button as usize;
            if rising_edge(snapshot, button.mask(), self.previous[idx]) {
                edges |= button.mask();
            }
            self.previous[idx] = snapshot & button.mask() != 0;
        }
        ButtonEdges(edges)
    }

    pub fn previous(&self, button: Button) -> bool {
        self.previous[button as usize]
    }
}

/// The four button inputs, indexed by [`Button`].
pub struct ButtonBank<I> {
    pins: [I; 4],
}

impl<I: InputPin> ButtonBank<I> {
    /// `pins` in [`Button::ALL`] order.
    pub fn new(pins: [I; 4]) -> Self {
        Self { pins }
    }

    /// Sample every button into one bit snapshot.
    pub fn snapshot(&mut self) -> Result<u8> {
        let mut bits = 0;
        for button in Button::ALL {
            if self.pins[button as usize].is_high().map_err(Error::gpio)? {
                bits |= button.mask();
            }
        }
        Ok(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_needs_low_previous() {
        assert!(rising_edge(0b0001, Button::Menu.mask(), false));
        assert!(!rising_edge(0b0001, Button::Menu.mask(), true));
        assert!(!rising_edge(0b0000, Button::Menu.mask(), false));
    }

    #[test]
    fn other_bits_do_not_leak() {
        assert!(!rising_edge(0b1110, Button::Menu.mask(), false));
        assert!(rising_edge(0b1000, Button::Mute.mask(), false));
    }

    #[test]
    fn held_button_fires_once() {
        let mut state = EdgeState::new();
        let first = state.update(Button::Plus.mask());
        let second = state.update(Button::Plus.mask());
        assert!(first.fired(Button::Plus));
        assert!(!second.fired(Button::Plus));
        assert!(!second.any());
    }

    #[test]
    fn release_rearms_the_edge() {
        let mut state = EdgeState::new();
        state.update(Button::Minus.mask());
        state.update(0);
        assert!(!state.previous(Button::Minus));
        assert!(state.update(Button::Minus.mask()).fired(Button::Minus));
    }

    #[test]
    fn simultaneous_presses_all_fire() {
        let mut state = EdgeState::new();
        let edges = state.update(0b1111);
        for b in Button::ALL {
            assert!(edges.fired(b), "{b:?}");
        }
    }
}
