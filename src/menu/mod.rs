//! Front-panel menu: a four-state cyclic selector.
//!
//! ```text
//!  ┌────────┐ next ┌─────────┐ next ┌─────┐ next ┌────────┐
//!  │ Stereo │ ───▶ │ Effects │ ───▶ │ Fan │ ───▶ │ Credit │ ──┐
//!  └────────┘      └─────────┘      └─────┘      └────────┘   │
//!      ▲                                                      │
//!      └──────────────────────── next ────────────────────────┘
//! ```
//!
//! Every change of state must be followed by a full static redraw
//! ([`layout::render_static`]) before value fields are painted again.

pub mod layout;
pub mod screen;

use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum MenuState {
    #[default]
    Stereo = 0,
    Effects = 1,
    Fan = 2,
    Credit = 3,
}

impl MenuState {
    /// Size of the ordinal space.
    pub const COUNT: usize = 4;

    /// Ordinal → state, wrapping modulo [`COUNT`](Self::COUNT).
    pub fn from_index(idx: usize) -> Self {
        match idx % Self::COUNT {
            0 => Self::Stereo,
            1 => Self::Effects,
            2 => Self::Fan,
            _ => Self::Credit,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Stereo => "Stereo",
            Self::Effects => "Effects",
            Self::Fan => "Fan",
            Self::Credit => "Credit",
        }
    }
}

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

/// Current menu selection.  Lives for the whole program.
#[derive(Debug, Clone, Copy, Default)]
pub struct Menu {
    current: MenuState,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> MenuState {
        self.current
    }

    /// Select the next menu.  The caller redraws.
    pub fn next(&mut self) -> MenuState {
        self.select(MenuState::from_index(self.current.index() + 1))
    }

    /// Select the previous menu.  The caller redraws.
    pub fn prev(&mut self) -> MenuState {
        self.select(MenuState::from_index(
            self.current.index() + MenuState::COUNT - 1,
        ))
    }

    /// Jump to `index` (modulo the menu count).  The caller redraws.
    pub fn set(&mut self, index: usize) -> MenuState {
        self.select(MenuState::from_index(index))
    }

    fn select(&mut self, next: MenuState) -> MenuState {
        if next != self.current {
            info!("menu: {} -> {}", self.current.name(), next.name());
        }
        self.current = next;
        next
    }
}
