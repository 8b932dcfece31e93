//! Per-menu screen layouts and value fields.
//!
//! Static layouts (4 × 16 columns):
//!
//! ```text
//!  Stereo            Effects           Fan               Credit
//!  ┌────────────────┐┌────────────────┐┌────────────────┐┌────────────────┐
//!  │[Stereo]        ││[Effects]       ││[Fan]           ││G111   2022-2023│
//!  │Title: Unknown  ││ [Bass]  Dist   ││T: 42C RPM: 3000││Git: Angers-SAE2│
//!  │Volume: 000%    ││                ││                ││ Arthur  DUPONT │
//!  │Source: [RCA]   ││                ││                ││  Mael   GADOU  │
//!  └────────────────┘└────────────────┘└────────────────┘└────────────────┘
//! ```
//!
//! Value fields are painted over the layout at fixed positions.  A field
//! update for a menu that is not on screen is dropped.

use core::fmt::Write;

use heapless::{String, Vec};

use super::MenuState;
use super::screen::Screen;
use crate::app::context::Effects;
use crate::app::ports::TextDisplay;
use crate::drivers::lcd::{LCD_COLS, LCD_ROWS};
use crate::error::Result;
use crate::sensors::tach::rpm_from_period;

type Layout = [&'static [u8]; LCD_ROWS];

const STEREO: Layout = [b"[Stereo]", b"Title: Unknown  ", b"Volume: 000%", b"Source: [RCA]"];
const EFFECTS: Layout = [b"[Effects]", b"", b"", b""];
const FAN: Layout = [b"[Fan]", b"T:   C RPM:     ", b"", b""];
const CREDIT: Layout = [
    b"G111   2022-2023",
    b"Git: Angers-SAE2",
    b" Arthur  DUPONT ",
    b"  Mael   GADOU  ",
];

// Field positions (column, row).
pub const TITLE_POS: (usize, usize) = (7, 1);
pub const TITLE_WIDTH: usize = LCD_COLS - TITLE_POS.0;
pub const VOLUME_POS: (usize, usize) = (8, 2);
pub const SOURCE_POS: (usize, usize) = (8, 3);
pub const EFFECTS_POS: (usize, usize) = (0, 1);
pub const TEMP_POS: (usize, usize) = (3, 1);
pub const RPM_POS: (usize, usize) = (12, 1);

const UNKNOWN_TITLE: &[u8] = b"Unknown";

pub fn static_layout(menu: MenuState) -> &'static Layout {
    match menu {
        MenuState::Stereo => &STEREO,
        MenuState::Effects => &EFFECTS,
        MenuState::Fan => &FAN,
        MenuState::Credit => &CREDIT,
    }
}

// ---------------------------------------------------------------------------
// Field text
// ---------------------------------------------------------------------------

/// Title padded (or cut) to the field width; empty shows "Unknown".
pub fn title_field(title: &[u8]) -> Vec<u8, TITLE_WIDTH> {
    let text = if title.is_empty() { UNKNOWN_TITLE } else { title };
    let mut field = Vec::new();
    for i in 0..TITLE_WIDTH {
        // Cannot fail: exactly TITLE_WIDTH pushes.
        let _ = field.push(text.get(i).copied().unwrap_or(b' '));
    }
    field
}

/// `"NNN%"` right-aligned, or `"MUTE"`.
pub fn volume_field(volume: u8, mute: bool) -> String<4> {
    let mut s = String::new();
    if mute {
        let _ = s.push_str("MUTE");
    } else {
        let _ = write!(s, "{:>3}%", volume.min(100));
    }
    s
}

pub fn source_field(jack: bool) -> &'static str {
    if jack { "[Jack]" } else { "[RCA ]" }
}

/// Both effect labels, bracketed when enabled.
pub fn effects_field(fx: Effects) -> String<14> {
    let mut s = String::new();
    let _ = s.push_str(if fx.contains(Effects::BASS) { " [Bass]" } else { "  Bass " });
    let _ = s.push_str(if fx.contains(Effects::DIST) { " [Dist]" } else { "  Dist " });
    s
}

/// `"NNC"`, clamped to two digits.
pub fn temp_field(temp_c: u16) -> String<3> {
    let mut s = String::new();
    let _ = write!(s, "{:>2}C", temp_c.min(99));
    s
}

/// Four-digit right-aligned RPM for a tach period.
pub fn rpm_field(period_secs: f32) -> String<4> {
    let rpm = rpm_from_period(period_secs).clamp(0.0, 9999.0) as u16;
    let mut s = String::new();
    let _ = write!(s, "{:>4}", rpm);
    s
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Values for one menu's dynamic fields.
#[derive(Debug, Clone, Copy)]
pub enum DynamicData<'a> {
    Stereo {
        title: &'a [u8],
        volume: u8,
        mute: bool,
        source_jack: bool,
    },
    /// Only the source tag (button toggles between volume passes).
    StereoSource { source_jack: bool },
    Effects(Effects),
    Fan { temp_c: u16, period_secs: f32 },
}

impl DynamicData<'_> {
    pub fn menu(&self) -> MenuState {
        match self {
            Self::Stereo { .. } | Self::StereoSource { .. } => MenuState::Stereo,
            Self::Effects(_) => MenuState::Effects,
            Self::Fan { .. } => MenuState::Fan,
        }
    }
}

/// Full static redraw for `menu`.
pub fn render_static(menu: MenuState, screen: &mut Screen, lcd: &mut impl TextDisplay) -> Result<()> {
    screen.redraw(lcd, static_layout(menu))
}

/// Paint value fields for `shown`.  Data for another menu is ignored.
pub fn render_dynamic(
    shown: MenuState,
    data: &DynamicData<'_>,
    screen: &mut Screen,
    lcd: &mut impl TextDisplay,
) -> Result<()> {
    if data.menu() != shown {
        return Ok(());
    }

    match *data {
        DynamicData::Stereo {
            title,
            volume,
            mute,
            source_jack,
        } => {
            screen.write_field(lcd, TITLE_POS.0, TITLE_POS.1, &title_field(title))?;
            screen.write_field(lcd, VOLUME_POS.0, VOLUME_POS.1, volume_field(volume, mute).as_bytes())?;
            screen.write_field(lcd, SOURCE_POS.0, SOURCE_POS.1, source_field(source_jack).as_bytes())?;
        }
        DynamicData::StereoSource { source_jack } => {
            screen.write_field(lcd, SOURCE_POS.0, SOURCE_POS.1, source_field(source_jack).as_bytes())?;
        }
        DynamicData::Effects(fx) => {
            screen.write_field(lcd, EFFECTS_POS.0, EFFECTS_POS.1, effects_field(fx).as_bytes())?;
        }
        DynamicData::Fan { temp_c, period_secs } => {
            screen.write_field(lcd, TEMP_POS.0, TEMP_POS.1, temp_field(temp_c).as_bytes())?;
            screen.write_field(lcd, RPM_POS.0, RPM_POS.1, rpm_field(period_secs).as_bytes())?;
        }
    }
    Ok(())
}
