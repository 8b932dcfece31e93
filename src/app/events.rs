//! Outbound application events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::menu::MenuState;
use crate::title::TitleBuffer;

use super::context::AudioState;

/// Structured events emitted by the control core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The controller has started (carries the initial menu).
    Started(MenuState),

    /// The menu button moved the selection.
    MenuChanged { from: MenuState, to: MenuState },

    /// A button changed the source, an effect or the mute flag.
    AudioChanged(AudioState),

    /// A new "now playing" title arrived.
    TitleReceived(TitleBuffer),
}
