//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events through the
//! `log` facade (ESP-IDF logger on the device, whatever the host installs
//! in tests).

use log::{debug, info};

use crate::app::context::Effects;
use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events logged so far.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        self.emitted = self.emitted.wrapping_add(1);
        match event {
            AppEvent::Started(menu) => {
                info!("START | menu={}", menu.name());
            }
            AppEvent::MenuChanged { from, to } => {
                info!("MENU  | {} -> {}", from.name(), to.name());
            }
            AppEvent::AudioChanged(a) => {
                info!(
                    "AUDIO | source={} bass={} dist={} mute={}",
                    if a.source_jack { "jack" } else { "rca" },
                    a.effects.contains(Effects::BASS),
                    a.effects.contains(Effects::DIST),
                    a.mute,
                );
            }
            AppEvent::TitleReceived(title) => match core::str::from_utf8(title) {
                Ok(text) => debug!("TITLE | {:?}", text),
                Err(_) => debug!("TITLE | {} non-utf8 bytes", title.len()),
            },
        }
    }
}
