//! Discrete audio outputs: effect relays, source relay, mute LED.
//!
//! All four lines are rewritten from the audio state on every iteration,
//! whatever menu is on screen.  Each line only ever touches its own pin.

use embedded_hal::digital::{OutputPin, PinState};

use crate::app::context::{AudioState, Effects};
use crate::error::{Error, Result};

pub struct AudioOutputs<O> {
    pub bass: O,
    pub dist: O,
    /// High selects the jack input, low the RCA input.
    pub source: O,
    pub mute_led: O,
    last: Option<AudioState>,
}

impl<O: OutputPin> AudioOutputs<O> {
    pub fn new(bass: O, dist: O, source: O, mute_led: O) -> Self {
        Self {
            bass,
            dist,
            source,
            mute_led,
            last: None,
        }
    }

    pub fn apply(&mut self, audio: &AudioState) -> Result<()> {
        let fx = audio.effects;
        self.bass
            .set_state(PinState::from(fx.contains(Effects::BASS)))
            .map_err(Error::gpio)?;
        self.dist
            .set_state(PinState::from(fx.contains(Effects::DIST)))
            .map_err(Error::gpio)?;
        self.source
            .set_state(PinState::from(audio.source_jack))
            .map_err(Error::gpio)?;
        self.mute_led
            .set_state(PinState::from(audio.mute))
            .map_err(Error::gpio)?;
        self.last = Some(*audio);
        Ok(())
    }

    /// State last driven onto the pins.
    pub fn current(&self) -> Option<AudioState> {
        self.last
    }
}
