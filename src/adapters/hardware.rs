//! Hardware adapter — bridges the board drivers to the domain port traits.
//!
//! Owns every driver and exposes them through [`SensorPort`],
//! [`ActuatorPort`], [`TextDisplay`], [`TitleChannel`] and [`TachTimer`],
//! i.e. the whole [`Board`](crate::app::ports::Board) bundle.  It is generic
//! over the pin, delay and peripheral types so the same adapter runs on the
//! ESP32 and against host mocks.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::context::AudioState;
use crate::app::ports::{
    ActuatorPort, AdcRegisters, FanPwm, SensorPort, TachTimer, TextDisplay, TitleChannel,
};
use crate::drivers::button::ButtonBank;
use crate::drivers::digipot::{DigiPot, PotChannel};
use crate::drivers::outputs::AudioOutputs;
use crate::error::{Error, Result};
use crate::sensors::AnalogSampler;

/// Concrete adapter that combines all hardware behind port traits.
///
/// | Field      | Role                                   |
/// |------------|----------------------------------------|
/// | `display`  | 4×16 character display                 |
/// | `pot`      | shared pot data line + clock timing    |
/// | `left`     | left channel pot clock / reset         |
/// | `right`    | right channel pot clock / reset        |
/// | `adc`      | volume knob and temperature sensor     |
/// | `buttons`  | menu, minus, plus, mute                |
/// | `tach`     | fan tachometer input                   |
/// | `timer`    | tach period counter                    |
/// | `fan`      | fan PWM output                         |
/// | `outputs`  | effects, source relay, mute LED        |
/// | `title_rx` | "now playing" receive channel          |
pub struct AmpHardware<X, O, I, D, A, T, F, U> {
    pub display: X,
    pub pot: DigiPot<O, D>,
    pub left: PotChannel<O, O>,
    pub right: PotChannel<O, O>,
    pub adc: AnalogSampler<A>,
    pub buttons: ButtonBank<I>,
    pub tach: I,
    pub timer: T,
    pub fan: F,
    pub outputs: AudioOutputs<O>,
    pub title_rx: U,
}

// ── SensorPort implementation ─────────────────────────────────

impl<X, O, I, D, A, T, F, U> SensorPort for AmpHardware<X, O, I, D, A, T, F, U>
where
    I: InputPin,
    A: AdcRegisters,
{
    fn buttons(&mut self) -> Result<u8> {
        self.buttons.snapshot()
    }

    fn read_analog(&mut self, channel: u8) -> u16 {
        self.adc.read_channel(channel)
    }

    fn tach_level(&mut self) -> Result<bool> {
        self.tach.is_high().map_err(Error::gpio)
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<X, O, I, D, A, T, F, U> ActuatorPort for AmpHardware<X, O, I, D, A, T, F, U>
where
    O: OutputPin,
    D: DelayNs,
    F: FanPwm,
{
    fn write_volume(&mut self, volume: u8, mute: bool) -> Result<()> {
        self.pot.set_volume(&mut self.left, volume, mute)?;
        self.pot.set_volume(&mut self.right, volume, mute)
    }

    fn apply_audio(&mut self, audio: &AudioState) -> Result<()> {
        self.outputs.apply(audio)
    }

    fn set_fan_duty(&mut self, duty: u8) {
        self.fan.set_duty(duty);
    }
}

// ── Pass-through ports ────────────────────────────────────────

impl<X, O, I, D, A, T, F, U> TextDisplay for AmpHardware<X, O, I, D, A, T, F, U>
where
    X: TextDisplay,
{
    fn init(&mut self) -> Result<()> {
        self.display.init()
    }

    fn clear(&mut self) -> Result<()> {
        self.display.clear()
    }

    fn goto(&mut self, x: u8, y: u8) -> Result<()> {
        self.display.goto(x, y)
    }

    fn print(&mut self, text: &[u8]) -> Result<()> {
        self.display.print(text)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        self.display.set_cursor_visible(visible)
    }
}

impl<X, O, I, D, A, T, F, U> TitleChannel for AmpHardware<X, O, I, D, A, T, F, U>
where
    U: TitleChannel,
{
    fn byte_available(&mut self) -> bool {
        self.title_rx.byte_available()
    }

    fn read_byte(&mut self) -> u8 {
        self.title_rx.read_byte()
    }
}

impl<X, O, I, D, A, T, F, U> TachTimer for AmpHardware<X, O, I, D, A, T, F, U>
where
    T: TachTimer,
{
    fn count(&self) -> u16 {
        self.timer.count()
    }

    fn reset_count(&mut self) {
        self.timer.reset_count();
    }

    fn take_overflow(&mut self) -> bool {
        self.timer.take_overflow()
    }
}
