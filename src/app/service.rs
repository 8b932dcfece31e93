//! Application service — the control loop.
//!
//! [`Controller`] owns the device context and the pure-logic helpers.  The
//! board is passed in on every call through the [`Board`] port bundle, so
//! the whole loop runs on the host against mock adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌───────────────────────────┐ ──▶ EventSink
//!   TitleChannel ─▶│        Controller         │
//!   TachTimer ───▶ │ edges · menu · fan · pots │
//! ActuatorPort ◀── │                           │ ──▶ TextDisplay
//!                  └───────────────────────────┘
//! ```
//!
//! One iteration, in order:
//!
//! 1. title receive poll
//! 2. button edges → menu / audio state
//! 3. volume knob → both pots (+ Stereo fields)
//! 4. tach + temperature → fan duty (+ Fan fields)
//! 5. discrete outputs from the audio state

use log::{debug, info};

use crate::config::AmpConfig;
use crate::control::fan::{FanCommand, FanRegulator};
use crate::drivers::button::Button;
use crate::error::Result;
use crate::menu::MenuState;
use crate::menu::layout::{DynamicData, render_dynamic, render_static};
use crate::pins::{TEMP_ADC_CHANNEL, VOLUME_ADC_CHANNEL};
use crate::sensors::TemperatureSensor;
use crate::sensors::volume::volume_percent;
use crate::title::LineReader;

use super::context::{DeviceContext, Effects};
use super::events::AppEvent;
use super::ports::{Board, EventSink};

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

pub struct Controller {
    config: AmpConfig,
    ctx: DeviceContext,
    reader: LineReader,
    regulator: FanRegulator,
    thermometer: TemperatureSensor,
    last_fan: Option<FanCommand>,
}

impl Controller {
    /// Build the controller from a validated configuration.
    ///
    /// Does **not** touch the board — call [`start`](Self::start) next.
    pub fn new(config: AmpConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reader: LineReader::new(config.title_rx_max),
            regulator: FanRegulator::new(&config),
            thermometer: TemperatureSensor::from_config(&config),
            ctx: DeviceContext::new(),
            last_fan: None,
            config,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Boot the display and paint the initial menu.
    pub fn start(&mut self, hw: &mut impl Board, sink: &mut impl EventSink) -> Result<()> {
        hw.init()?;
        hw.set_cursor_visible(false)?;

        let menu = self.ctx.menu.set(MenuState::Stereo.index());
        render_static(menu, &mut self.ctx.screen, hw)?;

        sink.emit(&AppEvent::Started(menu));
        info!("controller started in {}", menu.name());
        Ok(())
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one full pass of the control loop.
    ///
    /// An error aborts the rest of this pass; state already updated in
    /// this pass is kept and the next call starts a fresh pass.
    pub fn tick(&mut self, hw: &mut impl Board, sink: &mut impl EventSink) -> Result<()> {
        self.poll_title(hw, sink);
        self.handle_buttons(hw, sink)?;
        self.update_volume(hw)?;
        self.update_fan(hw)?;
        hw.apply_audio(&self.ctx.audio)?;

        self.ctx.iterations += 1;
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn context(&self) -> &DeviceContext {
        &self.ctx
    }

    pub fn config(&self) -> &AmpConfig {
        &self.config
    }

    pub fn menu(&self) -> MenuState {
        self.ctx.menu.get()
    }

    /// Last regulator evaluation, `None` before the first iteration.
    pub fn last_fan_command(&self) -> Option<FanCommand> {
        self.last_fan
    }

    pub fn iterations(&self) -> u64 {
        self.ctx.iterations
    }

    // ── Stages ────────────────────────────────────────────────

    fn poll_title(&mut self, hw: &mut impl Board, sink: &mut impl EventSink) {
        if let Some(title) = self.reader.poll_title(hw) {
            debug!("title: {} bytes", title.len());
            self.ctx.title = title.clone();
            sink.emit(&AppEvent::TitleReceived(title));
        }
    }

    fn handle_buttons(&mut self, hw: &mut impl Board, sink: &mut impl EventSink) -> Result<()> {
        let snapshot = hw.buttons()?;
        let edges = self.ctx.edges.update(snapshot);
        if !edges.any() {
            return Ok(());
        }
        let before = self.ctx.audio;

        if edges.fired(Button::Menu) {
            let from = self.ctx.menu.get();
            let to = self.ctx.menu.next();
            render_static(to, &mut self.ctx.screen, hw)?;
            if to == MenuState::Effects {
                self.paint(hw, &DynamicData::Effects(self.ctx.audio.effects))?;
            }
            sink.emit(&AppEvent::MenuChanged { from, to });
        }

        let menu = self.ctx.menu.get();
        for (button, effect) in [(Button::Minus, Effects::DIST), (Button::Plus, Effects::BASS)] {
            if !edges.fired(button) {
                continue;
            }
            match menu {
                MenuState::Stereo => {
                    self.ctx.audio.source_jack = !self.ctx.audio.source_jack;
                    let data = DynamicData::StereoSource {
                        source_jack: self.ctx.audio.source_jack,
                    };
                    self.paint(hw, &data)?;
                }
                MenuState::Effects => {
                    self.ctx.audio.effects.toggle(effect);
                    self.paint(hw, &DynamicData::Effects(self.ctx.audio.effects))?;
                }
                MenuState::Fan | MenuState::Credit => {}
            }
        }

        if edges.fired(Button::Mute) {
            self.ctx.audio.mute = !self.ctx.audio.mute;
        }

        if self.ctx.audio != before {
            debug!(
                "audio: source={} fx=0b{:02b} mute={}",
                if self.ctx.audio.source_jack { "jack" } else { "rca" },
                self.ctx.audio.effects.bits(),
                self.ctx.audio.mute,
            );
            sink.emit(&AppEvent::AudioChanged(self.ctx.audio));
        }
        Ok(())
    }

    fn update_volume(&mut self, hw: &mut impl Board) -> Result<()> {
        let raw = hw.read_analog(VOLUME_ADC_CHANNEL);
        self.ctx.volume = volume_percent(raw);
        hw.write_volume(self.ctx.volume, self.ctx.audio.mute)?;

        let data = DynamicData::Stereo {
            title: &self.ctx.title,
            volume: self.ctx.volume,
            mute: self.ctx.audio.mute,
            source_jack: self.ctx.audio.source_jack,
        };
        render_dynamic(self.ctx.menu.get(), &data, &mut self.ctx.screen, hw)
    }

    fn update_fan(&mut self, hw: &mut impl Board) -> Result<()> {
        let level = hw.tach_level()?;
        self.ctx.fan.sample(hw, level, self.config.tach_tick_secs);

        let raw = hw.read_analog(TEMP_ADC_CHANNEL);
        self.ctx.temperature_c = self.thermometer.celsius(raw);

        let data = DynamicData::Fan {
            temp_c: self.ctx.temperature_c,
            period_secs: self.ctx.fan.period_secs,
        };
        render_dynamic(self.ctx.menu.get(), &data, &mut self.ctx.screen, hw)?;

        let cmd = self.regulator.update(self.ctx.temperature_c, self.ctx.fan.period_secs);
        hw.set_fan_duty(cmd.duty);
        self.last_fan = Some(cmd);
        Ok(())
    }

    fn paint(&mut self, hw: &mut impl Board, data: &DynamicData<'_>) -> Result<()> {
        render_dynamic(self.ctx.menu.get(), data, &mut self.ctx.screen, hw)
    }
}
