//! Controller → board drivers → wires.
//!
//! Runs the real drivers over recording pins and checks what the display,
//! the pots and the discrete outputs actually receive.

use ampctl::app::events::AppEvent;
use ampctl::app::service::Controller;
use ampctl::config::AmpConfig;
use ampctl::drivers::button::Button;
use ampctl::drivers::lcd::{CMD_COMMAND, CMD_INIT, OP_CLEAR, OP_CURSOR_OFF};
use ampctl::menu::MenuState;

use crate::mock_hw::{DisplayModel, EventLog, PinId, Rig};

const MUTE_BITS: u16 = (1 << 6) | (1 << 14);

struct Bench {
    ctl: Controller,
    rig: Rig,
    log: EventLog,
    display: DisplayModel,
}

impl Bench {
    fn start() -> Self {
        let config = AmpConfig::default();
        let mut rig = Rig::new(&config);
        let mut ctl = Controller::new(config).unwrap();
        let mut log = EventLog::default();
        ctl.start(&mut rig.hw, &mut log).unwrap();

        let mut display = DisplayModel::new();
        display.feed(&rig.bus.lcd_bytes());
        rig.bus.clear();
        Self {
            ctl,
            rig,
            log,
            display,
        }
    }

    /// One iteration; display bytes are replayed onto the model.
    fn tick(&mut self) {
        self.ctl.tick(&mut self.rig.hw, &mut self.log).unwrap();
        self.display.feed(&self.rig.bus.take_lcd_bytes());
    }

    fn press(&mut self, button: Button) {
        self.rig.set_button(button as usize, true);
        self.tick();
        self.rig.set_button(button as usize, false);
        self.tick();
    }
}

#[test]
fn boot_sequence_on_the_wire() {
    let config = AmpConfig::default();
    let mut rig = Rig::new(&config);
    let mut ctl = Controller::new(config).unwrap();
    let mut log = EventLog::default();
    ctl.start(&mut rig.hw, &mut log).unwrap();

    let bytes = rig.bus.lcd_bytes();
    assert_eq!(
        &bytes[..7],
        &[CMD_INIT, CMD_COMMAND, OP_CLEAR, CMD_COMMAND, OP_CURSOR_OFF, CMD_COMMAND, OP_CLEAR]
    );

    let mut display = DisplayModel::new();
    display.feed(&bytes);
    assert_eq!(display.inits, 1);
    assert_eq!(display.row(0), "[Stereo]        ");
    assert_eq!(display.row(1), "Title: Unknown  ");
    assert_eq!(display.row(2), "Volume: 000%    ");
    assert_eq!(display.row(3), "Source: [RCA]   ");
    assert_eq!(log.events, vec![AppEvent::Started(MenuState::Stereo)]);
}

#[test]
fn stereo_volume_and_jack_source_end_to_end() {
    let mut bench = Bench::start();
    bench.rig.set_volume_raw(767);
    bench.press(Button::Plus);

    let left = bench.rig.bus.pot_frames(PinId::LeftClk, PinId::LeftRst);
    let right = bench.rig.bus.pot_frames(PinId::RightClk, PinId::RightRst);
    assert_eq!(left.len(), 2);
    assert_eq!(right.len(), 2);
    for frame in left.iter().chain(&right) {
        assert_eq!(frame & 0x3F, 15);
        assert_eq!((frame >> 8) & 0x3F, 15);
        assert_eq!(frame & MUTE_BITS, 0);
    }

    assert_eq!(&bench.display.row(2)[8..12], " 75%");
    assert_eq!(&bench.display.row(3)[8..14], "[Jack]");
    assert_eq!(bench.rig.bus.level(PinId::Source), Some(true));
    assert_eq!(bench.rig.bus.level(PinId::MuteLed), Some(false));
}

#[test]
fn mute_reaches_pots_led_and_display() {
    let mut bench = Bench::start();
    bench.rig.set_volume_raw(1023);
    bench.press(Button::Mute);

    let frames = bench.rig.bus.pot_frames(PinId::LeftClk, PinId::LeftRst);
    let last = *frames.last().unwrap();
    assert_eq!(last & MUTE_BITS, MUTE_BITS);
    assert_eq!(last & 0x3F, 0);
    assert_eq!(&bench.display.row(2)[8..12], "MUTE");
    assert_eq!(bench.rig.bus.level(PinId::MuteLed), Some(true));

    bench.press(Button::Mute);
    assert_eq!(&bench.display.row(2)[8..12], "100%");
}

#[test]
fn unchanged_fields_send_nothing() {
    let mut bench = Bench::start();
    bench.rig.set_volume_raw(500);
    bench.tick();
    bench.rig.bus.clear();

    bench.tick();
    assert!(bench.rig.bus.lcd_bytes().is_empty());
    // Pots and outputs are still driven.
    assert_eq!(bench.rig.bus.pot_frames(PinId::LeftClk, PinId::LeftRst).len(), 1);
    assert_eq!(bench.rig.bus.count(PinId::Bass), 1);
}

#[test]
fn title_line_shows_on_stereo() {
    let mut bench = Bench::start();
    bench.rig.send_title_line(b"cTitle:Daft Punk\n");
    bench.tick();
    assert_eq!(bench.display.row(1), "Title: Daft Punk");
    assert!(bench.rig.rx.borrow().is_empty());

    bench.rig.send_title_line(b"cVolume:30\n");
    bench.tick();
    assert_eq!(bench.display.row(1), "Title: Daft Punk");
}

#[test]
fn menu_cycle_redraws_each_screen() {
    let mut bench = Bench::start();

    bench.press(Button::Menu);
    assert_eq!(bench.ctl.menu(), MenuState::Effects);
    assert_eq!(bench.display.row(0), "[Effects]       ");
    assert_eq!(bench.display.row(1), "  Bass   Dist   ");

    bench.press(Button::Menu);
    assert_eq!(bench.display.row(0), "[Fan]           ");

    bench.press(Button::Menu);
    assert_eq!(bench.display.row(0), "G111   2022-2023");
    assert_eq!(bench.display.row(3), "  Mael   GADOU  ");

    bench.press(Button::Menu);
    assert_eq!(bench.ctl.menu(), MenuState::Stereo);
    assert_eq!(bench.display.row(0), "[Stereo]        ");
    // Two clears at boot, one per menu change.
    assert_eq!(bench.display.clears, 6);
}

#[test]
fn effects_toggles_drive_relays() {
    let mut bench = Bench::start();
    bench.press(Button::Menu);

    bench.press(Button::Plus);
    assert_eq!(bench.display.row(1), " [Bass]  Dist   ");
    assert_eq!(bench.rig.bus.level(PinId::Bass), Some(true));
    assert_eq!(bench.rig.bus.level(PinId::Dist), Some(false));

    bench.press(Button::Minus);
    assert_eq!(bench.display.row(1), " [Bass] [Dist]  ");
    assert_eq!(bench.rig.bus.level(PinId::Dist), Some(true));
    // Source is untouched while on the Effects screen.
    assert_eq!(bench.rig.bus.level(PinId::Source), Some(false));
}

#[test]
fn fan_screen_and_pwm() {
    let mut bench = Bench::start();
    bench.press(Button::Menu);
    bench.press(Button::Menu);

    // ≈30 °C, tach edge after 156 ticks of 128 µs (≈3004 RPM).
    bench.rig.set_temp_raw(614);
    bench.rig.timer.count.set(156);
    bench.rig.tach.set(true);
    bench.tick();

    assert_eq!(bench.display.row(1), "T: 30C RPM: 3004");
    assert_eq!(bench.rig.timer.resets.get(), 1);
    // Error is about -4; the clamp band lifts it to +125.
    assert_eq!(bench.rig.fan_duty.get(), Some(252));
    assert_eq!(bench.ctl.last_fan_command().unwrap().target_rpm, 3000);
}

#[test]
fn tach_overflow_falls_back_to_sixty_rpm() {
    let mut bench = Bench::start();
    bench.press(Button::Menu);
    bench.press(Button::Menu);

    bench.rig.timer.count.set(156);
    bench.rig.tach.set(true);
    bench.tick();
    assert_eq!(&bench.display.row(1)[12..], "3004");

    bench.rig.tach.set(false);
    bench.rig.timer.overflow.set(true);
    bench.tick();
    assert_eq!(&bench.display.row(1)[12..], "  60");
    assert_eq!(bench.rig.fan_duty.get(), Some(254));
}

#[test]
fn outputs_written_every_iteration() {
    let mut bench = Bench::start();
    for _ in 0..5 {
        bench.tick();
    }
    for pin in [PinId::Bass, PinId::Dist, PinId::Source, PinId::MuteLed] {
        assert_eq!(bench.rig.bus.count(pin), 5, "{pin:?}");
    }
    assert_eq!(bench.ctl.iterations(), 5);
}
