//! Mock hardware for integration tests.
//!
//! Every output pin writes into one shared, ordered [`Bus`] log so tests
//! can decode what actually went over the wires: the bit-banged display
//! bytes, the potentiometer frames and the discrete output levels.
//! Inputs, the ADC, the tach timer and the title receiver are driven from
//! shared cells the test holds on to.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use ampctl::adapters::hardware::AmpHardware;
use ampctl::app::events::AppEvent;
use ampctl::app::ports::{AdcRegisters, EventSink, FanPwm, TachTimer, TitleChannel};
use ampctl::config::AmpConfig;
use ampctl::drivers::button::ButtonBank;
use ampctl::drivers::digipot::{DigiPot, PotChannel};
use ampctl::drivers::lcd::{
    ASCII_END, CMD_ASCII, CMD_COMMAND, CMD_GOTO, CMD_INIT, LCD_COLS, LCD_ROWS, Lcd, LcdSettle,
    OP_CLEAR,
};
use ampctl::drivers::outputs::AudioOutputs;
use ampctl::drivers::serial::{BitBangSerial, BitTiming};
use ampctl::sensors::AnalogSampler;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

// ── Pin bus ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinId {
    LcdTx,
    PotData,
    LeftClk,
    LeftRst,
    RightClk,
    RightRst,
    Bass,
    Dist,
    Source,
    MuteLed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinWrite {
    pub pin: PinId,
    pub high: bool,
}

#[derive(Clone, Default)]
pub struct Bus(Rc<RefCell<Vec<PinWrite>>>, Rc<Cell<usize>>);

impl Bus {
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
        self.1.set(0);
    }

    /// Display bytes not yet returned by a previous call.
    pub fn take_lcd_bytes(&self) -> Vec<u8> {
        let bytes = self.lcd_bytes();
        let seen = self.1.replace(bytes.len());
        bytes[seen.min(bytes.len())..].to_vec()
    }

    pub fn writes(&self) -> Vec<PinWrite> {
        self.0.borrow().clone()
    }

    /// Last level written to `pin`, if any.
    pub fn level(&self, pin: PinId) -> Option<bool> {
        self.0.borrow().iter().rev().find(|w| w.pin == pin).map(|w| w.high)
    }

    pub fn count(&self, pin: PinId) -> usize {
        self.0.borrow().iter().filter(|w| w.pin == pin).count()
    }

    /// Bytes sent on the display line since the last clear.
    ///
    /// Each byte is exactly ten writes: start (low), eight data bits LSB
    /// first, stop (high).  A lone idle-high write from construction is
    /// skipped.
    pub fn lcd_bytes(&self) -> Vec<u8> {
        let levels: Vec<bool> = self
            .0
            .borrow()
            .iter()
            .filter(|w| w.pin == PinId::LcdTx)
            .map(|w| w.high)
            .collect();
        let start = levels.iter().position(|&high| !high).unwrap_or(levels.len());
        levels[start..]
            .chunks(10)
            .filter(|frame| frame.len() == 10)
            .map(|frame| {
                assert!(!frame[0], "start bit must be low");
                assert!(frame[9], "stop bit must be high");
                frame[1..9]
                    .iter()
                    .enumerate()
                    .fold(0u8, |byte, (i, &high)| byte | (u8::from(high) << i))
            })
            .collect()
    }

    /// Frames clocked into one pot channel since the last clear.
    pub fn pot_frames(&self, clk: PinId, rst: PinId) -> Vec<u16> {
        let mut frames = Vec::new();
        let mut data = false;
        let mut in_frame = false;
        let mut bits: Vec<bool> = Vec::new();

        for w in self.0.borrow().iter() {
            match w.pin {
                PinId::PotData => data = w.high,
                p if p == rst => {
                    if w.high {
                        in_frame = true;
                        bits.clear();
                    } else if in_frame {
                        in_frame = false;
                        assert_eq!(bits.len(), 16, "pot frame must be 16 clocks");
                        let word = bits
                            .iter()
                            .enumerate()
                            .fold(0u16, |word, (i, &b)| word | (u16::from(b) << i));
                        frames.push(word);
                    }
                }
                p if p == clk && w.high && in_frame => bits.push(data),
                _ => {}
            }
        }
        frames
    }
}

pub struct MockPin {
    id: PinId,
    bus: Bus,
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.bus.0.borrow_mut().push(PinWrite {
            pin: self.id,
            high: false,
        });
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.bus.0.borrow_mut().push(PinWrite {
            pin: self.id,
            high: true,
        });
        Ok(())
    }
}

/// Input whose level the test sets through a shared cell.
pub struct MockInput(Rc<Cell<bool>>);

impl ErrorType for MockInput {
    type Error = Infallible;
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.get())
    }
}

// ── Delays ────────────────────────────────────────────────────

/// Returns immediately; waveform checks only look at pin order.
#[derive(Clone, Default)]
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

// ── Peripherals ───────────────────────────────────────────────

/// ADC returning a per-channel value set by the test.
pub struct ScriptedAdc {
    values: Rc<RefCell<[u16; 2]>>,
    mux: u8,
    complete: bool,
}

impl AdcRegisters for ScriptedAdc {
    fn is_enabled(&self) -> bool {
        true
    }
    fn clear_complete(&mut self) {
        self.complete = false;
    }
    fn select_channel(&mut self, mux: u8) {
        self.mux = mux;
    }
    fn start_conversion(&mut self) {
        self.complete = true;
    }
    fn conversion_complete(&self) -> bool {
        self.complete
    }
    fn data(&self) -> u16 {
        self.values.borrow().get(usize::from(self.mux)).copied().unwrap_or(0)
    }
}

#[derive(Clone, Default)]
pub struct TimerHandle {
    pub count: Rc<Cell<u16>>,
    pub overflow: Rc<Cell<bool>>,
    pub resets: Rc<Cell<u32>>,
}

pub struct FakeTimer(TimerHandle);

impl TachTimer for FakeTimer {
    fn count(&self) -> u16 {
        self.0.count.get()
    }
    fn reset_count(&mut self) {
        self.0.count.set(0);
        self.0.resets.set(self.0.resets.get() + 1);
    }
    fn take_overflow(&mut self) -> bool {
        self.0.overflow.replace(false)
    }
}

pub struct FanSpy(Rc<Cell<Option<u8>>>);

impl FanPwm for FanSpy {
    fn set_duty(&mut self, duty: u8) {
        self.0.set(Some(duty));
    }
}

pub struct ScriptedRx(Rc<RefCell<VecDeque<u8>>>);

impl TitleChannel for ScriptedRx {
    fn byte_available(&mut self) -> bool {
        !self.0.borrow().is_empty()
    }
    fn read_byte(&mut self) -> u8 {
        self.0.borrow_mut().pop_front().unwrap_or(b'\n')
    }
}

// ── Event log ─────────────────────────────────────────────────

#[derive(Default)]
pub struct EventLog {
    pub events: Vec<AppEvent>,
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Rig ───────────────────────────────────────────────────────

pub type MockBoard = AmpHardware<
    Lcd<BitBangSerial<MockPin, NoDelay>, NoDelay>,
    MockPin,
    MockInput,
    NoDelay,
    ScriptedAdc,
    FakeTimer,
    FanSpy,
    ScriptedRx,
>;

/// A full board built from mocks plus the handles that drive it.
pub struct Rig {
    pub hw: MockBoard,
    pub bus: Bus,
    pub buttons: [Rc<Cell<bool>>; 4],
    pub tach: Rc<Cell<bool>>,
    pub analog: Rc<RefCell<[u16; 2]>>,
    pub timer: TimerHandle,
    pub fan_duty: Rc<Cell<Option<u8>>>,
    pub rx: Rc<RefCell<VecDeque<u8>>>,
}

impl Rig {
    pub fn new(config: &AmpConfig) -> Self {
        let bus = Bus::default();
        let pin = |id| MockPin {
            id,
            bus: bus.clone(),
        };

        let buttons: [Rc<Cell<bool>>; 4] = Default::default();
        let tach = Rc::new(Cell::new(false));
        let analog = Rc::new(RefCell::new([0u16; 2]));
        let timer = TimerHandle::default();
        let fan_duty = Rc::new(Cell::new(None));
        let rx = Rc::new(RefCell::new(VecDeque::new()));

        let link = BitBangSerial::new(pin(PinId::LcdTx), NoDelay, BitTiming::for_display(config))
            .expect("mock pins never fail");

        let hw = AmpHardware {
            display: Lcd::new(link, NoDelay, LcdSettle::from_config(config)),
            pot: DigiPot::new(pin(PinId::PotData), NoDelay, config.pot_clock_half_period_us),
            left: PotChannel::new(pin(PinId::LeftClk), pin(PinId::LeftRst)),
            right: PotChannel::new(pin(PinId::RightClk), pin(PinId::RightRst)),
            adc: AnalogSampler::new(ScriptedAdc {
                values: analog.clone(),
                mux: 0,
                complete: false,
            }),
            buttons: ButtonBank::new(buttons.clone().map(MockInput)),
            tach: MockInput(tach.clone()),
            timer: FakeTimer(timer.clone()),
            fan: FanSpy(fan_duty.clone()),
            outputs: AudioOutputs::new(
                pin(PinId::Bass),
                pin(PinId::Dist),
                pin(PinId::Source),
                pin(PinId::MuteLed),
            ),
            title_rx: ScriptedRx(rx.clone()),
        };

        Self {
            hw,
            bus,
            buttons,
            tach,
            analog,
            timer,
            fan_duty,
            rx,
        }
    }

    pub fn set_button(&self, index: usize, high: bool) {
        self.buttons[index].set(high);
    }

    pub fn set_volume_raw(&self, raw: u16) {
        self.analog.borrow_mut()[0] = raw;
    }

    pub fn set_temp_raw(&self, raw: u16) {
        self.analog.borrow_mut()[1] = raw;
    }

    pub fn send_title_line(&self, line: &[u8]) {
        self.rx.borrow_mut().extend(line.iter().copied());
    }
}

// ── Display model ─────────────────────────────────────────────

/// Replays display command bytes onto a 4×16 character grid.
pub struct DisplayModel {
    cells: [[u8; LCD_COLS]; LCD_ROWS],
    x: usize,
    y: usize,
    pub inits: usize,
    pub clears: usize,
}

impl DisplayModel {
    pub fn new() -> Self {
        Self {
            cells: [[b' '; LCD_COLS]; LCD_ROWS],
            x: 0,
            y: 0,
            inits: 0,
            clears: 0,
        }
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        let mut it = bytes.iter().copied();
        while let Some(cmd) = it.next() {
            match cmd {
                CMD_INIT => self.inits += 1,
                CMD_GOTO => {
                    self.x = usize::from(it.next().expect("goto x"));
                    self.y = usize::from(it.next().expect("goto y"));
                }
                CMD_COMMAND => {
                    if it.next() == Some(OP_CLEAR) {
                        self.cells = [[b' '; LCD_COLS]; LCD_ROWS];
                        self.x = 0;
                        self.y = 0;
                        self.clears += 1;
                    }
                }
                CMD_ASCII => {
                    for b in it.by_ref() {
                        if b == ASCII_END {
                            break;
                        }
                        assert!(self.x < LCD_COLS && self.y < LCD_ROWS, "write off screen");
                        self.cells[self.y][self.x] = b;
                        self.x += 1;
                    }
                }
                other => panic!("unexpected display byte {other:#04x}"),
            }
        }
    }

    pub fn row(&self, y: usize) -> String {
        String::from_utf8_lossy(&self.cells[y]).into_owned()
    }
}
