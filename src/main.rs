//! Amplifier front panel firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  AmpHardware (Sensor+Actuator+Display)   LogEventSink        │
//! │  GpioOut/GpioIn · OneshotAdc · LedcFan · UartRx · ClockTach  │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │              Controller (pure logic)                   │  │
//! │  │  edges · menu · pots · fan regulator                   │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use esp_idf_hal::delay::{Ets, FreeRtos};
use log::{info, warn};

use ampctl::adapters::board::{GpioIn, GpioOut, LedcFan, OneshotAdc, UartRx};
use ampctl::adapters::hardware::AmpHardware;
use ampctl::adapters::log_sink::LogEventSink;
use ampctl::adapters::time::ClockTachTimer;
use ampctl::app::service::Controller;
use ampctl::config::AmpConfig;
use ampctl::drivers::button::ButtonBank;
use ampctl::drivers::digipot::{DigiPot, PotChannel};
use ampctl::drivers::hw_init::{self, LEDC_CH_FAN};
use ampctl::drivers::lcd::{Lcd, LcdSettle};
use ampctl::drivers::outputs::AudioOutputs;
use ampctl::pins;
use ampctl::sensors::AnalogSampler;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("ampctl v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration + peripherals ────────────────────────
    let config = AmpConfig::default();
    config.validate()?;
    hw_init::init_peripherals(config.lcd_baud)?;

    // ── 3. Drivers ────────────────────────────────────────────
    #[cfg(not(feature = "lcd-uart"))]
    let link = ampctl::drivers::serial::BitBangSerial::new(
        GpioOut(pins::LCD_TX_GPIO),
        Ets,
        ampctl::drivers::serial::BitTiming::for_display(&config),
    )?;
    #[cfg(feature = "lcd-uart")]
    let link = ampctl::adapters::board::UartTx(pins::LCD_UART_NUM);

    let mut hw = AmpHardware {
        display: Lcd::new(link, Ets, LcdSettle::from_config(&config)),
        pot: DigiPot::new(GpioOut(pins::POT_DATA_GPIO), Ets, config.pot_clock_half_period_us),
        left: PotChannel::new(GpioOut(pins::POT_LEFT_CLK_GPIO), GpioOut(pins::POT_LEFT_RST_GPIO)),
        right: PotChannel::new(GpioOut(pins::POT_RIGHT_CLK_GPIO), GpioOut(pins::POT_RIGHT_RST_GPIO)),
        adc: AnalogSampler::new(OneshotAdc::new()),
        buttons: ButtonBank::new([
            GpioIn(pins::BTN_MENU_GPIO),
            GpioIn(pins::BTN_MINUS_GPIO),
            GpioIn(pins::BTN_PLUS_GPIO),
            GpioIn(pins::BTN_MUTE_GPIO),
        ]),
        tach: GpioIn(pins::FAN_TACH_GPIO),
        timer: ClockTachTimer::new(config.tach_tick_secs),
        fan: LedcFan::new(LEDC_CH_FAN),
        outputs: AudioOutputs::new(
            GpioOut(pins::FX_BASS_GPIO),
            GpioOut(pins::FX_DIST_GPIO),
            GpioOut(pins::SOURCE_RELAY_GPIO),
            GpioOut(pins::MUTE_LED_GPIO),
        ),
        title_rx: UartRx(pins::TITLE_UART_NUM),
    };
    let mut log_sink = LogEventSink::new();

    // ── 4. Controller ─────────────────────────────────────────
    let mut controller = Controller::new(config)?;
    controller.start(&mut hw, &mut log_sink)?;
    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        if let Err(e) = controller.tick(&mut hw, &mut log_sink) {
            warn!("iteration {} aborted: {}", controller.iterations(), e);
        }
        // Let the idle task feed the task watchdog.
        FreeRtos::delay_ms(1);
    }
}
