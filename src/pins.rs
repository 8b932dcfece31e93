//! GPIO / peripheral pin assignments for the amplifier front-panel board.
//!
//! Single source of truth — the ESP-IDF adapters reference this module
//! rather than hard-coding pin numbers.  The control core itself never sees
//! a pin number; it only holds embedded-hal pin handles.

// ---------------------------------------------------------------------------
// Analog inputs (ADC1)
// ---------------------------------------------------------------------------

/// Volume potentiometer wiper. ADC1 channel 0 (GPIO1 on ESP32-S3).
pub const VOLUME_ADC_CHANNEL: u8 = 0;
/// LM335 temperature sensor. ADC1 channel 1 (GPIO2).
/// The volume knob couples into this reading on the current PCB revision.
pub const TEMP_ADC_CHANNEL: u8 = 1;

// ---------------------------------------------------------------------------
// Fan
// ---------------------------------------------------------------------------

/// Tachometer pulse input.
pub const FAN_TACH_GPIO: i32 = 3;
/// LEDC PWM output driving the fan.
pub const FAN_PWM_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Display (serial, TX only)
// ---------------------------------------------------------------------------

pub const LCD_TX_GPIO: i32 = 5;
/// UART driving `LCD_TX_GPIO` when the `lcd-uart` feature is enabled.
pub const LCD_UART_NUM: i32 = 2;

// ---------------------------------------------------------------------------
// Push-buttons (active high)
// ---------------------------------------------------------------------------

pub const BTN_MENU_GPIO: i32 = 6;
pub const BTN_MINUS_GPIO: i32 = 7;
pub const BTN_PLUS_GPIO: i32 = 8;
pub const BTN_MUTE_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Digital potentiometers (shared data line, per-channel clock/reset)
// ---------------------------------------------------------------------------

pub const POT_DATA_GPIO: i32 = 10;
pub const POT_LEFT_CLK_GPIO: i32 = 11;
pub const POT_LEFT_RST_GPIO: i32 = 12;
pub const POT_RIGHT_CLK_GPIO: i32 = 13;
pub const POT_RIGHT_RST_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Discrete outputs to the audio board
// ---------------------------------------------------------------------------

/// Bass effect enable (active high).
pub const FX_BASS_GPIO: i32 = 15;
/// Distortion effect enable (active high).
pub const FX_DIST_GPIO: i32 = 16;
/// Input relay: HIGH = jack, LOW = RCA.
pub const SOURCE_RELAY_GPIO: i32 = 17;
/// Mute indicator LED.
pub const MUTE_LED_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Title receive UART (host link)
// ---------------------------------------------------------------------------

pub const TITLE_UART_NUM: i32 = 1;
pub const TITLE_UART_TX_GPIO: i32 = 43;
pub const TITLE_UART_RX_GPIO: i32 = 44;
pub const TITLE_UART_BAUD: u32 = 9_600;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Fan PWM frequency (≈ fast PWM at 8 MHz / 8 / 256).
pub const FAN_PWM_FREQ_HZ: u32 = 3_900;
