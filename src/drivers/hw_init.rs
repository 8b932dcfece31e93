//! One-shot hardware peripheral initialization.
//!
//! Configures ADC channels, GPIO directions, the fan LEDC channel and the
//! UARTs using raw ESP-IDF sys calls.  Called once from `main()` before
//! the control loop starts.  The register helpers below compile to
//! in-memory no-ops on the host.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
    UartInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc)    => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc)   => write!(f, "LEDC timer/channel config failed (rc={})", rc),
            Self::UartInitFailed(rc)   => write!(f, "UART init failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
fn check(ret: esp_err_t, err: fn(i32) -> HwInitError) -> Result<(), HwInitError> {
    if ret == ESP_OK as i32 { Ok(()) } else { Err(err(ret)) }
}

/// Bring up every peripheral the controller uses.
///
/// `lcd_baud` is only used when the display runs on the hardware UART.
#[cfg(target_os = "espidf")]
pub fn init_peripherals(lcd_baud: u32) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_inputs()?;
        init_gpio_outputs()?;
        init_ledc()?;
        init_uart(pins::TITLE_UART_NUM, pins::TITLE_UART_TX_GPIO, pins::TITLE_UART_RX_GPIO, pins::TITLE_UART_BAUD)?;
        #[cfg(feature = "lcd-uart")]
        init_uart(pins::LCD_UART_NUM, pins::LCD_TX_GPIO, -1, lcd_baud)?;
    }
    #[cfg(not(feature = "lcd-uart"))]
    let _ = lcd_baud;
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(_lcd_baud: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  No concurrent access is possible because
/// `init_adc()` completes before the control loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    check(unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) }, HwInitError::AdcInitFailed)?;

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    for channel in [pins::VOLUME_ADC_CHANNEL, pins::TEMP_ADC_CHANNEL] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), adc_channel_t::from(channel), &chan_cfg) };
        check(ret, HwInitError::AdcInitFailed)?;
    }

    info!("hw_init: ADC1 configured (CH0=volume, CH1=temp)");
    Ok(())
}

/// Whether the ADC unit came up.
#[cfg(target_os = "espidf")]
pub fn adc1_ready() -> bool {
    // SAFETY: adc1_handle() contract — single-threaded main-loop access only.
    !unsafe { adc1_handle() }.is_null()
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_ready() -> bool {
    true
}

/// Blocking 12-bit conversion; 0 on a driver error.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u8) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract — single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), adc_channel_t::from(channel), &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u8) -> u16 {
    0
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    // Buttons are active high; the tach output idles low between pulses.
    let input_pins = [
        pins::BTN_MENU_GPIO,
        pins::BTN_MINUS_GPIO,
        pins::BTN_PLUS_GPIO,
        pins::BTN_MUTE_GPIO,
        pins::FAN_TACH_GPIO,
    ];

    for &pin in &input_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        check(unsafe { gpio_config(&cfg) }, HwInitError::GpioConfigFailed)?;
    }

    info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    false
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [
        pins::POT_DATA_GPIO,
        pins::POT_LEFT_CLK_GPIO,
        pins::POT_LEFT_RST_GPIO,
        pins::POT_RIGHT_CLK_GPIO,
        pins::POT_RIGHT_RST_GPIO,
        pins::FX_BASS_GPIO,
        pins::FX_DIST_GPIO,
        pins::SOURCE_RELAY_GPIO,
        pins::MUTE_LED_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        check(unsafe { gpio_config(&cfg) }, HwInitError::GpioConfigFailed)?;
        unsafe { gpio_set_level(pin, 0) };
    }

    // Bit-banged display line: output, idles high.
    #[cfg(not(feature = "lcd-uart"))]
    {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pins::LCD_TX_GPIO,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        check(unsafe { gpio_config(&cfg) }, HwInitError::GpioConfigFailed)?;
        unsafe { gpio_set_level(pins::LCD_TX_GPIO, 1) };
    }

    info!("hw_init: GPIO outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe { gpio_set_level(pin, u32::from(high)); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── LEDC PWM ─────────────────────────────────────────────────

pub const LEDC_CH_FAN: u32 = 0;

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    // Timer 0: fan (3.9 kHz, 8-bit)
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
        freq_hz: pins::FAN_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    check(unsafe { ledc_timer_config(&timer0) }, HwInitError::LedcInitFailed)?;

    let channel = ledc_channel_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        channel: LEDC_CH_FAN,
        timer_sel: ledc_timer_t_LEDC_TIMER_0,
        gpio_num: pins::FAN_PWM_GPIO,
        duty: 0,
        hpoint: 0,
        ..Default::default()
    };
    check(unsafe { ledc_channel_config(&channel) }, HwInitError::LedcInitFailed)?;

    info!("hw_init: LEDC configured (fan=CH0)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u8) {
    // SAFETY: LEDC channels were configured in init_ledc(); duty register
    // writes are race-free since only main loop calls this function.
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, u32::from(duty));
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u8) {}

// ── UART ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const UART_RX_BUF: i32 = 256;

#[cfg(target_os = "espidf")]
unsafe fn init_uart(port: i32, tx: i32, rx: i32, baud: u32) -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: baud as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };
    check(unsafe { uart_param_config(port, &cfg) }, HwInitError::UartInitFailed)?;
    check(unsafe { uart_set_pin(port, tx, rx, -1, -1) }, HwInitError::UartInitFailed)?;
    check(
        unsafe { uart_driver_install(port, UART_RX_BUF, 0, 0, core::ptr::null_mut(), 0) },
        HwInitError::UartInitFailed,
    )?;
    info!("hw_init: UART{} configured ({} baud)", port, baud);
    Ok(())
}

/// Bytes waiting in the receive buffer of `port`.
#[cfg(target_os = "espidf")]
pub fn uart_pending(port: i32) -> usize {
    let mut len: usize = 0;
    // SAFETY: the driver for `port` was installed in init_uart().
    let ret = unsafe { uart_get_buffered_data_len(port, &mut len) };
    if ret == ESP_OK as i32 { len } else { 0 }
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_pending(_port: i32) -> usize {
    0
}

/// Blocking single-byte read.
#[cfg(target_os = "espidf")]
pub fn uart_read(port: i32) -> u8 {
    let mut byte: u8 = 0;
    // SAFETY: the driver for `port` was installed; the buffer is one byte.
    unsafe {
        uart_read_bytes(port, (&raw mut byte).cast(), 1, TickType_t::MAX);
    }
    byte
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_read(_port: i32) -> u8 {
    b'\n'
}

/// Queue one byte for transmit; `false` if the driver refused it.
#[cfg(target_os = "espidf")]
pub fn uart_write(port: i32, byte: u8) -> bool {
    // SAFETY: the driver for `port` was installed; the source is one byte.
    (unsafe { uart_write_bytes(port, (&raw const byte).cast(), 1) }) == 1
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_write(_port: i32, _byte: u8) -> bool {
    true
}
