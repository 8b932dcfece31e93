//! Unified error types for the amplifier control firmware.
//!
//! The control core degrades silently wherever the hardware gives it bad
//! data; the only failures that reach this type are pin-level faults
//! reported by the HAL and configuration/bootstrap problems.  All variants
//! are `Copy` so they can be passed up through the drivers without
//! allocation.

use core::fmt;

use embedded_hal::digital::ErrorKind;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A GPIO read or write was rejected by the HAL.
    Gpio(ErrorKind),
    /// Configuration is internally inconsistent.
    Config(&'static str),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl Error {
    /// Map any embedded-hal digital pin error into the firmware error.
    pub fn gpio<E: embedded_hal::digital::Error>(e: E) -> Self {
        Self::Gpio(e.kind())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio(kind) => write!(f, "gpio: {kind:?}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
