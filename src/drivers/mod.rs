//! Peripheral drivers and hardware initialisation.

pub mod button;
pub mod digipot;
pub mod hw_init;
pub mod lcd;
pub mod outputs;
pub mod serial;
