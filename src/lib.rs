//! Amplifier front-panel firmware library.
//!
//! Exposes the control core and the drivers for integration testing.  All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod menu;
pub mod pins;
pub mod title;

pub mod adapters;
pub mod drivers;
pub mod sensors;
