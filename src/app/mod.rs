//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the rules of the amplifier front panel: edge
//! handling, menu navigation, audio state and the per-iteration control
//! loop.  All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod context;
pub mod events;
pub mod ports;
pub mod service;
