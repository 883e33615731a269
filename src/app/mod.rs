//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the action-dispatch rules for the switch: relay
//! toggling, remote sets, and factory-reset launch.  All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
