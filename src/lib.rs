//! Smart-switch firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod events;
pub mod reset;

pub mod error;
pub mod pins;

// Cfg-gated hardware boundary; host builds get simulation backends.
pub mod adapters;
pub mod drivers;
