//! Startup configuration for the switch.
//!
//! One explicit struct passed in at startup instead of scattered
//! top-level constants, so tests (and a second board spin) can run with
//! different pins and thresholds.

use serde::{Deserialize, Serialize};

use crate::pins;

/// All tunable startup parameters for a single relay + button instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchConfig {
    // --- Pins ---
    /// Digital output driving the relay.
    pub relay_gpio: i32,
    /// Digital input for the push-button.
    pub button_gpio: i32,
    /// Button line reads LOW when pressed (external pull-up).
    pub button_active_low: bool,

    // --- Button timing ---
    /// Raw-level sampling interval (milliseconds).
    pub sample_interval_ms: u32,
    /// Consecutive stable samples required before a transition is trusted.
    pub debounce_samples: u8,
    /// Hold duration that classifies as a long press (milliseconds).
    pub long_press_ms: u32,

    // --- Factory reset ---
    /// Settle delay between the reset sequence's erase steps (milliseconds).
    pub reset_settle_ms: u32,

    // --- Relay ---
    /// Relay state driven at boot when no persisted value exists.
    pub default_on: bool,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            relay_gpio: pins::RELAY_GPIO,
            button_gpio: pins::BUTTON_GPIO,
            button_active_low: true,

            // 4 × 10 ms = 40 ms debounce window.
            sample_interval_ms: 10,
            debounce_samples: 4,
            long_press_ms: 10_000,

            reset_settle_ms: 1_000,

            default_on: true,
        }
    }
}

impl SwitchConfig {
    /// Debounce window in milliseconds (derived).
    pub fn debounce_window_ms(&self) -> u32 {
        self.sample_interval_ms * u32::from(self.debounce_samples)
    }
}
