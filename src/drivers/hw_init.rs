//! One-shot hardware peripheral initialization.
//!
//! Configures the relay output and button input using raw ESP-IDF sys
//! calls.  Called once from `main()` before the event loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::config::SwitchConfig;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    /// Relay output pin could not be configured.
    RelayConfigFailed(i32),
    /// Button input pin could not be configured (e.g. pin already
    /// claimed).  Non-fatal: the device degrades to remote-only control.
    ButtonConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RelayConfigFailed(rc) => write!(f, "relay GPIO config failed (rc={})", rc),
            Self::ButtonConfigFailed(rc) => write!(f, "button GPIO config failed (rc={})", rc),
        }
    }
}

// ── Relay output ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_relay_output(config: &SwitchConfig) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << config.relay_gpio,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: called once from main() before the event loop; single-threaded.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::RelayConfigFailed(ret));
    }
    log::info!("hw_init: relay output on GPIO{}", config.relay_gpio);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_relay_output(config: &SwitchConfig) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): relay output on GPIO{}", config.relay_gpio);
    Ok(())
}

// ── Button input ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_button_input(config: &SwitchConfig) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << config.button_gpio,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: called once from main() before the event loop; single-threaded.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::ButtonConfigFailed(ret));
    }
    log::info!("hw_init: button input on GPIO{} (pull-up)", config.button_gpio);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_button_input(config: &SwitchConfig) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): button input on GPIO{}", config.button_gpio);
    Ok(())
}

// ── GPIO access ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Simulation: the line idles HIGH (button released, active-low).
#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_relay_output(). Main-loop only.
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}
