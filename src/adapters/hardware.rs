//! Hardware adapter — bridges the real pins to domain port traits.
//!
//! Owns the [`RelayDriver`] and the raw button line, exposing the write
//! side through [`RelayPort`].  This is the only module in the system
//! that touches actual GPIO; on non-espidf targets the underlying
//! helpers are simulation stubs.

use crate::app::ports::RelayPort;
use crate::drivers::hw_init;
use crate::drivers::relay::RelayDriver;

/// Concrete adapter combining the relay output and button input.
pub struct HardwareAdapter {
    relay: RelayDriver,
    button_gpio: i32,
}

impl HardwareAdapter {
    pub fn new(relay: RelayDriver, button_gpio: i32) -> Self {
        Self { relay, button_gpio }
    }

    /// Raw button line level (true = line HIGH).  The driver layer
    /// applies active-low correction and debouncing.
    pub fn button_raw_high(&self) -> bool {
        hw_init::gpio_read(self.button_gpio)
    }

    /// Last commanded relay state.
    pub fn relay_is_on(&self) -> bool {
        self.relay.is_on()
    }
}

impl RelayPort for HardwareAdapter {
    fn set(&mut self, on: bool) {
        self.relay.set(on);
    }
}
