//! Relay output driver.
//!
//! One digital output driving the relay coil.  `set()` is idempotent and
//! synchronous — a direct register write with no error return; a failed
//! hardware write is not observable at this level.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

pub struct RelayDriver {
    gpio: i32,
    on: bool,
}

impl RelayDriver {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, on: false }
    }

    /// Drive the relay.  Safe to call repeatedly with the same value.
    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(self.gpio, on);
        self.on = on;
    }

    /// Last commanded state (mirror of the output line).
    pub fn is_on(&self) -> bool {
        self.on
    }
}
