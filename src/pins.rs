//! GPIO pin assignments for the switch board.
//!
//! Single source of truth — drivers reference this module rather than
//! hard-coding pin numbers.  The defaults in [`SwitchConfig`] mirror
//! these so a bench build with different wiring only has to touch the
//! config struct.
//!
//! [`SwitchConfig`]: crate::config::SwitchConfig

/// Digital output driving the relay coil transistor (active HIGH).
pub const RELAY_GPIO: i32 = 2;

/// Momentary push-button, active-low with external pull-up.
pub const BUTTON_GPIO: i32 = 0;
