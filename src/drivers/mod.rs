//! Input/output drivers and hardware initialisation helpers.

pub mod button;
pub mod debounce;
pub mod hw_init;
pub mod relay;
