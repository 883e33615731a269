//! Outbound application events.
//!
//! The [`SwitchService`](super::service::SwitchService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them.

/// Where a relay change originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    /// Physical button toggle.
    Button,
    /// Remote-accessory client write.
    Remote,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The relay state changed.
    RelayChanged { on: bool, source: ChangeSource },

    /// A long press was classified; the reset sequence has been launched.
    FactoryResetRequested,

    /// An identify request arrived from the accessory layer.
    Identify,

    /// The service started and drove the relay to its boot state.
    Started { on: bool },
}
