//! Switch service — the hexagonal core.
//!
//! [`SwitchService`] is the action dispatcher: it owns the relay state
//! and maps button events and remote-set commands onto the two device
//! operations (toggle, factory reset).  All I/O flows through port
//! traits injected at call sites, making the service testable with mock
//! adapters.
//!
//! ```text
//!  ButtonEvent ──▶ ┌────────────────────────┐ ──▶ RelayPort
//!  remote set  ──▶ │     SwitchService      │ ──▶ AccessoryPort (notify)
//!                  │   relay_on: bool       │ ──▶ ResetLauncher
//!                  └────────────────────────┘ ──▶ EventSink
//! ```
//!
//! ## Ownership invariant
//!
//! `relay_on` has exactly one writer: whichever task owns this struct
//! (the main loop).  Remote writes reach it only as queued events, so
//! the read-negate-write-notify sequence of a button toggle can never
//! interleave with a remote set.  The accessory layer holds a notified
//! copy, never a second writer.

use log::{info, warn};

use crate::config::SwitchConfig;
use crate::drivers::button::ButtonEvent;

use super::events::{AppEvent, ChangeSource};
use super::ports::{AccessoryPort, EventSink, RelayPort, ResetLauncher, StatePort};

/// The application service orchestrating relay state and reset dispatch.
pub struct SwitchService {
    relay_on: bool,
    /// Relay value changed since the last persist.
    state_dirty: bool,
}

impl SwitchService {
    /// Construct from configuration plus the persisted relay value, if
    /// one exists.  Does **not** touch hardware — call [`start`] next.
    ///
    /// [`start`]: SwitchService::start
    pub fn new(config: &SwitchConfig, persisted: Option<bool>) -> Self {
        Self {
            relay_on: persisted.unwrap_or(config.default_on),
            state_dirty: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive the physical output to the boot state.
    pub fn start(&mut self, relay: &mut impl RelayPort, sink: &mut impl EventSink) {
        relay.set(self.relay_on);
        sink.emit(&AppEvent::Started { on: self.relay_on });
        info!("SwitchService started, relay={}", on_off(self.relay_on));
    }

    // ── Button path ───────────────────────────────────────────

    /// Dispatch a classified button event.
    ///
    /// Single press toggles the relay and notifies the accessory layer
    /// of the new value — one physical write, one notify.  Long press
    /// launches the reset sequencer and returns immediately; the
    /// sequence runs on its own unit of work.
    pub fn handle_button_event(
        &mut self,
        event: ButtonEvent,
        relay: &mut impl RelayPort,
        accessory: &mut impl AccessoryPort,
        reset: &mut impl ResetLauncher,
        sink: &mut impl EventSink,
    ) {
        match event {
            ButtonEvent::SinglePress => {
                self.apply(!self.relay_on, relay);
                accessory.notify_on(self.relay_on);
                info!("Button: toggled relay {}", on_off(self.relay_on));
                sink.emit(&AppEvent::RelayChanged {
                    on: self.relay_on,
                    source: ChangeSource::Button,
                });
            }
            ButtonEvent::LongPress => {
                warn!("Button: long press — launching factory reset");
                sink.emit(&AppEvent::FactoryResetRequested);
                reset.begin();
            }
        }
    }

    // ── Remote path ───────────────────────────────────────────

    /// Apply a state change requested by a remote-accessory client.
    ///
    /// No notify back to the accessory layer: it supplied this value and
    /// already mirrors it.
    pub fn handle_remote_set(
        &mut self,
        desired_on: bool,
        relay: &mut impl RelayPort,
        sink: &mut impl EventSink,
    ) {
        self.apply(desired_on, relay);
        info!("Remote: set relay {}", on_off(desired_on));
        sink.emit(&AppEvent::RelayChanged {
            on: desired_on,
            source: ChangeSource::Remote,
        });
    }

    /// Handle an identify request.  Bounded and non-blocking: emits the
    /// event and returns; the caller spawns the short-lived blink task.
    pub fn identify(&mut self, sink: &mut impl EventSink) {
        info!("Identify requested");
        sink.emit(&AppEvent::Identify);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current relay state.
    pub fn relay_on(&self) -> bool {
        self.relay_on
    }

    /// Whether the relay value changed since the last persist.
    pub fn is_state_dirty(&self) -> bool {
        self.state_dirty
    }

    // ── Persistence ───────────────────────────────────────────

    /// Persist the relay value if it changed.  Returns `true` on save.
    pub fn persist_if_dirty(&mut self, store: &mut impl StatePort) -> bool {
        if !self.state_dirty {
            return false;
        }
        match store.save_relay_state(self.relay_on) {
            Ok(()) => {
                self.state_dirty = false;
                true
            }
            Err(e) => {
                warn!("Relay state persist failed: {}", e);
                false
            }
        }
    }

    // ── Internal ──────────────────────────────────────────────

    /// Single write path for the relay value: update the owned state,
    /// command the output, mark dirty.
    fn apply(&mut self, on: bool, relay: &mut impl RelayPort) {
        self.relay_on = on;
        relay.set(on);
        self.state_dirty = true;
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}
