//! Port traits — the hexagonal boundary between domain logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SwitchService (domain)
//! ```
//!
//! Driven adapters (relay hardware, accessory server, WiFi provisioning,
//! NVS, restart primitive) implement these traits.  The
//! [`SwitchService`](super::service::SwitchService) consumes them via
//! generics, so the domain core never touches hardware directly and the
//! whole dispatch path runs on the host under test.

use crate::error::StorageError;

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → output line)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the relay output.
///
/// `set` is idempotent and must not block; there is no error return —
/// a failed hardware write is not observable in this design.
pub trait RelayPort {
    fn set(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Accessory port (driven adapter: domain → accessory server)
// ───────────────────────────────────────────────────────────────

/// Push-side port into the remote-accessory server.
///
/// `notify_on` is a one-way value push for *user-initiated* changes
/// (button toggles).  The remote-set path never calls it — the server
/// already holds the value it just wrote, and echoing it back risks a
/// notify feedback loop.
pub trait AccessoryPort {
    fn notify_on(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Factory-reset launcher (domain → background sequencer)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget launch of the factory-reset sequence.
///
/// `begin` must return promptly; the sequence itself (credential erase,
/// settle delays, restart) runs on its own unit of work so a long press
/// never stalls button sampling.  There is no cancellation.
pub trait ResetLauncher {
    fn begin(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Reset-sequencer collaborator ports
// ───────────────────────────────────────────────────────────────

/// Erases stored network-provisioning credentials.
/// Fire-and-forget: failures are neither detected nor retried.
pub trait CredentialStorePort {
    fn reset_credentials(&mut self);
}

/// Erases stored accessory pairing state.
/// Fire-and-forget, same policy as [`CredentialStorePort`].
pub trait PairingStorePort {
    fn reset_pairing(&mut self);
}

/// Full device restart.  The real implementation never returns; mocks
/// record the call so sequence tests can assert it came last.
pub trait RestartPort {
    fn restart(&mut self);
}

// ───────────────────────────────────────────────────────────────
// State persistence (domain ↔ NVS)
// ───────────────────────────────────────────────────────────────

/// Persists the user-visible relay value across reboots.
pub trait StatePort {
    /// Load the persisted relay value, if any.
    fn load_relay_state(&self) -> Result<bool, StorageError>;

    /// Persist the relay value atomically.
    fn save_relay_state(&mut self, on: bool) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log today;
/// an MQTT or status-LED adapter would implement the same trait).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
