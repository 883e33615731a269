//! Factory-reset sequencer.
//!
//! Runs the irreversible reset procedure as a background unit of work,
//! off the input-sampling path:
//!
//! 1. erase network-provisioning credentials
//! 2. settle delay (the credential erase and the pairing erase are
//!    independent subsystems that must not race)
//! 3. erase accessory pairing state
//! 4. settle delay
//! 5. restart the device
//!
//! Every step is fire-and-forget: no retry, no rollback, no
//! cancellation.  If an external erase fails silently the device still
//! restarts and the operator observes whether provisioning persisted.
//! The settle delays block only the sequencer's own thread; button
//! sampling and the accessory server keep running until the restart.

use std::time::Duration;

use log::warn;

use crate::app::ports::{CredentialStorePort, PairingStorePort, RestartPort};

/// Execute the strictly ordered reset sequence against the collaborator
/// ports.  Returns only in tests — the real [`RestartPort`] never comes
/// back from `restart()`.
pub fn run_sequence(
    network: &mut impl CredentialStorePort,
    accessory: &mut impl PairingStorePort,
    system: &mut impl RestartPort,
    settle_ms: u32,
) {
    let settle = Duration::from_millis(u64::from(settle_ms));

    warn!("Factory reset: erasing WiFi credentials");
    network.reset_credentials();
    std::thread::sleep(settle);

    warn!("Factory reset: erasing accessory pairing state");
    accessory.reset_pairing();
    std::thread::sleep(settle);

    warn!("Factory reset: restarting");
    system.restart();
}

/// Launch the sequence on a detached thread and return immediately.
///
/// The port implementations move into the thread; there is no join
/// handle and no abort — once launched, the device will restart.
pub fn launch(
    network: impl CredentialStorePort + Send + 'static,
    accessory: impl PairingStorePort + Send + 'static,
    system: impl RestartPort + Send + 'static,
    settle_ms: u32,
) {
    std::thread::spawn(move || {
        let mut network = network;
        let mut accessory = accessory;
        let mut system = system;
        run_sequence(&mut network, &mut accessory, &mut system, settle_ms);
    });
}
