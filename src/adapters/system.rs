//! System-level adapter: chip restart, identify blink task, and the
//! concrete factory-reset launcher.

use log::{info, warn};

use crate::app::ports::{ResetLauncher, RestartPort};
use crate::reset;

/// [`RestartPort`] backed by the SoC reset line.
pub struct SystemControl;

impl RestartPort for SystemControl {
    #[cfg(target_os = "espidf")]
    fn restart(&mut self) {
        warn!("System: restarting");
        // SAFETY: esp_restart never returns.
        unsafe { esp_idf_svc::sys::esp_restart() };
    }

    #[cfg(not(target_os = "espidf"))]
    fn restart(&mut self) {
        warn!("System(sim): restart requested, exiting process");
        std::process::exit(0);
    }
}

/// Concrete [`ResetLauncher`]: hands the erase/restart collaborators to
/// the sequencer on a detached background thread and returns at once,
/// leaving the main loop responsive while the sequence runs.
pub struct FactoryReset {
    pub settle_ms: u32,
}

impl ResetLauncher for FactoryReset {
    fn begin(&mut self) {
        reset::launch(
            crate::adapters::wifi::CredentialStore,
            crate::adapters::accessory::PairingStore,
            SystemControl,
            self.settle_ms,
        );
    }
}

/// Run the identify indication on a short-lived background thread so the
/// main loop keeps sampling the button while it plays.
pub fn spawn_identify() {
    if let Err(e) = std::thread::Builder::new()
        .name("identify".into())
        .stack_size(2048)
        .spawn(run_identify)
    {
        warn!("System: identify thread spawn failed: {}", e);
    }
}

fn run_identify() {
    // Visual identify: three quick relay-safe blinks on the status
    // output would go here; with no dedicated LED on this board the
    // indication is log-only.
    for i in 1..=3 {
        info!("Identify: blink {}/3", i);
        std::thread::sleep(std::time::Duration::from_millis(150));
    }
}
