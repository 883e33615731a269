//! Driven adapters — concrete implementations of the port traits in
//! [`crate::app::ports`], plus the identity and time helpers.
//!
//! | Module       | Port(s) / role                                      |
//! |--------------|-----------------------------------------------------|
//! | `accessory`  | `AccessoryPort`, `PairingStorePort`, server callbacks |
//! | `device_id`  | MAC-derived accessory name and serial number        |
//! | `hardware`   | `RelayPort` over the real GPIO lines                |
//! | `log_sink`   | `EventSink` rendering state changes to the log      |
//! | `nvs`        | `StatePort` over NVS flash                          |
//! | `system`     | `RestartPort`, `ResetLauncher`, identify task       |
//! | `time`       | monotonic uptime clock                              |
//! | `wifi`       | provisioning/association, `CredentialStorePort`     |
//!
//! Everything hardware- or component-specific is cfg-gated on
//! `target_os = "espidf"`; host builds get simulation backends so the
//! full dispatch path runs under `cargo test`.

pub mod accessory;
pub mod device_id;
pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod system;
pub mod time;
pub mod wifi;
