//! Smart-switch firmware — main entry point.
//!
//! Hexagonal architecture with a channel-serialized main loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter  AccessoryAdapter  WifiAdapter  NvsAdapter  │
//! │  (RelayPort)      (AccessoryPort)   (provision)  (StatePort) │
//! │  LogEventSink     FactoryReset/SystemControl                 │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │            SwitchService (pure logic)              │      │
//! │  │  relay state · toggle · reset dispatch             │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                                                              │
//! │  ButtonDriver (debounce + classify) · reset sequencer        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use lightswitch::adapters::accessory::{AccessoryAdapter, AccessoryInfo};
use lightswitch::adapters::device_id;
use lightswitch::adapters::hardware::HardwareAdapter;
use lightswitch::adapters::log_sink::LogEventSink;
use lightswitch::adapters::nvs::NvsAdapter;
use lightswitch::adapters::system::{self, FactoryReset};
use lightswitch::adapters::time;
use lightswitch::adapters::wifi::WifiAdapter;
use lightswitch::app::ports::StatePort;
use lightswitch::app::service::SwitchService;
use lightswitch::config::SwitchConfig;
use lightswitch::drivers::button::ButtonDriver;
use lightswitch::drivers::hw_init;
use lightswitch::drivers::relay::RelayDriver;
use lightswitch::error::StorageError;
use lightswitch::events::{self, Event};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  LightSwitch v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SwitchConfig::default();

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_relay_output(&config) {
        // Without a relay output the device has no function — halt and
        // let the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let button_usable = match hw_init::init_button_input(&config) {
        Ok(()) => true,
        Err(e) => {
            // Degraded mode: remote control still works without the button.
            warn!("Button init failed ({}), continuing remote-only", e);
            false
        }
    };

    // ── 3. Persisted relay state from NVS ─────────────────────
    let mut nvs = match NvsAdapter::new() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("NVS init failed ({}), relay state will not persist", e);
            None
        }
    };
    let persisted = match nvs.as_ref().map(StatePort::load_relay_state) {
        Some(Ok(on)) => {
            info!("Relay state restored from NVS: {}", on);
            Some(on)
        }
        Some(Err(StorageError::NotFound)) => {
            info!("No persisted relay state, using default");
            None
        }
        Some(Err(e)) => {
            warn!("Persisted relay state unreadable ({}), using default", e);
            None
        }
        None => None,
    };

    // ── 4. Device identity ────────────────────────────────────
    let mac = device_id::read_mac();
    let name = device_id::accessory_name(&mac);
    let serial = device_id::serial_number(&mac);
    info!("Accessory: {} (serial {})", name, serial);

    // ── 5. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(RelayDriver::new(config.relay_gpio), config.button_gpio);
    let mut accessory = AccessoryAdapter::new(AccessoryInfo {
        name: name.clone(),
        manufacturer: "Homekit",
        model: "LightBulb",
        serial_number: serial,
        firmware_revision: env!("CARGO_PKG_VERSION"),
        setup_code: "123-45-678",
    });
    let mut sink = LogEventSink;
    let mut reset = FactoryReset {
        settle_ms: config.reset_settle_ms,
    };
    let mut button = ButtonDriver::new(&config);

    let mut wifi = WifiAdapter::new();
    wifi.init(name.as_str());

    // ── 6. Construct app service ──────────────────────────────
    let mut app = SwitchService::new(&config, persisted);
    app.start(&mut hw, &mut sink);

    info!("System ready. Entering event loop.");

    // ── 7. Event loop ─────────────────────────────────────────
    loop {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(
            config.sample_interval_ms,
        )));
        let now_ms = time::uptime_ms();

        // Button gesture detection: raw level → debounce → classify.
        // Dispatched inline — this already runs in the consumer's
        // context, so it must not go through the server-callback queue.
        if button_usable {
            if let Some(gesture) = button.tick(hw.button_raw_high(), now_ms) {
                app.handle_button_event(gesture, &mut hw, &mut accessory, &mut reset, &mut sink);
            }
        }

        // WiFi state machine (provisioning, association, reconnect).
        // First association starts the accessory server, one-shot.
        if wifi.poll(now_ms) {
            accessory.start();
        }

        // Drain the server-callback queue — the single consumer.
        events::drain_events(|event| match event {
            Event::RemoteSetOn => {
                app.handle_remote_set(true, &mut hw, &mut sink);
            }
            Event::RemoteSetOff => {
                app.handle_remote_set(false, &mut hw, &mut sink);
            }
            Event::IdentifyRequested => {
                app.identify(&mut sink);
                system::spawn_identify();
            }
        });

        // Persist the relay value if it changed this pass.
        if let Some(store) = nvs.as_mut() {
            app.persist_if_dirty(store);
        }
    }
}
