//! Mock adapters for integration tests.
//!
//! Record every port call so tests can assert on the full command
//! history without touching real GPIO or an accessory server.

use lightswitch::app::events::AppEvent;
use lightswitch::app::ports::{
    AccessoryPort, EventSink, RelayPort, ResetLauncher, StatePort,
};
use lightswitch::error::StorageError;

// ── MockRelay ─────────────────────────────────────────────────

pub struct MockRelay {
    /// Every value ever written, in order.
    pub writes: Vec<bool>,
}

#[allow(dead_code)]
impl MockRelay {
    pub fn new() -> Self {
        Self { writes: Vec::new() }
    }

    pub fn is_on(&self) -> bool {
        self.writes.last().copied().unwrap_or(false)
    }
}

impl Default for MockRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayPort for MockRelay {
    fn set(&mut self, on: bool) {
        self.writes.push(on);
    }
}

// ── MockAccessory ─────────────────────────────────────────────

pub struct MockAccessory {
    pub notifies: Vec<bool>,
}

#[allow(dead_code)]
impl MockAccessory {
    pub fn new() -> Self {
        Self {
            notifies: Vec::new(),
        }
    }
}

impl Default for MockAccessory {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessoryPort for MockAccessory {
    fn notify_on(&mut self, on: bool) {
        self.notifies.push(on);
    }
}

// ── MockReset ─────────────────────────────────────────────────

pub struct MockReset {
    pub begins: u32,
}

#[allow(dead_code)]
impl MockReset {
    pub fn new() -> Self {
        Self { begins: 0 }
    }
}

impl Default for MockReset {
    fn default() -> Self {
        Self::new()
    }
}

impl ResetLauncher for MockReset {
    fn begin(&mut self) {
        self.begins += 1;
    }
}

// ── MockNvs ───────────────────────────────────────────────────

pub struct MockNvs {
    pub saved: Option<bool>,
    pub fail_save: bool,
    pub save_calls: u32,
}

#[allow(dead_code)]
impl MockNvs {
    pub fn new() -> Self {
        Self {
            saved: None,
            fail_save: false,
            save_calls: 0,
        }
    }

    pub fn with_state(on: bool) -> Self {
        Self {
            saved: Some(on),
            fail_save: false,
            save_calls: 0,
        }
    }
}

impl Default for MockNvs {
    fn default() -> Self {
        Self::new()
    }
}

impl StatePort for MockNvs {
    fn load_relay_state(&self) -> Result<bool, StorageError> {
        self.saved.ok_or(StorageError::NotFound)
    }

    fn save_relay_state(&mut self, on: bool) -> Result<(), StorageError> {
        self.save_calls += 1;
        if self.fail_save {
            return Err(StorageError::IoError);
        }
        self.saved = Some(on);
        Ok(())
    }
}

// ── LogSink ───────────────────────────────────────────────────

pub struct LogSink {
    pub events: Vec<String>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.events.iter().any(|e| e.contains(needle))
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(format!("{:?}", event));
    }
}
