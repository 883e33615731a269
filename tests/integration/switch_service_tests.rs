//! End-to-end dispatcher scenarios against mock adapters.
//!
//! Drives [`SwitchService`] through the same call sequences the main
//! loop performs and asserts on the recorded port history.

use lightswitch::app::service::SwitchService;
use lightswitch::config::SwitchConfig;
use lightswitch::drivers::button::ButtonEvent;

use crate::mock_hw::{LogSink, MockAccessory, MockNvs, MockRelay, MockReset};

struct Harness {
    app: SwitchService,
    relay: MockRelay,
    accessory: MockAccessory,
    reset: MockReset,
    sink: LogSink,
}

impl Harness {
    fn boot(persisted: Option<bool>) -> Self {
        let cfg = SwitchConfig::default();
        let mut h = Self {
            app: SwitchService::new(&cfg, persisted),
            relay: MockRelay::new(),
            accessory: MockAccessory::new(),
            reset: MockReset::new(),
            sink: LogSink::new(),
        };
        h.app.start(&mut h.relay, &mut h.sink);
        h
    }

    fn press(&mut self) {
        self.app.handle_button_event(
            ButtonEvent::SinglePress,
            &mut self.relay,
            &mut self.accessory,
            &mut self.reset,
            &mut self.sink,
        );
    }

    fn long_press(&mut self) {
        self.app.handle_button_event(
            ButtonEvent::LongPress,
            &mut self.relay,
            &mut self.accessory,
            &mut self.reset,
            &mut self.sink,
        );
    }
}

#[test]
fn boot_drives_relay_to_persisted_value() {
    let h = Harness::boot(Some(false));
    assert_eq!(h.relay.writes, vec![false]);
    assert!(h.sink.contains("Started"));

    let h = Harness::boot(Some(true));
    assert_eq!(h.relay.writes, vec![true]);
}

#[test]
fn boot_without_persisted_value_uses_config_default() {
    let h = Harness::boot(None);
    assert_eq!(h.relay.writes, vec![SwitchConfig::default().default_on]);
}

#[test]
fn each_press_toggles_and_notifies_once() {
    let mut h = Harness::boot(Some(false));

    h.press();
    assert!(h.app.relay_on());
    assert_eq!(h.accessory.notifies, vec![true]);

    h.press();
    assert!(!h.app.relay_on());
    assert_eq!(h.accessory.notifies, vec![true, false]);

    // One relay write per press, plus the boot write.
    assert_eq!(h.relay.writes, vec![false, true, false]);
    assert_eq!(h.reset.begins, 0);
}

#[test]
fn remote_set_drives_relay_but_never_notifies() {
    let mut h = Harness::boot(Some(false));

    h.app.handle_remote_set(true, &mut h.relay, &mut h.sink);
    assert!(h.app.relay_on());
    assert!(h.relay.is_on());

    h.app.handle_remote_set(false, &mut h.relay, &mut h.sink);
    assert!(!h.app.relay_on());

    assert!(
        h.accessory.notifies.is_empty(),
        "remote writes must not echo a notify back to the accessory layer"
    );
    assert!(h.sink.contains("Remote"));
}

#[test]
fn remote_and_button_interleave_consistently() {
    let mut h = Harness::boot(Some(false));

    h.app.handle_remote_set(true, &mut h.relay, &mut h.sink);
    h.press(); // toggles off
    assert!(!h.app.relay_on());
    h.app.handle_remote_set(true, &mut h.relay, &mut h.sink);
    h.press(); // toggles off again
    assert!(!h.app.relay_on());

    // Only the button presses notified.
    assert_eq!(h.accessory.notifies, vec![false, false]);
}

#[test]
fn long_press_launches_reset_exactly_once_per_event() {
    let mut h = Harness::boot(Some(true));
    h.long_press();
    assert_eq!(h.reset.begins, 1);
    assert!(h.sink.contains("FactoryResetRequested"));
    // The relay keeps its value until the restart cuts power.
    assert!(h.app.relay_on());
    assert!(h.accessory.notifies.is_empty());
}

#[test]
fn identify_emits_event_and_nothing_else() {
    let mut h = Harness::boot(Some(false));
    h.app.identify(&mut h.sink);
    assert!(h.sink.contains("Identify"));
    assert_eq!(h.relay.writes.len(), 1, "boot write only");
    assert!(h.accessory.notifies.is_empty());
    assert_eq!(h.reset.begins, 0);
}

#[test]
fn relay_value_survives_via_persistence() {
    let mut h = Harness::boot(None);
    let mut nvs = MockNvs::new();

    h.press();
    assert!(h.app.persist_if_dirty(&mut nvs));
    let stored = nvs.saved;
    assert_eq!(stored, Some(h.app.relay_on()));

    // Next boot restores what was stored.
    let h2 = Harness::boot(stored);
    assert_eq!(h2.app.relay_on(), h.app.relay_on());
}

#[test]
fn persist_is_skipped_when_clean_and_retried_after_failure() {
    let mut h = Harness::boot(Some(false));
    let mut nvs = MockNvs::new();

    assert!(!h.app.persist_if_dirty(&mut nvs));
    assert_eq!(nvs.save_calls, 0);

    h.press();
    nvs.fail_save = true;
    assert!(!h.app.persist_if_dirty(&mut nvs));
    assert!(h.app.is_state_dirty());

    nvs.fail_save = false;
    assert!(h.app.persist_if_dirty(&mut nvs));
    assert_eq!(nvs.saved, Some(true));
}
