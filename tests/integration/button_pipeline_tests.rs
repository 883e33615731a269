//! Raw-sample-to-action pipeline tests.
//!
//! Feeds raw line levels through the full input path — debouncer,
//! classifier, dispatcher — the way the main loop does, and asserts on
//! the resulting relay and reset behaviour.

use lightswitch::app::service::SwitchService;
use lightswitch::config::SwitchConfig;
use lightswitch::drivers::button::ButtonDriver;

use crate::mock_hw::{LogSink, MockAccessory, MockRelay, MockReset};

const TICK_MS: u32 = 10;

struct Rig {
    button: ButtonDriver,
    app: SwitchService,
    relay: MockRelay,
    accessory: MockAccessory,
    reset: MockReset,
    sink: LogSink,
    now_ms: u32,
}

impl Rig {
    fn boot(initial_on: bool) -> Self {
        let cfg = SwitchConfig::default();
        let mut rig = Self {
            button: ButtonDriver::new(&cfg),
            app: SwitchService::new(&cfg, Some(initial_on)),
            relay: MockRelay::new(),
            accessory: MockAccessory::new(),
            reset: MockReset::new(),
            sink: LogSink::new(),
            now_ms: 0,
        };
        rig.app.start(&mut rig.relay, &mut rig.sink);
        rig
    }

    /// One sample tick.  `raw_high` is the electrical line level
    /// (active-low button: false = pressed).
    fn tick(&mut self, raw_high: bool) {
        self.now_ms = self.now_ms.wrapping_add(TICK_MS);
        if let Some(event) = self.button.tick(raw_high, self.now_ms) {
            self.app.handle_button_event(
                event,
                &mut self.relay,
                &mut self.accessory,
                &mut self.reset,
                &mut self.sink,
            );
        }
    }

    fn hold_ms(&mut self, ms: u32) {
        for _ in 0..ms / TICK_MS {
            self.tick(false);
        }
    }

    fn release_ms(&mut self, ms: u32) {
        for _ in 0..ms / TICK_MS {
            self.tick(true);
        }
    }
}

#[test]
fn clean_press_and_release_toggles_once() {
    let mut rig = Rig::boot(false);
    rig.release_ms(100);
    rig.hold_ms(200);
    rig.release_ms(100);

    assert!(rig.app.relay_on());
    assert_eq!(rig.accessory.notifies, vec![true]);
    assert_eq!(rig.reset.begins, 0);
}

#[test]
fn contact_bounce_produces_no_action() {
    let mut rig = Rig::boot(false);
    rig.release_ms(100);
    // Sub-window chatter: 10-30 ms spikes, never 4 stable samples.
    for _ in 0..20 {
        rig.tick(false);
        rig.tick(true);
        rig.tick(false);
        rig.tick(true);
        rig.tick(true);
    }
    rig.release_ms(100);

    assert!(!rig.app.relay_on());
    assert!(rig.accessory.notifies.is_empty());
    assert_eq!(rig.relay.writes.len(), 1, "boot write only");
}

#[test]
fn ten_second_hold_triggers_reset_while_still_held() {
    let mut rig = Rig::boot(true);
    rig.release_ms(100);
    rig.hold_ms(10_500);

    // Fired at the threshold crossing, before any release.
    assert_eq!(rig.reset.begins, 1);
    assert!(rig.sink.contains("FactoryResetRequested"));
    // No toggle from this cycle.
    assert!(rig.app.relay_on());
    assert!(rig.accessory.notifies.is_empty());

    // The release afterwards emits nothing more.
    rig.release_ms(200);
    assert_eq!(rig.reset.begins, 1);
}

#[test]
fn release_just_before_threshold_is_a_toggle_not_a_reset() {
    let mut rig = Rig::boot(false);
    rig.release_ms(100);
    rig.hold_ms(9_900);
    rig.release_ms(100);

    assert_eq!(rig.reset.begins, 0);
    assert!(rig.app.relay_on());
    assert_eq!(rig.accessory.notifies, vec![true]);
}

#[test]
fn repeated_presses_alternate_the_relay() {
    let mut rig = Rig::boot(false);
    rig.release_ms(100);
    for expected in [true, false, true, false] {
        rig.hold_ms(150);
        rig.release_ms(150);
        assert_eq!(rig.app.relay_on(), expected);
    }
    assert_eq!(rig.accessory.notifies, vec![true, false, true, false]);
}
