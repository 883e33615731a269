//! Factory-reset sequence timing tests.
//!
//! The unit tests cover strict ordering; these verify the settle delays
//! actually space the erase steps apart and that the launcher never
//! blocks the caller.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use lightswitch::app::ports::{CredentialStorePort, PairingStorePort, RestartPort};
use lightswitch::reset;

#[derive(Clone)]
struct TimedRecorder {
    t0: Instant,
    stamps: Arc<Mutex<Vec<(&'static str, Duration)>>>,
}

impl TimedRecorder {
    fn new() -> Self {
        Self {
            t0: Instant::now(),
            stamps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn mark(&self, step: &'static str) {
        self.stamps.lock().unwrap().push((step, self.t0.elapsed()));
    }

    fn stamps(&self) -> Vec<(&'static str, Duration)> {
        self.stamps.lock().unwrap().clone()
    }
}

impl CredentialStorePort for TimedRecorder {
    fn reset_credentials(&mut self) {
        self.mark("credentials");
    }
}

impl PairingStorePort for TimedRecorder {
    fn reset_pairing(&mut self) {
        self.mark("pairing");
    }
}

impl RestartPort for TimedRecorder {
    fn restart(&mut self) {
        self.mark("restart");
    }
}

const SETTLE_MS: u64 = 40;

#[test]
fn settle_delay_spaces_every_step() {
    let rec = TimedRecorder::new();
    let (mut n, mut a, mut s) = (rec.clone(), rec.clone(), rec.clone());
    reset::run_sequence(&mut n, &mut a, &mut s, SETTLE_MS as u32);

    let stamps = rec.stamps();
    assert_eq!(stamps.len(), 3);
    assert_eq!(stamps[0].0, "credentials");
    assert_eq!(stamps[1].0, "pairing");
    assert_eq!(stamps[2].0, "restart");

    let settle = Duration::from_millis(SETTLE_MS);
    assert!(
        stamps[1].1 - stamps[0].1 >= settle,
        "pairing erase ran {}ms after credentials, want >= {}ms",
        (stamps[1].1 - stamps[0].1).as_millis(),
        SETTLE_MS
    );
    assert!(
        stamps[2].1 - stamps[1].1 >= settle,
        "restart ran {}ms after pairing erase, want >= {}ms",
        (stamps[2].1 - stamps[1].1).as_millis(),
        SETTLE_MS
    );
}

#[test]
fn launch_keeps_the_caller_responsive() {
    let rec = TimedRecorder::new();
    let before = Instant::now();
    reset::launch(rec.clone(), rec.clone(), rec.clone(), SETTLE_MS as u32);
    let launch_cost = before.elapsed();
    assert!(
        launch_cost < Duration::from_millis(SETTLE_MS),
        "launch took {}ms, must return before the first settle delay",
        launch_cost.as_millis()
    );

    // The detached thread finishes the whole sequence on its own.
    std::thread::sleep(Duration::from_millis(SETTLE_MS * 10));
    let steps: Vec<&str> = rec.stamps().iter().map(|(s, _)| *s).collect();
    assert_eq!(steps, vec!["credentials", "pairing", "restart"]);
}
