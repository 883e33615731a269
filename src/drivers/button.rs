//! Button event classifier.
//!
//! ## Hardware
//!
//! Active-low momentary switch with external pull-up, polled at the
//! sample tick.  The raw level runs through the [`Debouncer`] first;
//! only confirmed edges reach the classifier.
//!
//! ## Gesture detection
//!
//! | Gesture      | Condition                          | Event          |
//! |--------------|------------------------------------|----------------|
//! | Single press | Release before the 10 s threshold  | `SinglePress`  |
//! | Long press   | Held across the 10 s threshold     | `LongPress`    |
//!
//! A long press fires at the instant the threshold is crossed — not at
//! release — so the factory-reset action starts while the operator is
//! still holding the button.  The release that eventually follows emits
//! nothing; the action already happened.

use crate::config::SwitchConfig;
use crate::drivers::debounce::{Debouncer, Edge, Level};

/// Button events emitted after classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    SinglePress,
    LongPress,
}

/// Classifier state, one press cycle at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressState {
    Idle,
    /// Debounced press in progress; `since_ms` anchors the press timer.
    Pressed { since_ms: u32 },
    /// Long press already emitted; waiting for release, nothing more fires.
    HeldConfirmed,
}

/// Turns debounced edges plus elapsed time into at most one event per
/// press cycle.
#[derive(Debug)]
pub struct ButtonClassifier {
    state: PressState,
    long_press_ms: u32,
}

impl ButtonClassifier {
    pub fn new(long_press_ms: u32) -> Self {
        Self {
            state: PressState::Idle,
            long_press_ms,
        }
    }

    /// Feed a confirmed edge.  `now_ms` is monotonic milliseconds.
    pub fn on_edge(&mut self, edge: Edge, now_ms: u32) -> Option<ButtonEvent> {
        match (self.state, edge) {
            (PressState::Idle, Edge::Rising) => {
                self.state = PressState::Pressed { since_ms: now_ms };
                None
            }
            (PressState::Pressed { since_ms }, Edge::Falling) => {
                self.state = PressState::Idle;
                if now_ms.wrapping_sub(since_ms) < self.long_press_ms {
                    Some(ButtonEvent::SinglePress)
                } else {
                    // Threshold crossed between polls; classify as the
                    // long press that poll() would have emitted.
                    Some(ButtonEvent::LongPress)
                }
            }
            (PressState::HeldConfirmed, Edge::Falling) => {
                // Long press already fired; release closes the cycle silently.
                self.state = PressState::Idle;
                None
            }
            // Spurious edges (re-assert while held, release while idle):
            // log-worthy at most, never a state change.
            _ => None,
        }
    }

    /// Periodic check while no edge occurred: emits `LongPress` exactly
    /// once at the instant the hold crosses the threshold.
    pub fn poll(&mut self, now_ms: u32) -> Option<ButtonEvent> {
        if let PressState::Pressed { since_ms } = self.state {
            if now_ms.wrapping_sub(since_ms) >= self.long_press_ms {
                self.state = PressState::HeldConfirmed;
                return Some(ButtonEvent::LongPress);
            }
        }
        None
    }

    /// Whether a press cycle is in progress.
    pub fn is_pressed(&self) -> bool {
        !matches!(self.state, PressState::Idle)
    }
}

// ── Combined driver ───────────────────────────────────────────

/// Debouncer + classifier behind a single per-tick call for the main loop.
pub struct ButtonDriver {
    active_low: bool,
    debouncer: Debouncer,
    classifier: ButtonClassifier,
}

impl ButtonDriver {
    pub fn new(config: &SwitchConfig) -> Self {
        Self {
            active_low: config.button_active_low,
            debouncer: Debouncer::new(config.debounce_samples),
            classifier: ButtonClassifier::new(config.long_press_ms),
        }
    }

    /// Call at each sample tick with the raw line level.
    /// `now_ms` is monotonic milliseconds.
    pub fn tick(&mut self, raw_high: bool, now_ms: u32) -> Option<ButtonEvent> {
        let asserted = raw_high != self.active_low;
        let raw = if asserted {
            Level::Asserted
        } else {
            Level::Released
        };

        match self.debouncer.sample(raw) {
            Some(edge) => self.classifier.on_edge(edge, now_ms),
            None => self.classifier.poll(now_ms),
        }
    }
}
