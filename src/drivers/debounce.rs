//! GPIO input debouncer.
//!
//! Pure sample filter: feed it the raw level at a fixed sampling interval
//! and it reports a single [`Edge`] the instant the raw level has been
//! stable for N consecutive samples.  Mechanical contact bounce shorter
//! than the window never produces an edge; neither does a press that is
//! released before the window fills.

/// Logical level of the button line after active-low correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Released,
    Asserted,
}

/// A confirmed, debounced transition of the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Released → Asserted (press).
    Rising,
    /// Asserted → Released (release).
    Falling,
}

/// N-consecutive-stable-samples debounce filter.
#[derive(Debug)]
pub struct Debouncer {
    /// Last confirmed level.
    stable: Level,
    /// Level the current run of samples agrees on.
    candidate: Level,
    /// Length of the current agreeing run.
    run: u8,
    /// Samples required to confirm a transition.
    required: u8,
}

impl Debouncer {
    /// `required_samples` must be at least 1; the line starts Released.
    pub fn new(required_samples: u8) -> Self {
        Self {
            stable: Level::Released,
            candidate: Level::Released,
            run: 0,
            required: required_samples.max(1),
        }
    }

    /// Last confirmed level.
    pub fn level(&self) -> Level {
        self.stable
    }

    /// Feed one raw sample.  Returns an edge only at the instant a new
    /// level is confirmed — not on every sample at that level.
    pub fn sample(&mut self, raw: Level) -> Option<Edge> {
        if raw == self.stable {
            // Back at the confirmed level; any partial run was noise.
            self.candidate = raw;
            self.run = 0;
            return None;
        }

        if raw == self.candidate {
            self.run = self.run.saturating_add(1);
        } else {
            self.candidate = raw;
            self.run = 1;
        }

        if self.run >= self.required {
            self.stable = raw;
            self.run = 0;
            return Some(match raw {
                Level::Asserted => Edge::Rising,
                Level::Released => Edge::Falling,
            });
        }

        None
    }
}
