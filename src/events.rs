//! Server-callback-to-main-loop event queue.
//!
//! Exactly one producer and one consumer:
//!
//! - **Producer**: the accessory server's task. Its characteristic-write
//!   and identify callbacks push here instead of touching the dispatcher.
//! - **Consumer**: the main loop, which drains the queue once per sample
//!   tick and applies the commands.
//!
//! Work that originates in the main loop itself (button gestures, the
//! network-ready transition) is dispatched directly — it already runs in
//! the consumer's context, and pushing it here would add a second
//! producer and break the SPSC discipline the buffer relies on.
//!
//! That single-producer/single-consumer rule is also what makes the
//! relay state race-free: the dispatcher service that owns the state is
//! touched exclusively from the consumer side, so the
//! read-negate-write-notify sequence can never interleave with a second
//! writer.
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Accessory server │────▶│  Event Queue │────▶│  Main Loop   │
//! │ (producer task)  │     │  (lock-free) │     │  (consumer)  │
//! └──────────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

/// Maximum number of pending events.
/// Power of 2 for efficient ring buffer modulo.
const EVENT_QUEUE_CAP: usize = 16;

/// Commands crossing from the accessory server's task into the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    /// A paired client wrote the On characteristic to true.
    RemoteSetOn = 0,
    /// A paired client wrote the On characteristic to false.
    RemoteSetOff = 1,
    /// The accessory server received an identify request.
    IdentifyRequested = 2,
}

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// Server callbacks write (produce), main loop reads (consume).
// Uses atomic head/tail indices.  The buffer is intentionally kept in
// a static so C-ABI server callbacks can reach it without a handle.

static EVENT_HEAD: AtomicU8 = AtomicU8::new(0);
static EVENT_TAIL: AtomicU8 = AtomicU8::new(0);
// SAFETY: EVENT_BUFFER is accessed under the SPSC discipline enforced by
// the head/tail atomics: push_event (server task, single producer)
// writes a slot before publishing it via EVENT_HEAD with Release;
// pop_event (main loop, single consumer) reads slots only after
// observing the head with Acquire.
static mut EVENT_BUFFER: [u8; EVENT_QUEUE_CAP] = [0; EVENT_QUEUE_CAP];

/// Push an event into the queue.
/// Must only be called from the single producer context — the accessory
/// server's callbacks.  Returns `false` if the queue is full (event
/// dropped).
pub fn push_event(event: Event) -> bool {
    let head = EVENT_HEAD.load(Ordering::Relaxed);
    let tail = EVENT_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Queue full — drop event.
    }

    // SAFETY: slot `head` is outside the published [tail, head) window
    // until the store below, so the consumer cannot read it yet.
    unsafe {
        EVENT_BUFFER[head as usize] = event as u8;
    }

    EVENT_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next event from the queue.
/// Called from the main loop (single consumer).
/// Returns `None` if the queue is empty.
pub fn pop_event() -> Option<Event> {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    // SAFETY: slot `tail` was published by a Release store of EVENT_HEAD;
    // the Acquire load above makes its contents visible.
    let raw = unsafe { EVENT_BUFFER[tail as usize] };
    EVENT_TAIL.store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

    event_from_u8(raw)
}

/// Drain all pending events into a callback, FIFO order.
pub fn drain_events(mut handler: impl FnMut(Event)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}

// ── Internal ──────────────────────────────────────────────────

fn event_from_u8(raw: u8) -> Option<Event> {
    match raw {
        0 => Some(Event::RemoteSetOn),
        1 => Some(Event::RemoteSetOff),
        2 => Some(Event::IdentifyRequested),
        _ => None,
    }
}

/// The queue is a process-wide static; unit tests across modules that
/// push to it must serialise on this lock.
#[cfg(test)]
pub(crate) static TEST_QUEUE_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
