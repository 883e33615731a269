//! Monotonic time source.
//!
//! All gesture timing (debounce windows, the long-press threshold) is
//! measured against this clock, never against wall time.  The
//! millisecond counter wraps after ~49 days; consumers compare instants
//! with `wrapping_sub`, so the wrap is harmless.

/// Microseconds since boot.
#[cfg(target_os = "espidf")]
pub fn uptime_us() -> u64 {
    // SAFETY: esp_timer_get_time is callable from any task after the
    // timer subsystem starts, which happens before app_main.
    unsafe { esp_idf_svc::sys::esp_timer_get_time() as u64 }
}

#[cfg(not(target_os = "espidf"))]
pub fn uptime_us() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;
    static BOOT: OnceLock<Instant> = OnceLock::new();
    BOOT.get_or_init(Instant::now).elapsed().as_micros() as u64
}

/// Milliseconds since boot, truncated to u32 (wraps after ~49.7 days).
pub fn uptime_ms() -> u32 {
    (uptime_us() / 1000) as u32
}
