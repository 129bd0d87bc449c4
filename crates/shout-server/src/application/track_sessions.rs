//! Live-session accounting for the server.
//!
//! The gauge is the only process-wide mutable state in the server: every
//! connection handler increments it on entry and decrements it on teardown,
//! and the accept loop never touches it. It exists for observability (the
//! count is logged on every change), not for correctness.
//!
//! # Thread safety
//!
//! The gauge uses an `AtomicUsize`. An atomic read-modify-write is a single
//! indivisible step, so any number of handler tasks can update the count
//! simultaneously without a lock and without losing updates.
//! `Ordering::Relaxed` is sufficient: the count is reporting data, not a
//! synchronisation point between tasks.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Thread-safe count of currently live sessions.
///
/// The count starts at 0, rises by one on each accepted connection, falls by
/// one on each teardown, and can never go negative (a decrement of an
/// already-zero gauge is ignored).
///
/// # Examples
///
/// ```rust
/// use shout_server::application::SessionGauge;
///
/// let gauge = SessionGauge::new();
/// assert_eq!(gauge.increment(), 1);
/// assert_eq!(gauge.decrement(), 0);
/// ```
#[derive(Debug, Default)]
pub struct SessionGauge {
    live: AtomicUsize,
}

impl SessionGauge {
    /// Creates a gauge starting at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a session opening and returns the new live count.
    pub fn increment(&self) -> usize {
        self.live.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Records a session teardown and returns the new live count.
    ///
    /// Saturates at zero: handlers only decrement after their own increment,
    /// so a zero gauge observed here means an accounting bug elsewhere, and
    /// the gauge refuses to go negative over it.
    pub fn decrement(&self) -> usize {
        match self
            .live
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
        {
            Ok(previous) => previous - 1,
            Err(_) => 0,
        }
    }

    /// Returns the current live count.
    ///
    /// By the time the caller uses the value another task may have already
    /// changed it; use it for reporting only.
    pub fn current(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }
}
