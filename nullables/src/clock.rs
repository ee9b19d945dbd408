//! Nullable clock: deterministic time for testing.

use std::sync::atomic::{AtomicI64, Ordering};

use doppelcheck_types::{Clock, Timestamp};

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: AtomicI64,
}

impl NullClock {
    pub fn new(initial_secs: i64) -> Self {
        Self {
            current: AtomicI64::new(Timestamp::from_secs(initial_secs).as_micros()),
        }
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: i64) {
        self.current.fetch_add(secs * 1_000_000, Ordering::SeqCst);
    }

    /// Set the time to a specific value.
    pub fn set(&self, secs: i64) {
        self.current
            .store(Timestamp::from_secs(secs).as_micros(), Ordering::SeqCst);
    }
}

impl Default for NullClock {
    /// 2026-01-01T00:00:00Z
    fn default() -> Self {
        Self::new(1_767_225_600)
    }
}

impl Clock for NullClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_micros(self.current.load(Ordering::SeqCst))
    }
}
