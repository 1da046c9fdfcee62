//! `Clock` implementations.
//!
//! `SystemClock` reads UTC wall-clock time. `ManualClock` is driven by the
//! caller and is what tests and scenario replays use.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use pluto_contracts::time::Timestamp;

use crate::traits::Clock;

/// Wall-clock time in whole seconds since the Unix epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // Pre-epoch clocks clamp to zero.
        Timestamp::new(u64::try_from(Utc::now().timestamp()).unwrap_or(0))
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    secs: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            secs: AtomicU64::new(start.as_secs()),
        }
    }

    /// Move the clock forward by `secs`.
    pub fn advance(&self, secs: u64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }

    /// Jump to an absolute time. Tests use this to replay fixed timelines.
    pub fn set(&self, to: Timestamp) {
        self.secs.store(to.as_secs(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.secs.load(Ordering::SeqCst))
    }
}
