//! Deterministic environment doubles.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tombola_store::{Clock, IdGenerator};

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// A clock pinned to `time`.
    #[must_use]
    pub const fn at(time: DateTime<Utc>) -> Self {
        Self { time }
    }

    /// A clock pinned to an arbitrary but stable instant.
    #[must_use]
    pub fn default_instant() -> Self {
        // 2026-01-01T00:00:00Z
        Self::at(Utc.timestamp_opt(1_767_225_600, 0).single().unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Id generator yielding `"id-1"`, `"id-2"`, ... in order.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    /// A generator starting at `id-1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        format!("id-{}", self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Records every value handed to it, for asserting on applied side effects.
#[derive(Debug, Default)]
pub struct Recorder {
    entries: Mutex<Vec<String>>,
}

impl Recorder {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one entry.
    pub fn record(&self, entry: impl Into<String>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.into());
        }
    }

    /// Everything recorded so far, in order.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}
