//! Dependency injection traits.
//!
//! External capabilities a reducer needs are abstracted behind traits and
//! injected via the environment parameter, so tests can substitute
//! deterministic implementations.

use chrono::{DateTime, Utc};

/// Abstracts time for testability.
pub trait Clock: Send + Sync {
    /// The current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Generates collision-resistant identifiers for client-created records
/// (toasts).
pub trait IdGenerator: Send + Sync {
    /// A fresh identifier.
    fn next_id(&self) -> String;
}

/// Production id generator: millisecond timestamp plus a random hex suffix.
///
/// The timestamp makes ids sortable by creation time; the suffix keeps two
/// ids created in the same millisecond distinct.
pub struct RandomIdGenerator {
    clock: std::sync::Arc<dyn Clock>,
}

impl RandomIdGenerator {
    /// Create a generator reading time from `clock`.
    #[must_use]
    pub fn new(clock: std::sync::Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new(std::sync::Arc::new(SystemClock))
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        use rand::Rng;

        let suffix: u32 = rand::thread_rng().r#gen();
        format!("{}-{suffix:08x}", self.clock.now().timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_are_distinct() {
        let ids = RandomIdGenerator::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn id_carries_a_timestamp_prefix() {
        let ids = RandomIdGenerator::default();
        let id = ids.next_id();
        let (prefix, suffix) = id.split_once('-').unwrap_or(("", ""));
        assert!(prefix.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), 8);
    }
}
