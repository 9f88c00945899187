//! # Tombola Testing
//!
//! Testing utilities for Tombola reducers and stores: a fluent
//! Given/When/Then harness for single transitions, effect assertions aware
//! of cancellation keys, and deterministic environment doubles.
//!
//! Every store is a plain value, so tests construct a fresh reducer, state,
//! and environment per case — there is no shared fixture to reset.

/// Deterministic environment doubles.
pub mod doubles;

pub use doubles::{FixedClock, Recorder, SequentialIdGenerator};
pub use reducer_test::{ReducerTest, assertions};
