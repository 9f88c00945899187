//! # Tombola Features
//!
//! The two client-side state machines of the Tombola front-end, built on
//! [`tombola_store`]:
//!
//! - [`competitions`] — the browsable, filterable competitions listing:
//!   collection, featured subset, selection, filters, search, and
//!   pagination, kept consistent under a fixed action set.
//! - [`ui`] — cross-cutting UI state: appearance, modals, toasts with
//!   cancellable auto-dismiss timers, keyed loading flags, and preferences.
//!
//! Each feature nominates a persisted slice (browsing intent, appearance
//! preferences); collections and transient UI state are rebuilt fresh every
//! session. Stores are constructed per instance and injected — features
//! never reach for a global.

/// Competitions listing state machine.
pub mod competitions;
/// Cross-cutting UI state machine.
pub mod ui;
