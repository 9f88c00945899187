//! # Tombola Domain
//!
//! Canonical entities and payload normalization for the Tombola client core.
//!
//! The upstream API is loosely typed: fields go missing, change names
//! between endpoint versions, and relations arrive either populated or as
//! bare ids. This crate turns those payloads into fully-populated canonical
//! records with guaranteed field presence and types, so nothing downstream
//! ever branches on payload shape or meets an `undefined` numeric.
//!
//! ## Contract
//!
//! - **Pure**: normalizers take a raw record and return a canonical one.
//!   No I/O, no mutation of the input.
//! - **Total**: a missing or malformed field degrades to a documented
//!   default (`0` for numbers, `""` for strings, closed-enum defaults for
//!   statuses and roles). Normalization never fails; only the *structural*
//!   absence of a whole payload is an error, and that is signalled one
//!   layer up in the service wrappers.
//! - **Idempotent**: normalizing an already-canonical record yields an
//!   identical record. Call sites re-normalize denormalized snapshots, so
//!   this is load-bearing, and every entity has a test pinning it.
//!
//! ## Raw shapes
//!
//! Raw records model every field as optional ([`raw`] has the shared shape
//! vocabulary), so each normalization branch handles absence explicitly and
//! the unrecognized-shape path is a real, tested branch rather than an
//! accident of optional chaining.

/// Cart, cart item, and server-computed totals.
pub mod cart;
/// Winner success stories.
pub mod champion;
/// Prize competitions: status, images, skill question.
pub mod competition;
/// Legal/informational content pages.
pub mod content;
/// Prize draws.
pub mod draw;
/// Transport envelope unwrapping and pagination metadata.
pub mod envelope;
/// Shared raw shape vocabulary and coercion helpers.
pub mod raw;
/// Users and roles.
pub mod user;

pub use cart::{Cart, CartItem, CartTotals, RawCart, RawCartItem, RawCartTotals};
pub use champion::{Champion, RawChampion};
pub use competition::{
    Competition, CompetitionStatus, ImageDescriptor, Question, RawCompetition, RawQuestion,
};
pub use content::{ContentPage, RawContentPage};
pub use draw::{Draw, RawDraw};
pub use envelope::{Pagination, Unwrapped, unwrap_envelope};
pub use user::{RawUser, Role, User};
