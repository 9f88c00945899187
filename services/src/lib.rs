//! # Tombola Services
//!
//! Thin wrappers over the upstream API for the Tombola client core. Each
//! service owns one concern and follows the same three steps:
//!
//! 1. issue the request through the injected [`transport::Transport`];
//! 2. fold the response through the single envelope seam
//!    ([`tombola_domain::unwrap_envelope`]) and pull the payload from its
//!    wrapper key;
//! 3. normalize into canonical [`tombola_domain`] records.
//!
//! Callers therefore never branch on transport shape or payload shape: they
//! get typed entities or a typed [`error::ServiceError`]. The services hold
//! no state — fetched data goes into the feature stores (or straight to the
//! caller), and the services are constructed with an `Arc<dyn Transport>`
//! wherever they are needed.

/// Cart endpoints.
pub mod cart;
/// Champion (success story) endpoints.
pub mod champions;
/// Competition endpoints and listing queries.
pub mod competitions;
/// Content page endpoints.
pub mod content;
/// Draw endpoints.
pub mod draws;
/// Service error types.
pub mod error;
/// Payload extraction shared by every service.
pub mod payload;
/// The transport boundary.
pub mod transport;

/// User administration endpoints.
pub mod users;

pub use cart::CartService;
pub use champions::ChampionService;
pub use competitions::{CompetitionQuery, CompetitionService};
pub use content::ContentService;
pub use draws::DrawService;
pub use error::ServiceError;
pub use payload::Page;
pub use transport::{Transport, TransportError, TransportFuture};
pub use users::UserService;
