//! The browsable, filterable competitions listing.
//!
//! State lives in [`types::CompetitionsState`], mutations go through
//! [`reducer::CompetitionsReducer`], and the filters/search/page slice
//! persists across sessions (`KEY = "competitions"`).

/// Reducer and environment.
pub mod reducer;
/// State, filters, patches, and actions.
pub mod types;

pub use reducer::{CompetitionsEnvironment, CompetitionsReducer};
pub use types::{
    CompetitionFilters, CompetitionPatch, CompetitionsAction, CompetitionsSlice,
    CompetitionsState,
};
