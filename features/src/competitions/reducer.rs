//! Reducer for the competitions listing.

use crate::competitions::types::{
    CompetitionFilters, CompetitionPatch, CompetitionsAction, CompetitionsState,
};
use tombola_store::{Effect, Reducer, SmallVec};

/// Environment for the competitions reducer.
///
/// The listing is pure state bookkeeping — fetches happen in caller code
/// and arrive as actions — so there are no dependencies to inject yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompetitionsEnvironment;

/// Reducer for the competitions listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompetitionsReducer;

impl CompetitionsReducer {
    /// Creates a new `CompetitionsReducer`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Merge `patch` into the item with `id` in every location it appears:
    /// the main collection, the featured subset, and the selection. All
    /// three stay consistent within the same transition.
    fn apply_patch(state: &mut CompetitionsState, id: &str, patch: &CompetitionPatch) {
        for item in state.items.iter_mut().filter(|c| c.id == id) {
            patch.apply_to(item);
        }
        for item in state.featured.iter_mut().filter(|c| c.id == id) {
            patch.apply_to(item);
        }
        if let Some(selected) = state.selected.as_mut().filter(|c| c.id == id) {
            patch.apply_to(selected);
        }
    }

    /// Remove the item with `id` from every location. A removed selection
    /// becomes empty.
    fn remove(state: &mut CompetitionsState, id: &str) {
        state.items.retain(|c| c.id != id);
        state.featured.retain(|c| c.id != id);
        if state.selected.as_ref().is_some_and(|c| c.id == id) {
            state.selected = None;
        }
    }
}

impl Reducer for CompetitionsReducer {
    type State = CompetitionsState;
    type Action = CompetitionsAction;
    type Environment = CompetitionsEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CompetitionsAction::SetItems { items } => {
                state.items = items;
            },
            CompetitionsAction::SetFeatured { items } => {
                state.featured = items;
            },
            CompetitionsAction::Select { competition } => {
                state.selected = competition;
            },
            CompetitionsAction::Insert { competition } => {
                state.items.insert(0, competition);
            },
            CompetitionsAction::Update { id, patch } => {
                Self::apply_patch(state, &id, &patch);
            },
            CompetitionsAction::Remove { id } => {
                Self::remove(state, &id);
            },
            CompetitionsAction::SetFilters { patch } => {
                state.filters.merge(patch);
                // Prior pagination is meaningless under new filters.
                state.current_page = 1;
            },
            CompetitionsAction::ClearFilters => {
                state.filters = CompetitionFilters::default();
                state.current_page = 1;
            },
            CompetitionsAction::SetSearchQuery { query } => {
                state.search_query = query;
                state.current_page = 1;
            },
            CompetitionsAction::SetLoading { loading } => {
                state.loading = loading;
            },
            CompetitionsAction::SetError { error } => {
                state.error = error;
            },
            CompetitionsAction::SetPagination { pagination } => {
                state.set_pagination(pagination);
            },
            CompetitionsAction::Reset => {
                *state = CompetitionsState::default();
            },
        }

        SmallVec::new()
    }
}
