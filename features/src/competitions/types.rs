//! State, filters, and actions for the competitions listing.

use serde::{Deserialize, Serialize};
use tombola_domain::{Competition, CompetitionStatus, ImageDescriptor, Pagination};
use tombola_store::PersistedState;

/// Active listing filters. All dimensions optional; an unset dimension
/// does not constrain the listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompetitionFilters {
    /// Category to show.
    pub category: Option<String>,
    /// Status to show.
    pub status: Option<CompetitionStatus>,
    /// Minimum ticket price.
    pub min_price: Option<f64>,
    /// Maximum ticket price.
    pub max_price: Option<f64>,
    /// Minimum prize value.
    pub min_prize: Option<f64>,
    /// Maximum prize value.
    pub max_prize: Option<f64>,
    /// Show only featured competitions.
    pub featured: Option<bool>,
}

impl CompetitionFilters {
    /// Shallow-merge `patch` into these filters: a `Some` dimension in the
    /// patch overwrites, a `None` dimension leaves the existing value.
    /// Clearing a dimension goes through
    /// [`CompetitionsAction::ClearFilters`].
    pub fn merge(&mut self, patch: Self) {
        if patch.category.is_some() {
            self.category = patch.category;
        }
        if patch.status.is_some() {
            self.status = patch.status;
        }
        if patch.min_price.is_some() {
            self.min_price = patch.min_price;
        }
        if patch.max_price.is_some() {
            self.max_price = patch.max_price;
        }
        if patch.min_prize.is_some() {
            self.min_prize = patch.min_prize;
        }
        if patch.max_prize.is_some() {
            self.max_prize = patch.max_prize;
        }
        if patch.featured.is_some() {
            self.featured = patch.featured;
        }
    }

    /// Whether no dimension is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.status.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.min_prize.is_none()
            && self.max_prize.is_none()
            && self.featured.is_none()
    }
}

/// Partial update for one competition, applied by
/// [`CompetitionsAction::Update`]. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompetitionPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New prize headline.
    pub prize: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New ticket price.
    pub ticket_price: Option<f64>,
    /// New ticket cap.
    pub max_tickets: Option<u32>,
    /// New sold count — the field that changes most, as tickets sell.
    pub sold_tickets: Option<u32>,
    /// New status.
    pub status: Option<CompetitionStatus>,
    /// New featured flag.
    pub featured: Option<bool>,
    /// Replacement image list.
    pub images: Option<Vec<ImageDescriptor>>,
}

impl CompetitionPatch {
    /// Write the `Some` fields onto `competition`.
    pub fn apply_to(&self, competition: &mut Competition) {
        if let Some(title) = &self.title {
            competition.title = title.clone();
        }
        if let Some(description) = &self.description {
            competition.description = description.clone();
        }
        if let Some(prize) = &self.prize {
            competition.prize = prize.clone();
        }
        if let Some(category) = &self.category {
            competition.category = category.clone();
        }
        if let Some(ticket_price) = self.ticket_price {
            competition.ticket_price = ticket_price;
        }
        if let Some(max_tickets) = self.max_tickets {
            competition.max_tickets = max_tickets;
        }
        if let Some(sold_tickets) = self.sold_tickets {
            competition.sold_tickets = sold_tickets;
        }
        if let Some(status) = self.status {
            competition.status = status;
        }
        if let Some(featured) = self.featured {
            competition.featured = featured;
        }
        if let Some(images) = &self.images {
            competition.images = images.clone();
        }
    }
}

/// State for the browsable, filterable competitions listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitionsState {
    /// Current page of competitions, newest first.
    pub items: Vec<Competition>,
    /// Featured subset shown on the home page.
    pub featured: Vec<Competition>,
    /// Currently-selected competition (detail view), if any.
    pub selected: Option<Competition>,
    /// Active filters.
    pub filters: CompetitionFilters,
    /// Free-text search query.
    pub search_query: String,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Last fetch error, if any.
    pub error: Option<String>,
    /// Current page, 1-based.
    pub current_page: u32,
    /// Total pages for the active filters.
    pub total_pages: u32,
    /// Total competitions for the active filters.
    pub total_count: u64,
}

impl Default for CompetitionsState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            featured: Vec::new(),
            selected: None,
            filters: CompetitionFilters::default(),
            search_query: String::new(),
            loading: false,
            error: None,
            current_page: 1,
            total_pages: 1,
            total_count: 0,
        }
    }
}

impl CompetitionsState {
    /// The item with `id` from the main collection, if present.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Competition> {
        self.items.iter().find(|c| c.id == id)
    }

    /// Apply the pagination counters from a fetched page.
    pub const fn set_pagination(&mut self, pagination: Pagination) {
        self.current_page = pagination.page;
        self.total_pages = pagination.total_pages;
        self.total_count = pagination.total_count;
    }
}

/// The persisted slice of [`CompetitionsState`]: browsing intent only.
/// Collections, loading, and errors are always refetched fresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompetitionsSlice {
    /// Active filters.
    pub filters: CompetitionFilters,
    /// Free-text search query.
    pub search_query: String,
    /// Current page.
    pub current_page: u32,
}

impl PersistedState for CompetitionsState {
    type Slice = CompetitionsSlice;
    const KEY: &'static str = "competitions";

    fn capture(&self) -> CompetitionsSlice {
        CompetitionsSlice {
            filters: self.filters.clone(),
            search_query: self.search_query.clone(),
            current_page: self.current_page,
        }
    }

    fn restore(&mut self, slice: CompetitionsSlice) {
        self.filters = slice.filters;
        self.search_query = slice.search_query;
        self.current_page = slice.current_page.max(1);
    }
}

/// Transitions the competitions listing supports. Each is one atomic state
/// change; none of them produce effects.
#[derive(Debug, Clone)]
pub enum CompetitionsAction {
    /// Replace the main collection with a fetched page.
    SetItems {
        /// The new page of competitions.
        items: Vec<Competition>,
    },
    /// Replace the featured subset.
    SetFeatured {
        /// The new featured competitions.
        items: Vec<Competition>,
    },
    /// Select a competition for the detail view, or clear the selection.
    Select {
        /// The competition to select, `None` to clear.
        competition: Option<Competition>,
    },
    /// Prepend a newly-created competition (newest-first ordering).
    Insert {
        /// The competition to prepend.
        competition: Competition,
    },
    /// Merge partial fields into the competition with `id` wherever it
    /// appears: main collection, featured subset, and selection, all in
    /// the same transition.
    Update {
        /// Target competition id.
        id: String,
        /// Fields to overwrite.
        patch: CompetitionPatch,
    },
    /// Remove the competition with `id` from all three locations. If it
    /// was selected, the selection becomes empty.
    Remove {
        /// Target competition id.
        id: String,
    },
    /// Shallow-merge filters. Resets the page to 1 — a filter change
    /// invalidates prior pagination.
    SetFilters {
        /// Dimensions to overwrite.
        patch: CompetitionFilters,
    },
    /// Reset to the empty filter set and page 1.
    ClearFilters,
    /// Set the free-text search query. Resets the page to 1.
    SetSearchQuery {
        /// The new query.
        query: String,
    },
    /// Set the loading flag.
    SetLoading {
        /// Whether a fetch is in flight.
        loading: bool,
    },
    /// Set or clear the error message.
    SetError {
        /// The error to show, `None` to clear.
        error: Option<String>,
    },
    /// Apply pagination counters as one atomic update.
    SetPagination {
        /// The counters from the fetched page.
        pagination: Pagination,
    },
    /// Return every field to its initial value.
    Reset,
}
