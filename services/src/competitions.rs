//! Competition endpoints.

use crate::error::ServiceError;
use crate::payload::{Page, entity_payload, list_payload, normalize_entity, normalize_list};
use crate::transport::Transport;
use serde::Serialize;
use std::sync::Arc;
use tombola_domain::{Competition, CompetitionStatus, Pagination, unwrap_envelope};

/// Query parameters for the competitions listing.
///
/// Filtering happens server-side; the client store only remembers the
/// active dimensions and replays them here. Serializes straight into the
/// query string — unset dimensions are omitted, as is page 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionQuery {
    /// Page to fetch, 1-based.
    #[serde(skip_serializing_if = "is_first_page")]
    pub page: u32,
    /// Page size override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Category filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Status filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CompetitionStatus>,
    /// Minimum ticket price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    /// Maximum ticket price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    /// Minimum prize value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_prize: Option<f64>,
    /// Maximum prize value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_prize: Option<f64>,
    /// Featured-only flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    /// Free-text search.
    #[serde(skip_serializing_if = "blank_search")]
    pub search: Option<String>,
}

fn is_first_page(page: &u32) -> bool {
    *page == 1
}

fn blank_search(search: &Option<String>) -> bool {
    search.as_deref().is_none_or(str::is_empty)
}

impl Default for CompetitionQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: None,
            category: None,
            status: None,
            min_price: None,
            max_price: None,
            min_prize: None,
            max_prize: None,
            featured: None,
            search: None,
        }
    }
}

impl CompetitionQuery {
    /// The first page with no filters.
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self {
            page: page.max(1),
            ..Self::default()
        }
    }

    /// Render as a query string, leading `?` included; empty when every
    /// dimension is unset and the page is 1.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) if !query.is_empty() => format!("?{query}"),
            Ok(_) | Err(_) => String::new(),
        }
    }
}

/// Competition endpoints: listing, featured subset, and detail fetch.
pub struct CompetitionService {
    transport: Arc<dyn Transport>,
}

impl CompetitionService {
    /// Create the service over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch a page of competitions for `query`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::MissingPayload`] when the response carries no
    /// competition list; transport and decode errors pass through.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, query: &CompetitionQuery) -> Result<Page<Competition>, ServiceError> {
        let path = format!("/competitions{}", query.to_query_string());
        let body = self.transport.get(&path).await?;
        let unwrapped = unwrap_envelope(body);

        let items = list_payload(&unwrapped.data, "competitions")?;
        Ok(Page {
            items: normalize_list(items, Competition::from_raw)?,
            pagination: Pagination::from_meta(unwrapped.meta.as_ref()),
        })
    }

    /// Fetch the featured competitions for the home page.
    ///
    /// # Errors
    ///
    /// [`ServiceError::MissingPayload`] when the response carries no
    /// competition list; transport and decode errors pass through.
    #[tracing::instrument(skip(self))]
    pub async fn featured(&self) -> Result<Vec<Competition>, ServiceError> {
        let body = self.transport.get("/competitions/featured").await?;
        let unwrapped = unwrap_envelope(body);
        let items = list_payload(&unwrapped.data, "competitions")?;
        normalize_list(items, Competition::from_raw)
    }

    /// Fetch one competition by id or slug.
    ///
    /// # Errors
    ///
    /// [`ServiceError::MissingPayload`] when the response carries no
    /// competition; transport and decode errors pass through.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id_or_slug: &str) -> Result<Competition, ServiceError> {
        let body = self
            .transport
            .get(&format!("/competitions/{}", urlencoding::encode(id_or_slug)))
            .await?;
        let unwrapped = unwrap_envelope(body);
        let entity = entity_payload(&unwrapped.data, "competition")?;
        normalize_entity(entity, Competition::from_raw)
    }
}
