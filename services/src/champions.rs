//! Champion (success story) endpoints.

use crate::error::ServiceError;
use crate::payload::{Page, list_payload, normalize_list};
use crate::transport::Transport;
use std::sync::Arc;
use tombola_domain::{Champion, Pagination, unwrap_envelope};

/// Champion endpoints: curated winner stories for the marketing pages.
pub struct ChampionService {
    transport: Arc<dyn Transport>,
}

impl ChampionService {
    /// Create the service over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch a page of champions.
    ///
    /// # Errors
    ///
    /// [`ServiceError::MissingPayload`] when the response carries no
    /// champion list; transport and decode errors pass through.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, page: u32) -> Result<Page<Champion>, ServiceError> {
        let path = if page > 1 {
            format!("/champions?page={page}")
        } else {
            "/champions".to_owned()
        };
        let body = self.transport.get(&path).await?;
        let unwrapped = unwrap_envelope(body);

        let items = list_payload(&unwrapped.data, "champions")?;
        Ok(Page {
            items: normalize_list(items, Champion::from_raw)?,
            pagination: Pagination::from_meta(unwrapped.meta.as_ref()),
        })
    }

    /// Fetch the featured stories for the home page.
    ///
    /// # Errors
    ///
    /// [`ServiceError::MissingPayload`] when the response carries no
    /// champion list; transport and decode errors pass through.
    #[tracing::instrument(skip(self))]
    pub async fn featured(&self) -> Result<Vec<Champion>, ServiceError> {
        let body = self.transport.get("/champions/featured").await?;
        let unwrapped = unwrap_envelope(body);
        let items = list_payload(&unwrapped.data, "champions")?;
        normalize_list(items, Champion::from_raw)
    }
}
