//! Draw endpoints.

use crate::error::ServiceError;
use crate::payload::{Page, list_payload, normalize_list};
use crate::transport::Transport;
use std::sync::Arc;
use tombola_domain::{Draw, Pagination, unwrap_envelope};

/// Draw endpoints: the public results listing.
pub struct DrawService {
    transport: Arc<dyn Transport>,
}

impl DrawService {
    /// Create the service over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch a page of past draws, newest first.
    ///
    /// # Errors
    ///
    /// [`ServiceError::MissingPayload`] when the response carries no draw
    /// list; transport and decode errors pass through.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, page: u32) -> Result<Page<Draw>, ServiceError> {
        let path = if page > 1 {
            format!("/draws?page={page}")
        } else {
            "/draws".to_owned()
        };
        let body = self.transport.get(&path).await?;
        let unwrapped = unwrap_envelope(body);

        let items = list_payload(&unwrapped.data, "draws")?;
        Ok(Page {
            items: normalize_list(items, Draw::from_raw)?,
            pagination: Pagination::from_meta(unwrapped.meta.as_ref()),
        })
    }

    /// Fetch the most recent draws for the home page strip.
    ///
    /// # Errors
    ///
    /// [`ServiceError::MissingPayload`] when the response carries no draw
    /// list; transport and decode errors pass through.
    #[tracing::instrument(skip(self))]
    pub async fn latest(&self) -> Result<Vec<Draw>, ServiceError> {
        let body = self.transport.get("/draws/latest").await?;
        let unwrapped = unwrap_envelope(body);
        let items = list_payload(&unwrapped.data, "draws")?;
        normalize_list(items, Draw::from_raw)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can unwrap

    use super::*;
    use crate::transport::test_support::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn list_resolves_dual_shape_relations() {
        let transport = MockTransport::new().on(
            "GET /draws",
            json!({
                "success": true,
                "data": {"draws": [
                    {"_id": "d1", "competition": {"_id": "c1", "title": "Dream Car"},
                     "winner": {"_id": "u1", "firstName": "Ada", "lastName": "Lovelace"}},
                    {"_id": "d2", "competition": "c2", "winner": "u2"}
                ]},
                "meta": {"pagination": {"page": 1, "totalPages": 1, "totalCount": 2}}
            }),
        );
        let service = DrawService::new(Arc::new(transport));

        let page = service.list(1).await.unwrap();
        assert_eq!(page.items[0].competition_id, "c1");
        assert_eq!(page.items[0].competition_title.as_deref(), Some("Dream Car"));
        assert_eq!(page.items[0].winner_name, "Ada Lovelace");
        assert_eq!(page.items[1].competition_id, "c2");
        assert_eq!(page.items[1].competition_title, None);
        assert!(page.items[1].active);
    }

    #[tokio::test]
    async fn page_two_is_requested_explicitly() {
        let transport = MockTransport::new().on(
            "GET /draws?page=2",
            json!({"success": true, "data": {"draws": []}}),
        );
        let service = DrawService::new(Arc::new(transport));

        let page = service.list(2).await.unwrap();
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn latest_signals_structural_absence() {
        let transport = MockTransport::new().on(
            "GET /draws/latest",
            json!({"success": true, "data": {}}),
        );
        let service = DrawService::new(Arc::new(transport));

        assert!(matches!(
            service.latest().await,
            Err(ServiceError::MissingPayload { key: "draws" }),
        ));
    }
}
