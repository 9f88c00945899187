//! Content page endpoints.

use crate::error::ServiceError;
use crate::transport::Transport;
use serde_json::Value;
use std::sync::Arc;
use tombola_domain::{ContentPage, RawContentPage, unwrap_envelope};

/// Content endpoints for the legal and informational pages.
///
/// A successful response with no page payload is a distinct condition from
/// a transport failure: it yields [`ServiceError::PageNotFound`], on which
/// the presenter renders its bundled default copy with a non-fatal inline
/// notice instead of failing the view.
pub struct ContentService {
    transport: Arc<dyn Transport>,
}

impl ContentService {
    /// Create the service over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch the content page named `slug`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::PageNotFound`] when the response holds no page
    /// payload; transport and decode errors pass through.
    #[tracing::instrument(skip(self))]
    pub async fn page(&self, slug: &str) -> Result<ContentPage, ServiceError> {
        let body = self
            .transport
            .get(&format!("/content/{}", urlencoding::encode(slug)))
            .await?;
        let unwrapped = unwrap_envelope(body);

        let Some(page @ Value::Object(_)) = unwrapped.data.get("page") else {
            tracing::debug!(slug, "Content response carried no page payload");
            return Err(ServiceError::PageNotFound);
        };

        let raw: RawContentPage = serde_json::from_value(page.clone())?;
        let mut page = ContentPage::from_raw(raw);
        if page.slug.is_empty() {
            page.slug = slug.to_owned();
        }
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can unwrap

    use super::*;
    use crate::transport::TransportError;
    use crate::transport::test_support::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn page_normalizes_content() {
        let transport = MockTransport::new().on(
            "GET /content/terms",
            json!({
                "success": true,
                "data": {"page": {
                    "slug": "terms",
                    "title": "Terms & Conditions",
                    "content": "Be excellent to each other.",
                    "lastUpdated": "2026-01-15T09:00:00Z"
                }}
            }),
        );
        let service = ContentService::new(Arc::new(transport));

        let page = service.page("terms").await.unwrap();
        assert_eq!(page.title, "Terms & Conditions");
        assert_eq!(page.body, "Be excellent to each other.");
        assert!(page.updated_at.is_some());
    }

    #[tokio::test]
    async fn missing_page_payload_is_not_found_not_a_transport_error() {
        let transport = MockTransport::new().on(
            "GET /content/privacy",
            json!({"success": true, "data": {}, "message": "OK"}),
        );
        let service = ContentService::new(Arc::new(transport));

        assert!(matches!(
            service.page("privacy").await,
            Err(ServiceError::PageNotFound),
        ));
    }

    #[tokio::test]
    async fn transport_failure_stays_a_transport_failure() {
        let transport = MockTransport::new().on_error(
            "GET /content/privacy",
            TransportError::Failed {
                status: None,
                message: "Network unreachable".to_owned(),
            },
        );
        let service = ContentService::new(Arc::new(transport));

        assert!(matches!(
            service.page("privacy").await,
            Err(ServiceError::Transport(_)),
        ));
    }

    #[tokio::test]
    async fn slug_falls_back_to_the_requested_name() {
        let transport = MockTransport::new().on(
            "GET /content/faq",
            json!({"success": true, "data": {"page": {"title": "FAQ", "body": "Q & A"}}}),
        );
        let service = ContentService::new(Arc::new(transport));

        let page = service.page("faq").await.unwrap();
        assert_eq!(page.slug, "faq");
    }
}
