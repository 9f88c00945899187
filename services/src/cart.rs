//! Cart endpoints.
//!
//! Every mutation returns the server's updated cart, which replaces the
//! client copy wholesale — totals included, verbatim. The client never
//! recomputes pricing.

use crate::error::ServiceError;
use crate::payload::{entity_payload, normalize_entity};
use crate::transport::Transport;
use serde_json::json;
use std::sync::Arc;
use tombola_domain::{Cart, unwrap_envelope};

/// Cart endpoints.
pub struct CartService {
    transport: Arc<dyn Transport>,
}

impl CartService {
    /// Create the service over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    fn cart_from(body: serde_json::Value) -> Result<Cart, ServiceError> {
        let unwrapped = unwrap_envelope(body);
        let entity = entity_payload(&unwrapped.data, "cart")?;
        normalize_entity(entity, Cart::from_raw)
    }

    /// Fetch the current cart.
    ///
    /// # Errors
    ///
    /// [`ServiceError::MissingPayload`] when the response carries no cart;
    /// transport and decode errors pass through.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self) -> Result<Cart, ServiceError> {
        Self::cart_from(self.transport.get("/cart").await?)
    }

    /// Add tickets for a competition.
    ///
    /// # Errors
    ///
    /// [`ServiceError::MissingPayload`] when the response carries no cart;
    /// transport (including validation) and decode errors pass through.
    #[tracing::instrument(skip(self))]
    pub async fn add_item(
        &self,
        competition_id: &str,
        quantity: u32,
    ) -> Result<Cart, ServiceError> {
        let body = json!({"competitionId": competition_id, "quantity": quantity});
        Self::cart_from(self.transport.post("/cart/items", body).await?)
    }

    /// Change the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// [`ServiceError::MissingPayload`] when the response carries no cart;
    /// transport and decode errors pass through.
    #[tracing::instrument(skip(self))]
    pub async fn update_item(&self, item_id: &str, quantity: u32) -> Result<Cart, ServiceError> {
        let body = json!({"quantity": quantity});
        Self::cart_from(
            self.transport
                .put(&format!("/cart/items/{}", urlencoding::encode(item_id)), body)
                .await?,
        )
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// [`ServiceError::MissingPayload`] when the response carries no cart;
    /// transport and decode errors pass through.
    #[tracing::instrument(skip(self))]
    pub async fn remove_item(&self, item_id: &str) -> Result<Cart, ServiceError> {
        Self::cart_from(
            self.transport
                .delete(&format!("/cart/items/{}", urlencoding::encode(item_id)))
                .await?,
        )
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// [`ServiceError::MissingPayload`] when the response carries no cart;
    /// transport and decode errors pass through.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self) -> Result<Cart, ServiceError> {
        Self::cart_from(self.transport.delete("/cart").await?)
    }
}
