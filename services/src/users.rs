//! User administration endpoints.

use crate::error::ServiceError;
use crate::payload::{Page, entity_payload, list_payload, normalize_entity, normalize_list};
use crate::transport::Transport;
use serde_json::json;
use std::sync::Arc;
use tombola_domain::{Pagination, Role, User, unwrap_envelope};

/// User endpoints backing the admin list views.
pub struct UserService {
    transport: Arc<dyn Transport>,
}

impl UserService {
    /// Create the service over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch a page of users.
    ///
    /// # Errors
    ///
    /// [`ServiceError::MissingPayload`] when the response carries no user
    /// list; transport and decode errors pass through.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, page: u32) -> Result<Page<User>, ServiceError> {
        let path = if page > 1 {
            format!("/admin/users?page={page}")
        } else {
            "/admin/users".to_owned()
        };
        let body = self.transport.get(&path).await?;
        let unwrapped = unwrap_envelope(body);

        let items = list_payload(&unwrapped.data, "users")?;
        Ok(Page {
            items: normalize_list(items, User::from_raw)?,
            pagination: Pagination::from_meta(unwrapped.meta.as_ref()),
        })
    }

    /// Change a user's role.
    ///
    /// # Errors
    ///
    /// [`ServiceError::MissingPayload`] when the response carries no user;
    /// transport and decode errors pass through.
    #[tracing::instrument(skip(self))]
    pub async fn update_role(&self, id: &str, role: Role) -> Result<User, ServiceError> {
        let body = json!({"role": role.as_str()});
        let response = self
            .transport
            .put(&format!("/admin/users/{}/role", urlencoding::encode(id)), body)
            .await?;
        let unwrapped = unwrap_envelope(response);
        let entity = entity_payload(&unwrapped.data, "user")?;
        normalize_entity(entity, User::from_raw)
    }

    /// Enable or disable a user account.
    ///
    /// # Errors
    ///
    /// [`ServiceError::MissingPayload`] when the response carries no user;
    /// transport and decode errors pass through.
    #[tracing::instrument(skip(self))]
    pub async fn set_active(&self, id: &str, active: bool) -> Result<User, ServiceError> {
        let body = json!({"isActive": active});
        let response = self
            .transport
            .put(&format!("/admin/users/{}/status", urlencoding::encode(id)), body)
            .await?;
        let unwrapped = unwrap_envelope(response);
        let entity = entity_payload(&unwrapped.data, "user")?;
        normalize_entity(entity, User::from_raw)
    }
}
