//! User entity and its normalizer.
//!
//! One record shape serves both the customer's own profile and the admin
//! list views; the admin endpoints simply expose more of the same fields.

use crate::raw::{RawFlag, RawTimestamp, flag_or, full_name, timestamp_or_none};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular customer.
    #[default]
    User,
    /// Platform administrator.
    Admin,
    /// Content moderator.
    Moderator,
    /// Administrator with user-management rights.
    SuperAdmin,
}

impl Role {
    /// Parse a server role string; unknown values map to [`Role::User`].
    #[must_use]
    pub fn from_raw(value: Option<&str>) -> Self {
        match value.unwrap_or("").trim().to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "moderator" => Self::Moderator,
            "super_admin" | "superadmin" => Self::SuperAdmin,
            _ => Self::User,
        }
    }

    /// The canonical wire string for this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Whether this role grants access to the admin area.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::Moderator | Self::SuperAdmin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A platform user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier.
    pub id: String,
    /// Email address. Empty when withheld.
    pub email: String,
    /// Given name. Empty when unknown.
    pub first_name: String,
    /// Family name. Empty when unknown.
    pub last_name: String,
    /// Display name: explicit when the server sent one, otherwise
    /// synthesized from first and last name. Empty when nothing is known.
    pub name: String,
    /// Phone number. Empty when unknown.
    pub phone: String,
    /// Account role.
    pub role: Role,
    /// Whether the email address has been verified.
    pub is_verified: bool,
    /// Whether the account is enabled. Absent means enabled.
    pub is_active: bool,
    /// Newsletter opt-in.
    pub subscribed_to_newsletter: bool,
    /// Account creation time, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Normalize a raw user record.
    #[must_use]
    pub fn from_raw(raw: RawUser) -> Self {
        Self {
            id: raw.id.or(raw.legacy_id).unwrap_or_default(),
            name: full_name(
                raw.name.as_deref(),
                raw.first_name.as_deref(),
                raw.last_name.as_deref(),
            ),
            email: raw.email.unwrap_or_default(),
            first_name: raw.first_name.unwrap_or_default(),
            last_name: raw.last_name.unwrap_or_default(),
            phone: raw.phone.unwrap_or_default(),
            role: Role::from_raw(raw.role.as_deref()),
            is_verified: flag_or(raw.is_verified.or(raw.verified).as_ref(), false),
            is_active: flag_or(raw.is_active.or(raw.active).as_ref(), true),
            subscribed_to_newsletter: flag_or(
                raw.subscribed_to_newsletter.or(raw.newsletter).as_ref(),
                false,
            ),
            created_at: timestamp_or_none(raw.created_at.as_ref()),
        }
    }
}

/// Raw user record: every field optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawUser {
    /// Identifier.
    pub id: Option<String>,
    /// Legacy identifier.
    #[serde(rename = "_id")]
    pub legacy_id: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Explicit display name.
    pub name: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Role string.
    pub role: Option<String>,
    /// Verified flag under its current name.
    pub is_verified: Option<RawFlag>,
    /// Verified flag under the legacy name.
    pub verified: Option<RawFlag>,
    /// Active flag under its current name.
    pub is_active: Option<RawFlag>,
    /// Active flag under the legacy name.
    pub active: Option<RawFlag>,
    /// Newsletter opt-in under its current name.
    pub subscribed_to_newsletter: Option<RawFlag>,
    /// Newsletter opt-in under the legacy name.
    pub newsletter: Option<RawFlag>,
    /// Account creation time.
    pub created_at: Option<RawTimestamp>,
}
