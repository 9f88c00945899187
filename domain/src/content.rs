//! Legal/informational content pages.

use crate::raw::{RawTimestamp, timestamp_or_none};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named legal or informational page (terms, privacy, FAQ, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPage {
    /// Page slug, e.g. `terms` or `privacy`.
    pub slug: String,
    /// Page title.
    pub title: String,
    /// Page body, as server-rendered markup or markdown.
    pub body: String,
    /// Last edit time, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ContentPage {
    /// Normalize a raw content page record.
    #[must_use]
    pub fn from_raw(raw: RawContentPage) -> Self {
        Self {
            slug: raw.slug.unwrap_or_default(),
            title: raw.title.unwrap_or_default(),
            body: raw.body.or(raw.content).unwrap_or_default(),
            updated_at: timestamp_or_none(raw.updated_at.or(raw.last_updated).as_ref()),
        }
    }
}

/// Raw content page record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawContentPage {
    /// Page slug.
    pub slug: Option<String>,
    /// Page title.
    pub title: Option<String>,
    /// Body under its current name.
    pub body: Option<String>,
    /// Body under the legacy name.
    pub content: Option<String>,
    /// Last edit time.
    pub updated_at: Option<RawTimestamp>,
    /// Last edit time under the legacy name.
    pub last_updated: Option<RawTimestamp>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can unwrap

    use super::*;
    use serde_json::json;

    #[test]
    fn body_resolves_from_either_name() {
        let page: RawContentPage =
            serde_json::from_value(json!({"slug": "terms", "content": "Legacy body"})).unwrap();
        assert_eq!(ContentPage::from_raw(page).body, "Legacy body");

        let page: RawContentPage = serde_json::from_value(
            json!({"slug": "terms", "body": "Current", "content": "Legacy"}),
        )
        .unwrap();
        assert_eq!(ContentPage::from_raw(page).body, "Current");
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw: RawContentPage = serde_json::from_value(json!({
            "slug": "privacy",
            "title": "Privacy Policy",
            "body": "We collect nothing.",
            "lastUpdated": "2026-01-15T09:00:00Z"
        }))
        .unwrap();
        let first = ContentPage::from_raw(raw);

        let reparsed: RawContentPage =
            serde_json::from_value(serde_json::to_value(&first).unwrap()).unwrap();
        assert_eq!(first, ContentPage::from_raw(reparsed));
    }
}
