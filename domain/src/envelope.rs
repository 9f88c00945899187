//! Transport envelope unwrapping.
//!
//! Depending on the endpoint version, the API returns either an enveloped
//! body `{success, data, message?, meta?}` or the payload bare. This module
//! is the single seam that folds both into one shape; every service call
//! goes through [`unwrap_envelope`] so no caller ever branches on the
//! transport shape itself.

use crate::raw::RawNumber;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A transport body with the envelope (if any) removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Unwrapped {
    /// The payload.
    pub data: Value,
    /// Human-readable message from the envelope, when present.
    pub message: Option<String>,
    /// Metadata block from the envelope (pagination and friends), when
    /// present.
    pub meta: Option<Value>,
}

/// Fold the two possible transport shapes into one.
///
/// A body is treated as enveloped iff it is an object carrying both a
/// `success` indicator and a `data` key; anything else — including objects
/// that happen to have one of the two — is passed through whole as the
/// payload.
#[must_use]
pub fn unwrap_envelope(body: Value) -> Unwrapped {
    match body {
        Value::Object(mut map) if map.contains_key("success") && map.contains_key("data") => {
            let data = map.remove("data").unwrap_or(Value::Null);
            let message = match map.remove("message") {
                Some(Value::String(message)) => Some(message),
                Some(_) | None => None,
            };
            let meta = map.remove("meta").filter(|meta| !meta.is_null());
            Unwrapped { data, message, meta }
        },
        other => Unwrapped {
            data: other,
            message: None,
            meta: None,
        },
    }
}

/// Pagination counters from the envelope's metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page, 1-based.
    pub page: u32,
    /// Total pages.
    pub total_pages: u32,
    /// Total records across all pages.
    pub total_count: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            total_count: 0,
        }
    }
}

impl Pagination {
    /// Parse pagination counters from an envelope `meta` block.
    ///
    /// Counters coerce leniently; a missing or malformed block yields the
    /// default (page 1 of 1, zero records). A zero page is pinned to 1 —
    /// pages are 1-based everywhere in the UI.
    #[must_use]
    pub fn from_meta(meta: Option<&Value>) -> Self {
        let Some(block) = meta.and_then(|m| m.get("pagination")) else {
            return Self::default();
        };
        let raw: RawPagination =
            serde_json::from_value(block.clone()).unwrap_or_default();

        Self {
            page: raw.page.as_ref().map_or(1, RawNumber::as_u32).max(1),
            total_pages: raw
                .total_pages
                .or(raw.pages)
                .as_ref()
                .map_or(1, RawNumber::as_u32)
                .max(1),
            total_count: raw
                .total_count
                .or(raw.total)
                .as_ref()
                .map_or(0, RawNumber::as_u64),
        }
    }
}

/// Raw pagination block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawPagination {
    page: Option<RawNumber>,
    total_pages: Option<RawNumber>,
    pages: Option<RawNumber>,
    total_count: Option<RawNumber>,
    total: Option<RawNumber>,
}
