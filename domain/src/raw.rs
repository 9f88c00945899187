//! Raw shape vocabulary for upstream payloads.
//!
//! The API has gone through several revisions and the same field can arrive
//! as different JSON shapes depending on the endpoint version: numbers as
//! strings, relations as populated objects or bare ids, images as URLs or
//! descriptor objects. Each shape family here is a closed `untagged` enum
//! whose final variant captures the unrecognized case explicitly, so every
//! coercion site handles "something else entirely" as a real branch instead
//! of an accident.
//!
//! Coercion never fails: missing or unrecognized input degrades to a
//! documented default (`0`, `false`, `""`, `None`). Strictness at this layer
//! would turn a single malformed field into a blank page.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A numeric field as the API may deliver it.
///
/// Accepts a JSON number, a numeric string (`"10"`), or a boolean; anything
/// else falls through to [`RawNumber::Other`] and coerces to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// A plain JSON number.
    Number(f64),
    /// A number encoded as a string.
    Text(String),
    /// A boolean standing in for 0/1.
    Flag(bool),
    /// Any other shape. Coerces to zero.
    Other(Value),
}

impl RawNumber {
    /// Coerce to `f64`, falling back to `0.0`.
    ///
    /// Numeric strings are trimmed before parsing. Non-finite values (NaN,
    /// infinities) also coerce to `0.0` so arithmetic downstream never sees
    /// them.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Self::Flag(b) => f64::from(u8::from(*b)),
            Self::Other(_) => 0.0,
        };
        if value.is_finite() { value } else { 0.0 }
    }

    /// Coerce to `u32`, falling back to `0`.
    ///
    /// Negative and fractional inputs truncate toward zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // saturating float-to-int cast
    pub fn as_u32(&self) -> u32 {
        self.as_f64().max(0.0) as u32
    }

    /// Coerce to `u64`, falling back to `0`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // saturating float-to-int cast
    pub fn as_u64(&self) -> u64 {
        self.as_f64().max(0.0) as u64
    }
}

/// Coerce an optional numeric field to `f64` with a zero fallback.
#[must_use]
pub fn number_or_zero(field: Option<&RawNumber>) -> f64 {
    field.map_or(0.0, RawNumber::as_f64)
}

/// Coerce an optional numeric field to `u32` with a zero fallback.
#[must_use]
pub fn count_or_zero(field: Option<&RawNumber>) -> u32 {
    field.map_or(0, RawNumber::as_u32)
}

/// A boolean field as the API may deliver it.
///
/// Accepts a JSON bool, a 0/1 number, or a truthy/falsy string; anything
/// else resolves to the per-field default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawFlag {
    /// A plain JSON boolean.
    Bool(bool),
    /// A number standing in for a boolean (non-zero is true).
    Number(f64),
    /// A textual boolean: "true"/"1"/"yes" or "false"/"0"/"no".
    Text(String),
    /// Any other shape. Resolves to the field default.
    Other(Value),
}

impl RawFlag {
    /// Coerce to `bool`, using `default` for unrecognized input.
    #[must_use]
    pub fn as_bool(&self, default: bool) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => default,
            },
            Self::Other(_) => default,
        }
    }
}

/// Coerce an optional boolean field, using `default` when absent or
/// unrecognized.
#[must_use]
pub fn flag_or(field: Option<&RawFlag>, default: bool) -> bool {
    field.map_or(default, |f| f.as_bool(default))
}

/// A relational field: either a populated object or a bare id.
///
/// Normalization always resolves this to a flat id plus whatever
/// denormalized display fields the populated form carried. The raw shape is
/// never passed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRef {
    /// The populated form: an object carrying the id and display fields.
    Object(RefFields),
    /// The bare form: just the id.
    Id(String),
    /// Any other shape. Resolves to an empty id with no display fields.
    Other(Value),
}

/// Display fields a populated reference may carry.
///
/// Only the scalar fields used for denormalized display are modeled; the
/// rest of the populated record is ignored at the reference site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RefFields {
    /// Primary identifier.
    pub id: Option<String>,
    /// Legacy identifier field.
    #[serde(rename = "_id")]
    pub legacy_id: Option<String>,
    /// Title of a referenced competition.
    pub title: Option<String>,
    /// Explicit display name of a referenced user.
    pub name: Option<String>,
    /// Given name, used when no explicit name exists.
    pub first_name: Option<String>,
    /// Family name, used when no explicit name exists.
    pub last_name: Option<String>,
}

impl RawRef {
    /// The flat identifier: `id` first, then `_id`, empty when absent.
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::Object(fields) => fields
                .id
                .clone()
                .or_else(|| fields.legacy_id.clone())
                .unwrap_or_default(),
            Self::Id(id) => id.clone(),
            Self::Other(_) => String::new(),
        }
    }

    /// Denormalized title, when the populated form carried one.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        match self {
            Self::Object(fields) => fields.title.clone().filter(|t| !t.trim().is_empty()),
            Self::Id(_) | Self::Other(_) => None,
        }
    }

    /// Denormalized display name, when the populated form carried one.
    ///
    /// Prefers an explicit `name`; otherwise synthesizes from first and last
    /// name. Returns `None` when neither yields anything.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        match self {
            Self::Object(fields) => {
                let name = full_name(
                    fields.name.as_deref(),
                    fields.first_name.as_deref(),
                    fields.last_name.as_deref(),
                );
                if name.is_empty() { None } else { Some(name) }
            },
            Self::Id(_) | Self::Other(_) => None,
        }
    }
}

/// An image field: either a bare URL or a descriptor object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawImage {
    /// The bare form: just the URL.
    Url(String),
    /// The descriptor form.
    Object(ImageFields),
    /// Any other shape. Skipped during normalization.
    Other(Value),
}

/// Fields of the descriptor form of an image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageFields {
    /// Image URL.
    pub url: Option<String>,
    /// Legacy URL field.
    #[serde(rename = "secure_url")]
    pub secure_url: Option<String>,
    /// CDN public id.
    pub public_id: Option<String>,
    /// Legacy public id field.
    #[serde(rename = "public_id")]
    pub legacy_public_id: Option<String>,
    /// Thumbnail URL.
    pub thumbnail: Option<String>,
}

impl RawImage {
    /// Resolve the image URL: bare string, else `url`, else `secure_url`.
    ///
    /// Returns `None` for empty URLs and unrecognized shapes; such entries
    /// are dropped from the normalized list rather than producing a
    /// descriptor that cannot render.
    #[must_use]
    pub fn url(&self) -> Option<String> {
        let url = match self {
            Self::Url(url) => Some(url.clone()),
            Self::Object(fields) => fields.url.clone().or_else(|| fields.secure_url.clone()),
            Self::Other(_) => None,
        };
        url.filter(|u| !u.trim().is_empty())
    }

    /// CDN public id, when the descriptor form carried one.
    #[must_use]
    pub fn public_id(&self) -> Option<String> {
        match self {
            Self::Object(fields) => fields
                .public_id
                .clone()
                .or_else(|| fields.legacy_public_id.clone()),
            Self::Url(_) | Self::Other(_) => None,
        }
    }

    /// Thumbnail URL, when the descriptor form carried one.
    #[must_use]
    pub fn thumbnail(&self) -> Option<String> {
        match self {
            Self::Object(fields) => fields.thumbnail.clone(),
            Self::Url(_) | Self::Other(_) => None,
        }
    }
}

/// A timestamp field: RFC 3339 string, unix seconds, or unix milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// An RFC 3339 timestamp.
    Time(chrono::DateTime<chrono::Utc>),
    /// A unix timestamp, in seconds or milliseconds.
    Number(i64),
    /// A string that is not RFC 3339; parsed leniently.
    Text(String),
    /// Any other shape. Resolves to `None`.
    Other(Value),
}

/// Unix values at or above this magnitude are read as milliseconds.
const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

impl RawTimestamp {
    /// Resolve to a UTC timestamp, `None` when unparseable.
    #[must_use]
    pub fn as_datetime(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        use chrono::TimeZone;

        match self {
            Self::Time(t) => Some(*t),
            Self::Number(n) => {
                if n.abs() >= MILLIS_THRESHOLD {
                    chrono::Utc.timestamp_millis_opt(*n).single()
                } else {
                    chrono::Utc.timestamp_opt(*n, 0).single()
                }
            },
            Self::Text(s) => chrono::DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|t| t.with_timezone(&chrono::Utc)),
            Self::Other(_) => None,
        }
    }
}

/// Resolve an optional timestamp field, `None` when absent or unparseable.
#[must_use]
pub fn timestamp_or_none(
    field: Option<&RawTimestamp>,
) -> Option<chrono::DateTime<chrono::Utc>> {
    field.and_then(RawTimestamp::as_datetime)
}

/// Resolve a display name from an explicit name and first/last parts.
///
/// An explicit non-blank `name` wins. Otherwise first and last are trimmed
/// and joined; when both are absent the result collapses to `""`, never
/// `" "`.
#[must_use]
pub fn full_name(name: Option<&str>, first: Option<&str>, last: Option<&str>) -> String {
    if let Some(name) = name {
        let name = name.trim();
        if !name.is_empty() {
            return name.to_owned();
        }
    }
    let first = first.unwrap_or("").trim();
    let last = last.unwrap_or("").trim();
    let joined = format!("{first} {last}");
    joined.trim().to_owned()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can unwrap

    use super::*;
    use serde_json::json;

    fn number(v: Value) -> RawNumber {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn number_coercion_from_all_shapes() {
        assert_eq!(number(json!(10)).as_f64(), 10.0);
        assert_eq!(number(json!(2.5)).as_f64(), 2.5);
        assert_eq!(number(json!("10")).as_f64(), 10.0);
        assert_eq!(number(json!(" 7.5 ")).as_f64(), 7.5);
        assert_eq!(number(json!("not a number")).as_f64(), 0.0);
        assert_eq!(number(json!(true)).as_f64(), 1.0);
        assert_eq!(number(json!(null)).as_f64(), 0.0);
        assert_eq!(number(json!({"nested": 1})).as_f64(), 0.0);
        assert_eq!(number(json!([1])).as_f64(), 0.0);
    }

    #[test]
    fn number_count_truncates_and_floors_negatives() {
        assert_eq!(number(json!(99.9)).as_u32(), 99);
        assert_eq!(number(json!(-5)).as_u32(), 0);
        assert_eq!(number(json!("-3")).as_u64(), 0);
    }

    #[test]
    fn flag_coercion() {
        let flag = |v: Value| -> RawFlag { serde_json::from_value(v).unwrap() };
        assert!(flag(json!(true)).as_bool(false));
        assert!(flag(json!(1)).as_bool(false));
        assert!(flag(json!("yes")).as_bool(false));
        assert!(!flag(json!("false")).as_bool(true));
        assert!(!flag(json!(0)).as_bool(true));
        // Unrecognized shapes keep the field default, in both polarities.
        assert!(flag(json!("maybe")).as_bool(true));
        assert!(!flag(json!("maybe")).as_bool(false));
        assert!(flag(json!([])).as_bool(true));
    }

    #[test]
    fn flag_or_defaults_when_absent() {
        assert!(flag_or(None, true));
        assert!(!flag_or(None, false));
    }

    #[test]
    fn reference_resolves_object_and_bare_forms() {
        let populated: RawRef =
            serde_json::from_value(json!({"_id": "X", "title": "T"})).unwrap();
        let bare: RawRef = serde_json::from_value(json!("X")).unwrap();

        assert_eq!(populated.id(), "X");
        assert_eq!(populated.title(), Some("T".to_owned()));
        assert_eq!(bare.id(), "X");
        assert_eq!(bare.title(), None);
    }

    #[test]
    fn reference_prefers_id_over_legacy_id() {
        let reference: RawRef =
            serde_json::from_value(json!({"id": "new", "_id": "old"})).unwrap();
        assert_eq!(reference.id(), "new");
    }

    #[test]
    fn reference_unrecognized_shape_is_empty() {
        let reference: RawRef = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(reference.id(), "");
        assert_eq!(reference.display_name(), None);
    }

    #[test]
    fn reference_synthesizes_display_name() {
        let reference: RawRef = serde_json::from_value(
            json!({"_id": "u1", "firstName": " Ada ", "lastName": "Lovelace"}),
        )
        .unwrap();
        assert_eq!(reference.display_name(), Some("Ada Lovelace".to_owned()));
    }

    #[test]
    fn image_url_resolution() {
        let bare: RawImage = serde_json::from_value(json!("http://x/img.png")).unwrap();
        let descriptor: RawImage =
            serde_json::from_value(json!({"url": "http://x/a.png", "publicId": "a"})).unwrap();
        let legacy: RawImage =
            serde_json::from_value(json!({"secure_url": "http://x/b.png"})).unwrap();
        let junk: RawImage = serde_json::from_value(json!(17)).unwrap();

        assert_eq!(bare.url(), Some("http://x/img.png".to_owned()));
        assert_eq!(descriptor.url(), Some("http://x/a.png".to_owned()));
        assert_eq!(descriptor.public_id(), Some("a".to_owned()));
        assert_eq!(legacy.url(), Some("http://x/b.png".to_owned()));
        assert_eq!(junk.url(), None);
    }

    #[test]
    fn timestamp_shapes() {
        let rfc: RawTimestamp =
            serde_json::from_value(json!("2026-03-01T12:00:00Z")).unwrap();
        let seconds: RawTimestamp = serde_json::from_value(json!(1_767_225_600)).unwrap();
        let millis: RawTimestamp =
            serde_json::from_value(json!(1_767_225_600_000_i64)).unwrap();
        let junk: RawTimestamp = serde_json::from_value(json!("next tuesday")).unwrap();

        assert!(rfc.as_datetime().is_some());
        assert_eq!(seconds.as_datetime(), millis.as_datetime());
        assert_eq!(junk.as_datetime(), None);
    }

    #[test]
    fn full_name_fallback_chain() {
        assert_eq!(full_name(Some("Explicit"), Some("A"), Some("B")), "Explicit");
        assert_eq!(full_name(None, Some("Ada"), Some("Lovelace")), "Ada Lovelace");
        assert_eq!(full_name(None, Some("Ada"), None), "Ada");
        assert_eq!(full_name(None, None, Some("Lovelace")), "Lovelace");
        // The no-name case collapses to an empty string, never " ".
        assert_eq!(full_name(None, None, None), "");
        assert_eq!(full_name(Some("  "), None, None), "");
    }
}
