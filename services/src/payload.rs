//! Payload extraction shared by every service.
//!
//! After [`unwrap_envelope`](tombola_domain::unwrap_envelope) strips the
//! transport envelope, the entity payload sits either under its wrapper key
//! (`{"competitions": [...]}`) or — on older endpoint versions — bare. Both
//! are accepted; anything else is a structural absence, which is a typed
//! error rather than a normalization concern.

use crate::error::ServiceError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A page of items plus its pagination counters.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Pagination counters from the envelope metadata.
    pub pagination: tombola_domain::Pagination,
}

/// Extract the list stored under `key`, or the bare array form.
///
/// # Errors
///
/// [`ServiceError::MissingPayload`] when neither shape is present.
pub fn list_payload(data: &Value, key: &'static str) -> Result<Vec<Value>, ServiceError> {
    if let Some(Value::Array(items)) = data.get(key) {
        return Ok(items.clone());
    }
    if let Value::Array(items) = data {
        return Ok(items.clone());
    }
    Err(ServiceError::MissingPayload { key })
}

/// Extract the entity stored under `key`, or the bare entity-shaped object
/// form (an object carrying `id` or `_id`).
///
/// # Errors
///
/// [`ServiceError::MissingPayload`] when neither shape is present.
pub fn entity_payload(data: &Value, key: &'static str) -> Result<Value, ServiceError> {
    if let Some(entity) = data.get(key) {
        if entity.is_object() {
            return Ok(entity.clone());
        }
    }
    if data.is_object() && (data.get("id").is_some() || data.get("_id").is_some()) {
        return Ok(data.clone());
    }
    Err(ServiceError::MissingPayload { key })
}

/// Decode a list of raw records and normalize each through `normalize`.
///
/// # Errors
///
/// [`ServiceError::Decode`] when an element's container shape does not
/// match the raw record type. (Field-level problems never error — the raw
/// types absorb them.)
pub fn normalize_list<R, T>(
    values: Vec<Value>,
    normalize: fn(R) -> T,
) -> Result<Vec<T>, ServiceError>
where
    R: DeserializeOwned,
{
    values
        .into_iter()
        .map(|value| Ok(normalize(serde_json::from_value(value)?)))
        .collect()
}

/// Decode one raw record and normalize it through `normalize`.
///
/// # Errors
///
/// [`ServiceError::Decode`] when the container shape does not match.
pub fn normalize_entity<R, T>(value: Value, normalize: fn(R) -> T) -> Result<T, ServiceError>
where
    R: DeserializeOwned,
{
    Ok(normalize(serde_json::from_value(value)?))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can unwrap

    use super::*;
    use serde_json::json;

    #[test]
    fn list_accepts_wrapped_and_bare_shapes() {
        let wrapped = json!({"draws": [{"id": "d1"}]});
        assert_eq!(list_payload(&wrapped, "draws").unwrap().len(), 1);

        let bare = json!([{"id": "d1"}, {"id": "d2"}]);
        assert_eq!(list_payload(&bare, "draws").unwrap().len(), 2);
    }

    #[test]
    fn list_rejects_structural_absence() {
        let missing = json!({"something_else": []});
        assert!(matches!(
            list_payload(&missing, "draws"),
            Err(ServiceError::MissingPayload { key: "draws" }),
        ));

        // Present under the key but not a list is absence too.
        let wrong_shape = json!({"draws": "not a list"});
        assert!(matches!(
            list_payload(&wrong_shape, "draws"),
            Err(ServiceError::MissingPayload { .. }),
        ));
    }

    #[test]
    fn entity_accepts_wrapped_and_bare_shapes() {
        let wrapped = json!({"competition": {"_id": "c1"}});
        assert_eq!(
            entity_payload(&wrapped, "competition").unwrap(),
            json!({"_id": "c1"}),
        );

        let bare = json!({"id": "c1", "title": "Prize"});
        assert_eq!(entity_payload(&bare, "competition").unwrap(), bare);
    }

    #[test]
    fn entity_rejects_structural_absence() {
        assert!(matches!(
            entity_payload(&json!({"competition": null}), "competition"),
            Err(ServiceError::MissingPayload { .. }),
        ));
        assert!(matches!(
            entity_payload(&json!({"title": "no identity"}), "competition"),
            Err(ServiceError::MissingPayload { .. }),
        ));
    }
}
