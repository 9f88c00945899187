//! The transport boundary.
//!
//! The real HTTP client lives with the embedder: it attaches cookie
//! credentials, retries once on an expired session, and surfaces failures
//! as notifications. Services only need the contract below — a method per
//! verb returning the response body as JSON, or an error carrying a
//! human-readable message and, for validation failures, a per-field map.

use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed response future, so [`Transport`] stays object-safe.
pub type TransportFuture = Pin<Box<dyn Future<Output = Result<Value, TransportError>> + Send>>;

/// Errors surfaced by the transport layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request failed: network trouble, server error, or an
    /// authorization failure the transport could not recover from.
    #[error("{message}")]
    Failed {
        /// HTTP status, when a response was received.
        status: Option<u16>,
        /// Human-readable message.
        message: String,
    },

    /// Server-side validation rejected the request.
    #[error("{message}")]
    Validation {
        /// Human-readable summary.
        message: String,
        /// Per-field validation messages.
        field_errors: HashMap<String, String>,
    },
}

impl TransportError {
    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Failed { message, .. } | Self::Validation { message, .. } => message,
        }
    }

    /// Per-field validation messages, for validation failures.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&HashMap<String, String>> {
        match self {
            Self::Validation { field_errors, .. } => Some(field_errors),
            Self::Failed { .. } => None,
        }
    }
}

/// Issues requests against the upstream API.
///
/// Implementations own the base URL, credentials, and interceptor chain.
/// Bodies come back as raw JSON; unwrapping the response envelope and
/// normalizing the payload is the caller's job (the services in this
/// crate).
pub trait Transport: Send + Sync {
    /// Issue a GET request.
    fn get(&self, path: &str) -> TransportFuture;

    /// Issue a POST request with a JSON body.
    fn post(&self, path: &str, body: Value) -> TransportFuture;

    /// Issue a PUT request with a JSON body.
    fn put(&self, path: &str, body: Value) -> TransportFuture;

    /// Issue a DELETE request.
    fn delete(&self, path: &str) -> TransportFuture;
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Canned-response transport for service tests.

    use super::{Transport, TransportError, TransportFuture};
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Transport returning canned bodies keyed by `"VERB path"`.
    #[derive(Default)]
    pub struct MockTransport {
        responses: Mutex<HashMap<String, Result<Value, TransportError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Respond to `"VERB path"` with `body`.
        #[must_use]
        pub fn on(self, request: &str, body: Value) -> Self {
            if let Ok(mut responses) = self.responses.lock() {
                responses.insert(request.to_owned(), Ok(body));
            }
            self
        }

        /// Respond to `"VERB path"` with `error`.
        #[must_use]
        pub fn on_error(self, request: &str, error: TransportError) -> Self {
            if let Ok(mut responses) = self.responses.lock() {
                responses.insert(request.to_owned(), Err(error));
            }
            self
        }

        /// Every request issued so far, as `"VERB path"`.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }

        fn respond(&self, request: &str) -> TransportFuture {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(request.to_owned());
            }
            let response = self
                .responses
                .lock()
                .ok()
                .and_then(|responses| responses.get(request).cloned())
                .unwrap_or_else(|| {
                    Err(TransportError::Failed {
                        status: Some(404),
                        message: format!("No canned response for {request}"),
                    })
                });
            Box::pin(async move { response })
        }
    }

    impl Transport for MockTransport {
        fn get(&self, path: &str) -> TransportFuture {
            self.respond(&format!("GET {path}"))
        }

        fn post(&self, path: &str, _body: Value) -> TransportFuture {
            self.respond(&format!("POST {path}"))
        }

        fn put(&self, path: &str, _body: Value) -> TransportFuture {
            self.respond(&format!("PUT {path}"))
        }

        fn delete(&self, path: &str) -> TransportFuture {
            self.respond(&format!("DELETE {path}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_and_field_errors_are_extractable() {
        let failed = TransportError::Failed {
            status: Some(500),
            message: "Server error".to_owned(),
        };
        assert_eq!(failed.message(), "Server error");
        assert_eq!(failed.field_errors(), None);

        let validation = TransportError::Validation {
            message: "Validation failed".to_owned(),
            field_errors: HashMap::from([(
                "email".to_owned(),
                "Email is required".to_owned(),
            )]),
        };
        assert_eq!(validation.message(), "Validation failed");
        assert_eq!(
            validation.field_errors().and_then(|f| f.get("email")).map(String::as_str),
            Some("Email is required"),
        );
    }
}
