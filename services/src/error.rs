//! Service error types.

use crate::transport::TransportError;
use thiserror::Error;

/// Errors from a service call.
///
/// Two distinct classes meet here. Transport failures pass through
/// untouched — the success-path normalization simply never runs. Structural
/// absence ([`ServiceError::MissingPayload`], [`ServiceError::PageNotFound`])
/// means the call itself succeeded but the expected payload wrapper was not
/// in the response; callers decide the fallback (bundled default content, a
/// toast, ...). Per-field malformation is *not* an error at all — the
/// normalizers degrade those to defaults.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The transport layer rejected the call.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// An otherwise-successful response did not contain the expected
    /// payload wrapper.
    #[error("Response payload missing expected `{key}` data")]
    MissingPayload {
        /// The wrapper key that was expected.
        key: &'static str,
    },

    /// A content fetch succeeded but carried no page payload. The
    /// legal-page presenter falls back to its bundled copy on exactly this
    /// error.
    #[error("Page content not found")]
    PageNotFound,

    /// The payload container had the wrong shape for its type.
    #[error("Failed to decode response payload: {0}")]
    Decode(#[from] serde_json::Error),
}
