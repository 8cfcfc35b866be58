//! Error types for the protocol layer.
//!
//! [`ProtoError`] covers failures inside this crate: credential parsing, TLS
//! configuration, and JSON codec errors. [`ServerError`] is the error shape
//! the management API itself reports on a non-success status; it decodes from
//! `{code, message}` and falls back to [`ServerError::Unknown`] when the body
//! does not match that shape.

use thiserror::Error;

/// Errors that can occur within the `outline-proto` crate.
#[derive(Debug, Error)]
pub enum ProtoError {
    // --- Credentials ---
    #[error("invalid certificate digest: {0}")]
    InvalidDigest(String),

    #[error("API URL cannot serve as a base for endpoint paths: {0}")]
    InvalidApiUrl(url::Url),

    // --- TLS ---
    #[error("TLS configuration error: {0}")]
    TlsConfiguration(String),

    // --- Serialization ---
    #[error("JSON encode error: {0}")]
    JsonEncode(#[source] serde_json::Error),

    #[error("JSON decode error: {0}")]
    JsonDecode(#[source] serde_json::Error),
}

/// Result type alias using [`ProtoError`].
pub type Result<T> = std::result::Result<T, ProtoError>;

/// An error reported by the management API on a status-code mismatch.
///
/// Built by the response pipeline, never on a successful status. A body that
/// fails to parse as `{code, message}` is still a failure — it becomes
/// [`ServerError::Unknown`], not a success.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    /// The server returned a parseable `{code, message}` error body.
    #[error("{code} - {message}")]
    Structured { code: String, message: String },

    /// The status was unexpected and the body did not match the error shape.
    #[error("unknown server error")]
    Unknown,
}

impl ServerError {
    /// Decode an error response body.
    pub fn from_body(body: &[u8]) -> Self {
        match crate::codec::decode::<crate::wire::ErrorBody>(body) {
            Ok(err) => ServerError::Structured {
                code: err.code,
                message: err.message,
            },
            Err(_) => ServerError::Unknown,
        }
    }
}
