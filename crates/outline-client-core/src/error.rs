//! Error taxonomy surfaced to API callers.
//!
//! Every operation either fully succeeds or fails with exactly one of these
//! kinds; there is no local recovery, retry, or circuit breaking. Callers are
//! expected to match on the kind; the `Display` renderings are for direct
//! display and are not guaranteed stable across versions.

use outline_proto::tls::PinError;
use outline_proto::{ProtoError, ServerError};
use thiserror::Error;

/// Errors returned by [`crate::OutlineClient`] operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport could not produce an HTTP response at all.
    #[error("invalid response: {0}")]
    InvalidResponse(#[source] reqwest::Error),

    /// The TLS handshake was rejected by the certificate pinning check.
    ///
    /// Distinguished from [`ClientError::InvalidResponse`] so callers can
    /// tell "the server does not hold the pinned certificate" apart from
    /// ordinary connectivity failures.
    #[error("certificate pinning rejected the server: {0}")]
    Pin(#[source] PinError),

    /// The server answered with an unexpected status code.
    #[error("server error: {0}")]
    Server(ServerError),

    /// The status matched but the success body failed to decode into the
    /// expected type — a client/server schema mismatch, not a failure the
    /// server reported.
    #[error("malformed success body: {0}")]
    MalformedBody(#[source] ProtoError),

    /// A request body could not be serialized; detected before any I/O.
    #[error("request body encoding failed: {0}")]
    Encode(#[source] ProtoError),

    /// Building the underlying HTTP transport failed.
    #[error("transport construction failed: {0}")]
    Transport(String),

    /// Credential or TLS configuration failure from the protocol layer.
    #[error(transparent)]
    Protocol(#[from] ProtoError),
}

/// Result type alias using [`ClientError`].
pub type Result<T> = std::result::Result<T, ClientError>;
