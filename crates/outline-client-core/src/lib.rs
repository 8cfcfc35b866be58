//! Outline management API client engine.
//!
//! Headless client core consumed by any management frontend (CLI, desktop
//! manager, automation):
//!
//! - digest-pinned HTTPS transport (reqwest over the `outline-proto` rustls
//!   configuration)
//! - one generic request/response pipeline with per-verb expected-status
//!   enforcement and structured error-body fallback
//! - the typed API surface: server settings, access keys, metrics, data limits

pub mod client;
pub mod error;

mod endpoint;
mod transport;

pub use client::OutlineClient;
pub use error::ClientError;

// Types callers need to construct requests and read results.
pub use outline_proto::{wire, AccessKey, ByteQuantity, CertDigest, Credentials, ServerError, ServerInfo};
