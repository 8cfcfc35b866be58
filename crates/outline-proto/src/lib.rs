//! Outline management API protocol layer.
//!
//! Shared protocol layer consumed by `outline-client-core` (and any other
//! frontend that talks to an Outline-style server control plane):
//!
//! - JSON wire codec and per-endpoint envelope types
//! - credentials and certificate digest primitives
//! - typed data models (server info, access keys)
//! - digest-pinned TLS verifier and client configuration

pub mod bytes;
pub mod codec;
pub mod credentials;
pub mod error;
pub mod models;
pub mod tls;
pub mod wire;

pub use bytes::ByteQuantity;
pub use credentials::{CertDigest, Credentials};
pub use error::{ProtoError, ServerError};
pub use models::{AccessKey, ServerInfo};
