//! TLS layer: digest-pinned trust evaluation for the management connection.
//!
//! Management servers ship with self-signed certificates; operators identify
//! them by a SHA-256 digest obtained out-of-band rather than by a CA chain.
//! The verifier here replaces (not supplements) ordinary CA trust: a
//! well-formed certificate in no trust store is accepted if and only if its
//! digest matches, and a publicly CA-issued certificate is rejected when it
//! does not.

pub mod config;
pub mod verifier;

pub use config::build_client_tls_config;
pub use verifier::{evaluate_pin, AcceptAnyCertVerifier, PinError, PinnedCertVerifier};
