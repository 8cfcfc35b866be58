//! TLS client configuration for the management connection.
//!
//! Constructs a `rustls::ClientConfig` with the ring crypto provider and the
//! trust decision injected at construction: either the pinned verifier or,
//! when verification is disabled, the accept-any verifier. Both TLS 1.2 and
//! 1.3 are offered — deployed servers span both.

use std::sync::Arc;

use rustls::client::danger::ServerCertVerifier;

use crate::credentials::CertDigest;
use crate::error::{ProtoError, Result};
use crate::tls::verifier::{AcceptAnyCertVerifier, PinnedCertVerifier};

/// Build a `rustls::ClientConfig` for the management connection.
///
/// `pinned` selects the trust policy: `Some(digest)` pins the server's leaf
/// certificate to that digest; `None` disables certificate verification
/// entirely (the caller turned `verify_ssl` off). No client certificate is
/// presented, and no ALPN is set — the management API speaks HTTP/1.1.
pub fn build_client_tls_config(pinned: Option<&CertDigest>) -> Result<rustls::ClientConfig> {
    let verifier: Arc<dyn ServerCertVerifier> = match pinned {
        Some(digest) => Arc::new(PinnedCertVerifier::new(*digest)),
        None => Arc::new(AcceptAnyCertVerifier),
    };

    let config = rustls::ClientConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_protocol_versions(rustls::ALL_VERSIONS)
    .map_err(|e| ProtoError::TlsConfiguration(format!("TLS version config: {e}")))?
    .dangerous()
    .with_custom_certificate_verifier(verifier)
    .with_no_client_auth();

    Ok(config)
}
