//! HTTPS transport construction and transport-failure classification.
//!
//! The reqwest client is built once per (credentials, verify_ssl) pair with
//! the rustls configuration from `outline-proto` injected up front, so the
//! trust decision is fixed state chosen at construction. Reassigning
//! credentials swaps the whole transport: requests already in flight keep
//! the old session, requests issued afterwards use the new one.

use outline_proto::tls::{build_client_tls_config, PinError};
use outline_proto::Credentials;

use crate::error::{ClientError, Result};

/// Build the HTTP client enforcing the credentials' trust policy.
pub(crate) fn build_http_client(
    credentials: &Credentials,
    verify_ssl: bool,
) -> Result<reqwest::Client> {
    let pinned = verify_ssl.then(|| *credentials.cert_sha256());
    let tls = build_client_tls_config(pinned.as_ref())?;

    reqwest::Client::builder()
        .use_preconfigured_tls(tls)
        .build()
        .map_err(|e| ClientError::Transport(e.to_string()))
}

/// Classify a failure from `reqwest::RequestBuilder::send`.
///
/// A pin rejection starts in the verifier, travels through rustls as
/// `Error::Other`, and reaches us wrapped in connector errors; walk the
/// source chain to recover it. Everything else means no HTTP response was
/// obtained.
pub(crate) fn classify_send_error(err: reqwest::Error) -> ClientError {
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        if let Some(pin) = cause.downcast_ref::<PinError>() {
            return ClientError::Pin(pin.clone());
        }
        if let Some(rustls::Error::Other(other)) = cause.downcast_ref::<rustls::Error>() {
            if let Some(pin) = other.0.downcast_ref::<PinError>() {
                return ClientError::Pin(pin.clone());
            }
        }
        source = cause.source();
    }
    ClientError::InvalidResponse(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use outline_proto::CertDigest;
    use url::Url;

    fn credentials() -> Credentials {
        let url = Url::parse("https://203.0.113.10:39482/prefix").unwrap();
        Credentials::new(url, CertDigest::from_bytes([1; 32])).unwrap()
    }

    #[test]
    fn builds_pinned_client() {
        assert!(build_http_client(&credentials(), true).is_ok());
    }

    #[test]
    fn builds_unverified_client() {
        assert!(build_http_client(&credentials(), false).is_ok());
    }
}
