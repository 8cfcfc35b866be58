//! Custom rustls verifiers for digest-pinned server trust.
//!
//! `PinnedCertVerifier` accepts a server exactly when the SHA-256 digest of
//! its leaf certificate (raw DER bytes) equals the pinned digest from the
//! credentials. Intermediates, server name, OCSP, and CA chains are ignored
//! on purpose. `AcceptAnyCertVerifier` backs the verify-ssl-off escape hatch.
//!
//! Signature verification is delegated to the rustls ring crypto provider.
//! Only certificate chain validation is customized.
//!
//! The trust decision itself is the pure function [`evaluate_pin`], so it is
//! unit-testable without a network stack; the verifier structs only adapt it
//! to the rustls callback surface.

use std::sync::{Arc, Mutex};

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::{DigitallySignedStruct, Error as TlsError, OtherError, SignatureScheme};
use rustls_pki_types::{CertificateDer, ServerName, UnixTime};
use thiserror::Error;
use x509_parser::prelude::*;

use crate::credentials::CertDigest;

/// Why a handshake was rejected by the pinning check.
///
/// Carried through rustls as [`rustls::Error::Other`] so transports can
/// recover the underlying cause from a failed connect and surface pin
/// rejections distinctly from generic TLS failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PinError {
    #[error("malformed peer certificate: {0}")]
    MalformedCertificate(String),

    #[error("peer certificate SHA-256 does not match the pinned digest")]
    DigestMismatch,
}

/// Decide whether to trust a peer from its leaf certificate alone.
///
/// 1. Parse the leaf DER as X.509 — basic well-formedness, not CA trust.
///    Empty or malformed input is rejected with no credentials supplied.
/// 2. SHA-256 the raw DER bytes and compare byte-for-byte against the pin.
///
/// On mismatch the connection is rejected unconditionally; there is no
/// fallback to system trust.
pub fn evaluate_pin(end_entity: &CertificateDer<'_>, pinned: &CertDigest) -> Result<(), PinError> {
    X509Certificate::from_der(end_entity.as_ref())
        .map_err(|e| PinError::MalformedCertificate(format!("X.509 parse error: {e}")))?;

    let digest = CertDigest::of_cert_der(end_entity.as_ref());
    if digest != *pinned {
        return Err(PinError::DigestMismatch);
    }

    Ok(())
}

/// Get the ring provider's supported signature verification algorithms.
fn ring_signature_algorithms() -> &'static rustls::crypto::WebPkiSupportedAlgorithms {
    use std::sync::LazyLock;
    static ALGORITHMS: LazyLock<rustls::crypto::WebPkiSupportedAlgorithms> = LazyLock::new(|| {
        rustls::crypto::ring::default_provider().signature_verification_algorithms
    });
    &ALGORITHMS
}

// ---------------------------------------------------------------------------
// Pinned verification
// ---------------------------------------------------------------------------

/// Server certificate verifier that trusts exactly one leaf digest.
///
/// The pinned digest is fixed at construction; swapping credentials means
/// building a new verifier (and a new transport around it). rustls invokes
/// `verify_server_cert` exactly once per handshake, synchronously blocking
/// that connection until the decision is made.
#[derive(Debug)]
pub struct PinnedCertVerifier {
    pinned: CertDigest,
    // Single-permit gate: at most one pin evaluation in flight per client.
    challenge_gate: Mutex<()>,
}

impl PinnedCertVerifier {
    pub fn new(pinned: CertDigest) -> Self {
        Self {
            pinned,
            challenge_gate: Mutex::new(()),
        }
    }
}

impl ServerCertVerifier for PinnedCertVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, TlsError> {
        let _gate = self.challenge_gate.lock().unwrap();
        evaluate_pin(end_entity, &self.pinned)
            .map_err(|e| TlsError::Other(OtherError(Arc::new(e))))?;
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        rustls::crypto::verify_tls12_signature(message, cert, dss, ring_signature_algorithms())
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        rustls::crypto::verify_tls13_signature(message, cert, dss, ring_signature_algorithms())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        ring_signature_algorithms().supported_schemes()
    }
}

// ---------------------------------------------------------------------------
// Verification disabled
// ---------------------------------------------------------------------------

/// Server certificate verifier that accepts every certificate.
///
/// Used only when the caller has explicitly disabled SSL verification on the
/// client. Handshake signatures are still checked.
#[derive(Debug)]
pub struct AcceptAnyCertVerifier;

impl ServerCertVerifier for AcceptAnyCertVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, TlsError> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        rustls::crypto::verify_tls12_signature(message, cert, dss, ring_signature_algorithms())
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, TlsError> {
        rustls::crypto::verify_tls13_signature(message, cert, dss, ring_signature_algorithms())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        ring_signature_algorithms().supported_schemes()
    }
}
