//! Integration tests: digest pinning replaces CA trust.
//!
//! Exercises the trust decision through the public rustls verifier surface
//! with freshly generated certificates:
//!
//! 1. A self-signed certificate (in no trust store) is accepted when its
//!    digest matches the pin.
//! 2. A certificate issued by a CA is rejected when its digest does not
//!    match — chain provenance never substitutes for the pin.
//! 3. An empty chain or malformed leaf is rejected outright.

use rustls::client::danger::ServerCertVerifier;
use rustls_pki_types::{CertificateDer, ServerName, UnixTime};

use outline_proto::credentials::CertDigest;
use outline_proto::tls::{evaluate_pin, PinError, PinnedCertVerifier};

fn self_signed_der(host: &str) -> Vec<u8> {
    let key = rcgen::KeyPair::generate().expect("key gen");
    rcgen::CertificateParams::new(vec![host.to_string()])
        .expect("cert params")
        .self_signed(&key)
        .expect("cert gen")
        .der()
        .to_vec()
}

/// A leaf certificate signed by its own CA, returned as (leaf_der, ca_der).
fn ca_signed_der(host: &str) -> (Vec<u8>, Vec<u8>) {
    let ca_key = rcgen::KeyPair::generate().expect("CA key gen");
    let mut ca_params = rcgen::CertificateParams::new(vec![]).expect("CA params");
    ca_params.is_ca = rcgen::IsCa::Ca(rcgen::BasicConstraints::Unconstrained);
    let ca_cert = ca_params.self_signed(&ca_key).expect("CA cert gen");

    let leaf_key = rcgen::KeyPair::generate().expect("leaf key gen");
    let leaf = rcgen::CertificateParams::new(vec![host.to_string()])
        .expect("leaf params")
        .signed_by(&leaf_key, &ca_cert, &ca_key)
        .expect("leaf cert gen");

    (leaf.der().to_vec(), ca_cert.der().to_vec())
}

fn verify(
    verifier: &PinnedCertVerifier,
    leaf: &[u8],
    intermediates: &[CertificateDer<'static>],
) -> Result<(), rustls::Error> {
    verifier
        .verify_server_cert(
            &CertificateDer::from(leaf.to_vec()),
            intermediates,
            &ServerName::try_from("api.example.com").expect("server name"),
            &[],
            UnixTime::now(),
        )
        .map(|_| ())
}

#[test]
fn self_signed_cert_with_matching_digest_is_trusted() {
    let der = self_signed_der("api.example.com");
    let verifier = PinnedCertVerifier::new(CertDigest::of_cert_der(&der));
    assert!(verify(&verifier, &der, &[]).is_ok());
}

#[test]
fn ca_issued_cert_with_wrong_digest_is_rejected() {
    let (leaf_der, ca_der) = ca_signed_der("api.example.com");
    let other_der = self_signed_der("api.example.com");

    // Pin a different certificate's digest; the CA-backed chain must not help.
    let verifier = PinnedCertVerifier::new(CertDigest::of_cert_der(&other_der));
    let intermediates = vec![CertificateDer::from(ca_der)];

    let err = verify(&verifier, &leaf_der, &intermediates).expect_err("must reject");
    match err {
        rustls::Error::Other(other) => {
            assert_eq!(
                other.0.downcast_ref::<PinError>(),
                Some(&PinError::DigestMismatch)
            );
        }
        other => panic!("expected Error::Other, got {other:?}"),
    }
}

#[test]
fn ca_issued_cert_with_matching_digest_is_trusted() {
    // Provenance is irrelevant in the other direction too: pinning the
    // CA-issued leaf accepts it without any CA configuration.
    let (leaf_der, _ca_der) = ca_signed_der("api.example.com");
    let verifier = PinnedCertVerifier::new(CertDigest::of_cert_der(&leaf_der));
    assert!(verify(&verifier, &leaf_der, &[]).is_ok());
}

#[test]
fn digest_comparison_is_over_raw_der() {
    // Flipping a single byte of the certificate changes the digest and must
    // flip the decision.
    let der = self_signed_der("api.example.com");
    let verifier = PinnedCertVerifier::new(CertDigest::of_cert_der(&der));

    let mut tampered = der.clone();
    let last = tampered.len() - 1;
    tampered[last] ^= 0x01;

    assert!(verify(&verifier, &tampered, &[]).is_err());
}

#[test]
fn malformed_leaf_is_rejected_before_digest_check() {
    let garbage = b"definitely not DER".to_vec();
    let pinned = CertDigest::of_cert_der(&garbage);
    assert!(matches!(
        evaluate_pin(&CertificateDer::from(garbage), &pinned),
        Err(PinError::MalformedCertificate(_))
    ));
}
