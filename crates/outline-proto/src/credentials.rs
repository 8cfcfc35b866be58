//! Credentials for a managed server: API URL plus pinned certificate digest.
//!
//! [`CertDigest`] stores the full 32-byte SHA-256 hash of the server's leaf
//! certificate (DER form). Operators obtain the digest out-of-band — the
//! install output prints it next to the API URL — and supply it as a
//! 64-character hex string. Parsing is strict: anything other than exactly 64
//! hex digits is rejected outright, never truncated into a partial digest.
//!
//! Hex decoding reference: `data-encoding` crate (MIT/Apache-2.0);
//! `HEXLOWER_PERMISSIVE` accepts both cases on input while output is
//! always lowercase.

use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};
use serde::{Deserialize, Deserializer};
use sha2::{Digest, Sha256};
use url::Url;

use crate::error::{ProtoError, Result};

/// Digest length in bytes (SHA-256).
pub const DIGEST_LEN: usize = 32;

/// Hex string length for a full digest.
const HEX_LEN: usize = 2 * DIGEST_LEN;

/// SHA-256 digest of a DER-encoded certificate.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CertDigest([u8; DIGEST_LEN]);

impl CertDigest {
    /// Parse a digest from its 64-character hex form, case-insensitive.
    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() != HEX_LEN {
            return Err(ProtoError::InvalidDigest(format!(
                "expected {HEX_LEN} hex characters, got {}",
                hex.len()
            )));
        }
        let decoded = HEXLOWER_PERMISSIVE
            .decode(hex.as_bytes())
            .map_err(|e| ProtoError::InvalidDigest(format!("invalid hex: {e}")))?;

        let mut bytes = [0u8; DIGEST_LEN];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    /// Construct a digest from raw bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Compute the digest of a DER-encoded certificate.
    pub fn of_cert_der(der: &[u8]) -> Self {
        Self(Sha256::digest(der).into())
    }

    /// The raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        HEXLOWER.encode(&self.0)
    }
}

impl std::str::FromStr for CertDigest {
    type Err = ProtoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl std::fmt::Display for CertDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for CertDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CertDigest({})", self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CertDigest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        CertDigest::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

/// Credentials for one managed server.
///
/// The API URL usually embeds a secret path prefix
/// (`https://host:port/<secret>`); endpoint paths are appended below that
/// prefix, so the URL must be usable as a base. Immutable once built —
/// a client swaps credentials only by explicit reassignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    api_url: Url,
    cert_sha256: CertDigest,
}

impl Credentials {
    pub fn new(api_url: Url, cert_sha256: CertDigest) -> Result<Self> {
        if api_url.cannot_be_a_base() {
            return Err(ProtoError::InvalidApiUrl(api_url));
        }
        Ok(Self {
            api_url,
            cert_sha256,
        })
    }

    /// Management API base URL.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Pinned SHA-256 digest of the server's certificate.
    pub fn cert_sha256(&self) -> &CertDigest {
        &self.cert_sha256
    }
}

impl<'de> Deserialize<'de> for Credentials {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Wire {
            api_url: Url,
            cert_sha256: CertDigest,
        }

        let wire = Wire::deserialize(deserializer)?;
        Credentials::new(wire.api_url, wire.cert_sha256).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    const SAMPLE_HEX: &str = "4f2b1a0c9d8e7f60514233241506f7e8d9c0b1a2938475665748392a1b0c2d3e";

    #[test]
    fn parses_valid_hex() {
        let digest = CertDigest::from_hex(SAMPLE_HEX).expect("valid hex should parse");
        assert_eq!(digest.as_bytes()[0], 0x4f);
        assert_eq!(digest.as_bytes()[31], 0x3e);
    }

    #[test]
    fn hex_roundtrip_is_lowercase() {
        let digest = CertDigest::from_hex(SAMPLE_HEX).expect("valid hex should parse");
        assert_eq!(digest.to_hex(), SAMPLE_HEX);
        assert_eq!(digest.to_string(), SAMPLE_HEX);
    }

    #[test]
    fn parsing_is_case_insensitive() {
        let upper = SAMPLE_HEX.to_ascii_uppercase();
        let from_upper = CertDigest::from_hex(&upper).expect("uppercase should parse");
        let from_lower = CertDigest::from_hex(SAMPLE_HEX).expect("lowercase should parse");
        assert_eq!(from_upper, from_lower);
        assert_eq!(from_upper.to_hex(), SAMPLE_HEX);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(CertDigest::from_hex("").is_err());
        assert!(CertDigest::from_hex("abcd").is_err());
        assert!(CertDigest::from_hex(&SAMPLE_HEX[..63]).is_err());
        assert!(CertDigest::from_hex(&format!("{SAMPLE_HEX}0")).is_err());
    }

    #[test]
    fn rejects_non_hex_characters() {
        let mut bad = SAMPLE_HEX.to_string();
        bad.replace_range(10..11, "g");
        assert!(CertDigest::from_hex(&bad).is_err());

        let spaced = format!("{} ", &SAMPLE_HEX[..63]);
        assert!(CertDigest::from_hex(&spaced).is_err());
    }

    #[test]
    fn digest_of_der_matches_sha256() {
        let der = b"not actually der, but digesting is byte-level";
        let digest = CertDigest::of_cert_der(der);
        let expected: [u8; 32] = Sha256::digest(der).into();
        assert_eq!(digest.as_bytes(), &expected);
    }

    #[test]
    fn credentials_accept_base_url_with_prefix() {
        let url = Url::parse("https://203.0.113.10:39482/AbCdEfSecret").unwrap();
        let digest = CertDigest::from_hex(SAMPLE_HEX).unwrap();
        let creds = Credentials::new(url.clone(), digest).expect("base URL should be accepted");
        assert_eq!(creds.api_url(), &url);
        assert_eq!(creds.cert_sha256(), &digest);
    }

    #[test]
    fn credentials_reject_non_base_url() {
        let url = Url::parse("mailto:admin@example.com").unwrap();
        let digest = CertDigest::from_hex(SAMPLE_HEX).unwrap();
        assert!(matches!(
            Credentials::new(url, digest),
            Err(ProtoError::InvalidApiUrl(_))
        ));
    }

    #[test]
    fn credentials_decode_from_json() {
        let json = format!(
            r#"{{"apiUrl":"https://198.51.100.7:1024/prefix","certSha256":"{SAMPLE_HEX}"}}"#
        );
        let creds: Credentials = codec::decode(json.as_bytes()).expect("decode should succeed");
        assert_eq!(creds.api_url().as_str(), "https://198.51.100.7:1024/prefix");
        assert_eq!(creds.cert_sha256().to_hex(), SAMPLE_HEX);
    }

    #[test]
    fn credentials_decode_rejects_bad_digest() {
        let json = br#"{"apiUrl":"https://198.51.100.7:1024/prefix","certSha256":"zzzz"}"#;
        assert!(codec::decode::<Credentials>(json).is_err());
    }
}
