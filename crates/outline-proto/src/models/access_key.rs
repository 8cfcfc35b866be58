//! Access keys: per-client credentials provisioned on the server.

use serde::Deserialize;
use url::Url;

/// A provisioned access key.
///
/// The password is credential material returned once at creation; the API
/// offers no way to re-derive it later. `method` is the cipher name as an
/// uncontrolled string — the API does not enumerate valid values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKey {
    pub id: String,
    pub name: String,
    pub password: String,
    pub port: u16,
    pub method: String,
    /// Full access URL handed to end users.
    pub access_url: Url,
    /// Per-key data limit in bytes, if one is set.
    #[serde(default, deserialize_with = "crate::bytes::opt_byte_quantity::deserialize")]
    pub data_limit: Option<u64>,
}
