//! Server-level metadata.

use serde::Deserialize;

/// Information about a managed server, as returned by `GET /server`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    /// Display name of the server.
    pub name: String,
    /// Opaque server identifier.
    pub server_id: String,
    /// Whether anonymous metrics sharing is enabled.
    pub metrics_enabled: bool,
    /// Creation time, epoch milliseconds as reported on the wire.
    pub created_timestamp_ms: i64,
    /// Default port assigned to newly created access keys.
    pub port_for_new_access_keys: u16,
    /// Hostname or IP address used when constructing access URLs.
    pub hostname_for_access_keys: String,
    /// Server software version.
    pub version: String,
    /// Default data limit applied to access keys, in bytes.
    #[serde(default, deserialize_with = "crate::bytes::opt_byte_quantity::deserialize")]
    pub access_key_data_limit: Option<u64>,
}
