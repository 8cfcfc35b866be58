//! Request and response envelopes for the management API.
//!
//! Each endpoint's body shape is captured here as a plain struct, so the
//! client's pipeline stays generic: an operation is an endpoint descriptor
//! plus one of these types, never bespoke branching.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::bytes::ByteQuantity;
use crate::models::AccessKey;

// --- Request bodies ---

/// `PUT /server/hostname-for-access-keys`
#[derive(Debug, Serialize)]
pub struct SetHostname<'a> {
    pub hostname: &'a str,
}

/// `PUT /name` and `PUT /access-keys/{id}/name`
#[derive(Debug, Serialize)]
pub struct SetName<'a> {
    pub name: &'a str,
}

/// `PUT /metrics/enabled`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetMetricsEnabled {
    pub metrics_enabled: bool,
}

/// `POST /server/port-for-new-access-keys`
#[derive(Debug, Serialize)]
pub struct SetPort {
    pub port: u16,
}

/// `PUT /server/access-key-data-limit` and `PUT /access-keys/{id}/data-limit`
#[derive(Debug, Serialize)]
pub struct SetDataLimit {
    pub limit: ByteQuantity,
}

/// `POST /access-keys` — parameters for a new access key.
///
/// Unset fields are omitted from the body entirely; the server then picks its
/// own defaults. Older server versions ignore everything but `method`.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccessKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Encryption method (cipher name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Data limit in bytes, sent as `{"bytes": n}`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::bytes::opt_byte_quantity::serialize"
    )]
    pub data_limit: Option<u64>,
}

// --- Response bodies ---

/// `GET /metrics/enabled`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsEnabled {
    pub metrics_enabled: bool,
}

/// `GET /access-keys`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKeyList {
    pub access_keys: Vec<AccessKey>,
}

/// `GET /metrics/transfer`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferMetrics {
    pub bytes_transferred_by_user_id: HashMap<String, u64>,
}

/// Error body returned on any non-matching status: `{code, message}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    #[test]
    fn new_access_key_omits_unset_fields() {
        let body = NewAccessKey::default();
        let encoded = codec::encode(&body).expect("encode should succeed");
        assert_eq!(encoded, b"{}");
    }

    #[test]
    fn new_access_key_wraps_data_limit() {
        let body = NewAccessKey {
            name: Some("alice".into()),
            data_limit: Some(1000),
            ..Default::default()
        };
        let encoded = codec::encode(&body).expect("encode should succeed");
        let value: serde_json::Value =
            serde_json::from_slice(&encoded).expect("encoded body is JSON");
        assert_eq!(
            value,
            serde_json::json!({"name": "alice", "dataLimit": {"bytes": 1000}})
        );
    }

    #[test]
    fn set_metrics_enabled_uses_camel_case() {
        let encoded =
            codec::encode(&SetMetricsEnabled { metrics_enabled: true }).expect("encode");
        assert_eq!(encoded, br#"{"metricsEnabled":true}"#);
    }

    #[test]
    fn set_data_limit_shape() {
        let encoded = codec::encode(&SetDataLimit {
            limit: ByteQuantity::new(9000),
        })
        .expect("encode");
        assert_eq!(encoded, br#"{"limit":{"bytes":9000}}"#);
    }

    #[test]
    fn access_key_list_decodes_empty() {
        let list: AccessKeyList = codec::decode(br#"{"accessKeys":[]}"#).expect("decode");
        assert!(list.access_keys.is_empty());
    }

    #[test]
    fn transfer_metrics_decode() {
        let metrics: TransferMetrics =
            codec::decode(br#"{"bytesTransferredByUserId":{"0":100,"4":2000}}"#)
                .expect("decode");
        assert_eq!(metrics.bytes_transferred_by_user_id.len(), 2);
        assert_eq!(metrics.bytes_transferred_by_user_id["4"], 2000);
    }
}
