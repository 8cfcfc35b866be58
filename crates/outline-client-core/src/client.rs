//! `OutlineClient`: typed access to the server management API.
//!
//! Every operation funnels through one generic pipeline: build the URL from
//! an endpoint descriptor, attach the verb and optional JSON body, execute
//! over the pinned transport, enforce the verb's expected status, and decode
//! either the typed success body or the server error shape. The public
//! methods below differ only in the data they hand the pipeline.
//!
//! Calls are independent async operations: each suspends its own task for
//! one round trip and nothing orders two concurrent calls against the same
//! client. Callers needing "create then list sees it" must await the first
//! call before issuing the second.

use std::collections::HashMap;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use outline_proto::{codec, wire, AccessKey, ByteQuantity, Credentials, ServerError, ServerInfo};

use crate::endpoint::Endpoint;
use crate::error::{ClientError, Result};
use crate::transport;

/// Marker for bodiless requests; keeps the generic pipeline monomorphic.
const NO_BODY: Option<&()> = None;

/// Client for one managed server.
///
/// Owns one transport session and one mutable credentials/`verify_ssl` pair.
/// Mutating either rebuilds the transport and takes effect for requests
/// issued afterwards; requests already in flight keep the session they
/// started on.
pub struct OutlineClient {
    credentials: Credentials,
    verify_ssl: bool,
    http: reqwest::Client,
}

impl OutlineClient {
    /// Create a client for the server described by `credentials`.
    ///
    /// Certificate pinning is enabled; disable it (for instance against a
    /// server mid-certificate-rotation) with [`set_verify_ssl`].
    ///
    /// [`set_verify_ssl`]: OutlineClient::set_verify_ssl
    pub fn new(credentials: Credentials) -> Result<Self> {
        let http = transport::build_http_client(&credentials, true)?;
        Ok(Self {
            credentials,
            verify_ssl: true,
            http,
        })
    }

    /// The credentials currently in use.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Replace the credentials.
    pub fn set_credentials(&mut self, credentials: Credentials) -> Result<()> {
        self.http = transport::build_http_client(&credentials, self.verify_ssl)?;
        self.credentials = credentials;
        Ok(())
    }

    /// Whether the server certificate is checked against the pinned digest.
    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// Enable or disable certificate pinning.
    pub fn set_verify_ssl(&mut self, verify_ssl: bool) -> Result<()> {
        self.http = transport::build_http_client(&self.credentials, verify_ssl)?;
        self.verify_ssl = verify_ssl;
        Ok(())
    }

    // --- Server ---

    /// Information about the server.
    pub async fn server(&self) -> Result<ServerInfo> {
        self.fetch(Endpoint::get(&["server"]), NO_BODY).await
    }

    /// Change the hostname or IP address used when constructing access URLs.
    ///
    /// If a hostname is given, DNS must be set up independently of this API.
    pub async fn set_hostname(&self, hostname: &str) -> Result<()> {
        self.send(
            Endpoint::put(&["server", "hostname-for-access-keys"]),
            Some(&wire::SetHostname { hostname }),
        )
        .await?;
        Ok(())
    }

    /// Rename the server.
    pub async fn rename_server(&self, name: &str) -> Result<()> {
        self.send(Endpoint::put(&["name"]), Some(&wire::SetName { name }))
            .await?;
        Ok(())
    }

    /// Whether anonymous metrics sharing is enabled.
    pub async fn metrics_enabled(&self) -> Result<bool> {
        let body: wire::MetricsEnabled = self
            .fetch(Endpoint::get(&["metrics", "enabled"]), NO_BODY)
            .await?;
        Ok(body.metrics_enabled)
    }

    /// Enable or disable sharing of anonymous metrics.
    pub async fn set_metrics_enabled(&self, enabled: bool) -> Result<()> {
        self.send(
            Endpoint::put(&["metrics", "enabled"]),
            Some(&wire::SetMetricsEnabled {
                metrics_enabled: enabled,
            }),
        )
        .await?;
        Ok(())
    }

    // --- Access keys ---

    /// Change the default port for newly created access keys.
    ///
    /// The port may already be in use by existing keys.
    pub async fn set_default_port(&self, port: u16) -> Result<()> {
        self.send(
            Endpoint::post(&["server", "port-for-new-access-keys"]),
            Some(&wire::SetPort { port }),
        )
        .await?;
        Ok(())
    }

    /// Create an access key.
    ///
    /// Unset parameters are chosen by the server. The returned key carries
    /// the generated password — it cannot be retrieved again later.
    pub async fn create_access_key(&self, params: &wire::NewAccessKey) -> Result<AccessKey> {
        self.fetch(Endpoint::post(&["access-keys"]), Some(params))
            .await
    }

    /// All active access keys.
    pub async fn access_keys(&self) -> Result<Vec<AccessKey>> {
        let body: wire::AccessKeyList = self
            .fetch(Endpoint::get(&["access-keys"]), NO_BODY)
            .await?;
        Ok(body.access_keys)
    }

    /// Delete an access key.
    pub async fn delete_access_key(&self, id: &str) -> Result<()> {
        self.send(Endpoint::delete(&["access-keys", id]), NO_BODY)
            .await?;
        Ok(())
    }

    /// Rename an access key.
    pub async fn rename_access_key(&self, id: &str, name: &str) -> Result<()> {
        self.send(
            Endpoint::put(&["access-keys", id, "name"]),
            Some(&wire::SetName { name }),
        )
        .await?;
        Ok(())
    }

    // --- Metrics ---

    /// Bytes transferred per access key id.
    pub async fn data_transferred(&self) -> Result<HashMap<String, u64>> {
        let body: wire::TransferMetrics = self
            .fetch(Endpoint::get(&["metrics", "transfer"]), NO_BODY)
            .await?;
        Ok(body.bytes_transferred_by_user_id)
    }

    // --- Data limits ---

    /// Set a data transfer limit, in bytes, for all access keys.
    pub async fn set_global_data_limit(&self, limit_bytes: u64) -> Result<()> {
        self.send(
            Endpoint::put(&["server", "access-key-data-limit"]),
            Some(&wire::SetDataLimit {
                limit: ByteQuantity::new(limit_bytes),
            }),
        )
        .await?;
        Ok(())
    }

    /// Remove the server-wide data limit.
    pub async fn remove_global_data_limit(&self) -> Result<()> {
        self.send(Endpoint::delete(&["server", "access-key-data-limit"]), NO_BODY)
            .await?;
        Ok(())
    }

    /// Set a per-key data transfer limit in bytes, overriding the server-wide
    /// limit for that key.
    pub async fn set_access_key_data_limit(&self, id: &str, limit_bytes: u64) -> Result<()> {
        self.send(
            Endpoint::put(&["access-keys", id, "data-limit"]),
            Some(&wire::SetDataLimit {
                limit: ByteQuantity::new(limit_bytes),
            }),
        )
        .await?;
        Ok(())
    }

    /// Remove a key's custom data limit.
    pub async fn remove_access_key_data_limit(&self, id: &str) -> Result<()> {
        self.send(Endpoint::delete(&["access-keys", id, "data-limit"]), NO_BODY)
            .await?;
        Ok(())
    }

    // --- Pipeline ---

    /// Execute an endpoint and return the raw success body.
    ///
    /// Fails with [`ClientError::Server`] on any status other than the
    /// verb's expected one, decoding the error body as `{code, message}`
    /// where possible.
    async fn send<B>(&self, endpoint: Endpoint<'_>, body: Option<&B>) -> Result<Bytes>
    where
        B: Serialize + ?Sized,
    {
        let url = endpoint.url(self.credentials.api_url())?;
        let expected = endpoint.expected_status();
        debug!(method = %endpoint.method, %url, "sending request");

        let mut request = self.http.request(endpoint.method, url);
        if let Some(body) = body {
            let payload = codec::encode(body).map_err(ClientError::Encode)?;
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(payload);
        }

        let response = request.send().await.map_err(transport::classify_send_error)?;
        let status = response.status();
        let payload = response.bytes().await.map_err(ClientError::InvalidResponse)?;

        if status != expected {
            let server_error = ServerError::from_body(&payload);
            debug!(%status, %expected, error = %server_error, "unexpected status");
            return Err(ClientError::Server(server_error));
        }

        Ok(payload)
    }

    /// Execute an endpoint and decode the success body into `T`.
    async fn fetch<B, T>(&self, endpoint: Endpoint<'_>, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = self.send(endpoint, body).await?;
        codec::decode(&payload).map_err(ClientError::MalformedBody)
    }
}
