//! JSON wire codec for the management API.
//!
//! Every request and response body in the workspace funnels through these two
//! functions, so the serialization configuration lives in exactly one place
//! instead of being an ambient default at each call site. The API speaks
//! plain JSON: camelCase keys (declared on the types themselves), numbers as
//! JSON integers, no envelope framing.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ProtoError, Result};

/// Encode a request body as JSON bytes.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(ProtoError::JsonEncode)
}

/// Decode a response body from JSON bytes.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(ProtoError::JsonDecode)
}
