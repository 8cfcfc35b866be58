//! Endpoint descriptors: verb, path segments, and expected status.
//!
//! The ~15 API operations differ only in path, verb, body shape, and result
//! type; everything else is the shared pipeline in `client.rs`. `Endpoint`
//! captures the varying part as data so the pipeline never branches per
//! operation.

use reqwest::{Method, StatusCode};
use url::Url;

use outline_proto::ProtoError;

use crate::error::Result;

/// One API operation's location: HTTP verb plus path segments relative to
/// the credentials' API URL.
#[derive(Debug)]
pub(crate) struct Endpoint<'a> {
    pub method: Method,
    pub segments: &'a [&'a str],
}

impl<'a> Endpoint<'a> {
    pub fn get(segments: &'a [&'a str]) -> Self {
        Self {
            method: Method::GET,
            segments,
        }
    }

    pub fn post(segments: &'a [&'a str]) -> Self {
        Self {
            method: Method::POST,
            segments,
        }
    }

    pub fn put(segments: &'a [&'a str]) -> Self {
        Self {
            method: Method::PUT,
            segments,
        }
    }

    pub fn delete(segments: &'a [&'a str]) -> Self {
        Self {
            method: Method::DELETE,
            segments,
        }
    }

    /// Success status for this endpoint's verb.
    pub fn expected_status(&self) -> StatusCode {
        expected_status(&self.method)
    }

    /// Join the API base URL with this endpoint's path segments.
    ///
    /// Segments are appended as path components, never by string
    /// concatenation: the base URL's path prefix is preserved, no double
    /// slashes appear, and characters unsafe in a path segment are
    /// percent-encoded.
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ProtoError::InvalidApiUrl(base.clone()))?
            .pop_if_empty()
            .extend(self.segments);
        Ok(url)
    }
}

/// The success status for a verb. Total, pure, and verb-only — the mapping
/// is fixed by API convention and never depends on path or body.
pub(crate) fn expected_status(method: &Method) -> StatusCode {
    match method.as_str() {
        "GET" => StatusCode::OK,
        "POST" => StatusCode::CREATED,
        "PUT" | "DELETE" => StatusCode::NO_CONTENT,
        _ => StatusCode::OK,
    }
}
