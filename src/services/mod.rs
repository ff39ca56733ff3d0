//! Clients for the external engines behind the gateway (graph, vector).

pub mod graph;
pub mod vector;

use axum::http::StatusCode;
use thiserror::Error;
use url::Url;

pub use graph::GraphClient;
pub use vector::VectorClient;

/// Failures talking to an upstream engine.
///
/// `Status` carries an answer the engine gave us; the other two mean we never
/// got a usable answer and are not surfaced to clients in detail.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{message}")]
    Status { status: StatusCode, message: String },
    #[error("upstream transport error: {0}")]
    Transport(String),
    #[error("upstream response could not be decoded: {0}")]
    Decode(String),
}

impl UpstreamError {
    pub fn status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            UpstreamError::Decode(e.to_string())
        } else {
            UpstreamError::Transport(e.to_string())
        }
    }
}

/// `Url::join` drops the last segment of a base without a trailing slash.
pub(crate) fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

pub(crate) fn join(base: &Url, path: &str) -> Result<Url, UpstreamError> {
    base.join(path)
        .map_err(|e| UpstreamError::Transport(format!("invalid upstream endpoint {path}: {e}")))
}
