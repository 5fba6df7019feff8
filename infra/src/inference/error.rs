//! Inference proxy errors

use thiserror::Error;

/// Failures while forwarding an image to the inference service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    #[error("Empty image")]
    EmptyPayload,

    /// Non-200 answer; the body is passed through verbatim
    #[error("Inference service returned {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("Timed out waiting for the inference service")]
    UpstreamTimeout,

    #[error("Inference proxy error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::UpstreamTimeout
        } else {
            ProxyError::Internal(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(err: serde_json::Error) -> Self {
        ProxyError::Internal(format!("invalid response body: {}", err))
    }
}
