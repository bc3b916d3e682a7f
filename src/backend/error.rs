//! Error types for backend calls

use thiserror::Error;

/// Failure below the envelope: the request never produced a usable body.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, TLS or protocol failure
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Non-2xx HTTP status; body is sanitized and truncated
    #[error("API request failed: {status} - {body}")]
    Status { status: u16, body: String },

    /// Response body was not valid JSON
    #[error("failed to parse response JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Request descriptor could not be turned into an HTTP request
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// HTTP status code, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Error returned by resource operations
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Response JSON did not match the expected envelope shape
    #[error("unexpected response shape: {0}")]
    Decode(#[source] serde_json::Error),

    /// Params must serialize to a JSON object
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// Attachment file could not be read
    #[error("failed to read attachment {path}: {source}")]
    Attachment {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Envelope carried a non-success code
    #[error("backend rejected request (code {code}): {}", .msg.as_deref().unwrap_or("no message"))]
    Application { code: i64, msg: Option<String> },
}

/// Result type for resource operations
pub type ClientResult<T> = Result<T, ClientError>;
