//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing session or rejected credentials
    #[error("authentication required: {0}")]
    Auth(String),

    /// Request exceeded the configured timeout and was aborted
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Transport-level failure (DNS, connect, TLS, reset)
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx HTTP response from the platform
    #[error("CRM API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// 2xx response whose body does not carry what the operation needs
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session storage I/O error
    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A facade operation failed; wraps the underlying error
    #[error("{op} failed: {source}")]
    Operation {
        op: &'static str,
        #[source]
        source: Box<ClientError>,
    },
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Map a reqwest failure, routing timeouts to their own variant.
    pub(crate) fn transport(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(timeout_ms)
        } else {
            ClientError::Network(err.to_string())
        }
    }
}
