//! Error types for the paper relay.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Errors from the upstream HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Any non-2xx response from the agent API
    #[error("Upstream returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ClientError {
    /// Create a status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status { status, message: message.into() }
    }

    /// Classify a transport failure, folding timeouts into [`ClientError::Timeout`].
    #[must_use]
    pub fn from_transport(err: reqwest_middleware::Error, timeout: Duration) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => Self::Timeout(timeout),
            reqwest_middleware::Error::Reqwest(e) => Self::Http(e),
            other => Self::Middleware(other),
        }
    }

    /// Upstream status code, if the agent answered at all.
    #[must_use]
    pub const fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from parsing and ranking a papers payload.
#[derive(thiserror::Error, Debug)]
pub enum BatchError {
    /// The payload is not a JSON-encoded string
    #[error("papers payload must be a JSON-encoded string, got {0}")]
    NotEncoded(String),

    /// The decoded payload is not an object of records
    #[error("papers payload is not a JSON object: {0}")]
    Payload(#[from] serde_json::Error),

    /// A paper entry is not an object
    #[error("paper '{key}' is not a JSON object")]
    NotARecord {
        /// Key of the entry in the upstream payload
        key: String,
    },

    /// A paper has no `score` field
    #[error("paper '{key}' has no score")]
    MissingScore {
        /// Key of the entry in the upstream payload
        key: String,
    },

    /// Papers arrived without a `finish` flag
    #[error("result snapshot has papers but no finish flag")]
    MissingFinish,

    /// A paper's `score` is not a number
    #[error("paper '{key}' has invalid score {value}")]
    InvalidScore {
        /// Key of the entry in the upstream payload
        key: String,
        /// The offending value, as JSON
        value: String,
    },
}

impl BatchError {
    /// Create a missing score error.
    #[must_use]
    pub fn missing_score(key: impl Into<String>) -> Self {
        Self::MissingScore { key: key.into() }
    }

    /// Create an invalid score error.
    #[must_use]
    pub fn invalid_score(key: impl Into<String>, value: &serde_json::Value) -> Self {
        Self::InvalidScore { key: key.into(), value: value.to_string() }
    }
}

/// Errors returned by the HTTP handlers.
///
/// Every variant renders as a 500 with a `detail` message embedding the cause.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The agent refused or never received the search start
    #[error("Error starting search: {0}")]
    StartSearch(#[source] ClientError),

    /// The agent's result snapshot could not be fetched
    #[error("Error fetching papers: {0}")]
    FetchResults(#[source] ClientError),

    /// The snapshot arrived but could not be ranked
    #[error("Error processing results: {0}")]
    Processing(#[from] BatchError),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        tracing::error!(error = %detail, "Request failed");

        (self.status_code(), Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for batching.
pub type BatchResult<T> = Result<T, BatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_upstream_status() {
        assert_eq!(ClientError::status(502, "bad gateway").upstream_status(), Some(502));
        assert_eq!(ClientError::Timeout(Duration::from_secs(30)).upstream_status(), None);
    }

    #[test]
    fn test_api_error_embeds_upstream_message() {
        let err = ApiError::StartSearch(ClientError::status(503, "agent overloaded"));
        let msg = err.to_string();
        assert!(msg.starts_with("Error starting search"));
        assert!(msg.contains("agent overloaded"));
        assert!(msg.contains("503"));
    }

    #[test]
    fn test_processing_error_from_batch_error() {
        let err: ApiError = BatchError::missing_score("7").into();
        assert_eq!(err.to_string(), "Error processing results: paper '7' has no score");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
