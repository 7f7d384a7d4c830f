//! Error types for byteblog-client

use thiserror::Error;

/// Result type alias for API client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the API
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The server could not be reached at all.
    #[error(
        "Failed to connect to the API server. Please check your connection or try again later."
    )]
    Unreachable(#[source] reqwest::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid response body: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of an API error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the server rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}
