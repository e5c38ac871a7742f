//! API error types for the search client.

use thiserror::Error;

/// Errors that can occur when fetching tag suggestions.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The search endpoint was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limited by the search endpoint.
    #[error("Rate limited: please wait before retrying")]
    RateLimited,

    /// Server-side error.
    #[error("Search server error: {0}")]
    ServerError(String),

    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body was not a JSON array of tag seeds.
    #[error("Invalid search response: {0}")]
    InvalidResponse(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            404 => ApiError::NotFound(context.to_string()),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ApiError::ServerError(format!("Unexpected HTTP {}: {}", status, context)),
        }
    }
}
