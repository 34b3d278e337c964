//! Error types for the API client

use thelewale_vendors::StoreError;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// All retry attempts exhausted
    #[error("All {attempts} retry attempts failed: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Last error message
        last_error: String,
    },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A response field could not be interpreted
    #[error("Unexpected response: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            // Connection errors and timeouts
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            // 5xx and 429
            Self::ApiResponse { status, .. } => *status >= 500 || *status == 429,
            Self::Config(_)
            | Self::Json(_)
            | Self::InvalidUrl(_)
            | Self::Unexpected(_)
            | Self::RetriesExhausted { .. } => false,
        }
    }

    /// Check if the resource does not exist (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiResponse { status: 404, .. })
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }
}

impl From<ApiError> for StoreError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Json(_) | ApiError::Unexpected(_) => StoreError::Malformed(err.to_string()),
            ApiError::ApiResponse { status, .. } if status < 500 && status != 429 => {
                StoreError::Rejected(err.to_string())
            }
            ApiError::Config(_) | ApiError::InvalidUrl(_) => StoreError::Rejected(err.to_string()),
            ApiError::Request(_) | ApiError::ApiResponse { .. } | ApiError::RetriesExhausted { .. } => {
                StoreError::Unavailable(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(ApiError::api_response(503, "down").is_retryable());
        assert!(ApiError::api_response(429, "slow down").is_retryable());
        assert!(!ApiError::api_response(404, "missing").is_retryable());
        assert!(!ApiError::config("bad").is_retryable());
    }

    #[test]
    fn test_store_error_mapping() {
        assert!(matches!(
            StoreError::from(ApiError::api_response(502, "bad gateway")),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            StoreError::from(ApiError::api_response(403, "forbidden")),
            StoreError::Rejected(_)
        ));
        assert!(matches!(
            StoreError::from(ApiError::Unexpected("lat".into())),
            StoreError::Malformed(_)
        ));
    }
}
