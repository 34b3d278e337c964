//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    /// Invalid query
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Threshold outside 0.0..=1.0
    #[error("Invalid match threshold {0}: expected a value between 0.0 and 1.0")]
    InvalidThreshold(f64),
}
