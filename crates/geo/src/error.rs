//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    /// Latitude/longitude outside the valid range or not finite
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Place text that looked like a coordinate but could not be read
    #[error("Invalid place query: {0}")]
    InvalidPlace(String),
}
