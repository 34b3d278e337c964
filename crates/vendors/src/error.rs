//! Error types for the vendors crate.

use crate::model::ModerationStatus;
use thelewale_core::ErrorCode;
use thelewale_geo::GeoError;
use thelewale_search::SearchError;
use thiserror::Error;

/// Result type alias for backend calls.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for vendor operations.
pub type Result<T> = std::result::Result<T, VendorError>;

/// Failures reported by a backend implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Network failure, timeout or 5xx
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Record does not exist
    #[error("{kind} `{id}` not found")]
    NotFound {
        /// Record kind (vendor, review, user)
        kind: &'static str,
        /// Requested identifier
        id: String,
    },

    /// Backend refused the request (4xx other than 404)
    #[error("Backend rejected the request: {0}")]
    Rejected(String),

    /// Response could not be decoded
    #[error("Malformed backend data: {0}")]
    Malformed(String),
}

impl StoreError {
    /// Shorthand for [`StoreError::NotFound`].
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }
}

/// Errors surfaced by vendor operations.
#[derive(Debug, Error)]
pub enum VendorError {
    /// Identity-gated action attempted without a signed-in user
    #[error("Sign in to {action}")]
    SignInRequired {
        /// What the user tried to do
        action: &'static str,
    },

    /// Moderation attempted by a non-admin
    #[error("Only admins can moderate vendors")]
    NotAdmin,

    /// Requested record is missing or not visible to the caller
    #[error("{kind} `{id}` not found")]
    NotFound {
        /// Record kind
        kind: &'static str,
        /// Requested identifier
        id: String,
    },

    /// Star rating outside 1..=5
    #[error("Rating must be between 1 and 5 stars, got {0}")]
    InvalidRating(u8),

    /// Submitted data failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Moderation status change that is not allowed
    #[error("Cannot move a vendor from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: ModerationStatus,
        /// Requested status
        to: ModerationStatus,
    },

    /// Configuration values that cannot build a pipeline
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Coordinate or place parsing failure
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// Query rejected by the matcher
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Backend failure; the operation was abandoned
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A follow-up write failed and the first write was undone
    #[error("Could not {step}; the change was rolled back: {source}")]
    RolledBack {
        /// The follow-up write that failed
        step: &'static str,
        /// Why it failed
        #[source]
        source: StoreError,
    },

    /// A follow-up write failed and undoing the first write failed too
    #[error("Could not {step} ({source}) and the rollback failed: {rollback}")]
    CompensationFailed {
        /// The follow-up write that failed
        step: &'static str,
        /// Why it failed
        #[source]
        source: StoreError,
        /// Why the rollback failed
        rollback: StoreError,
    },
}

impl VendorError {
    /// Error code for integration with thelewale-core error handling.
    pub fn code(&self) -> ErrorCode {
        match self {
            VendorError::SignInRequired { .. } => ErrorCode::SignInRequired,
            VendorError::NotAdmin => ErrorCode::NotAdmin,
            VendorError::NotFound { .. } => ErrorCode::NotFound,
            VendorError::InvalidRating(_) => ErrorCode::InvalidRating,
            VendorError::InvalidInput(_) | VendorError::Search(_) => ErrorCode::InvalidInput,
            VendorError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            VendorError::Config(_) => ErrorCode::InvalidConfigValue,
            VendorError::Geo(_) => ErrorCode::InvalidCoordinate,
            VendorError::Store(StoreError::NotFound { .. }) => ErrorCode::NotFound,
            VendorError::Store(StoreError::Unavailable(_)) => ErrorCode::BackendUnavailable,
            VendorError::Store(_) | VendorError::RolledBack { .. } => ErrorCode::BackendError,
            VendorError::CompensationFailed { .. } => ErrorCode::CompensationFailed,
        }
    }

    /// What the user can do about it, when there is something.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            VendorError::SignInRequired { .. } => Some("Pass --user or set THELEWALE_USER"),
            VendorError::NotAdmin => Some("Ask an admin to review the submission"),
            VendorError::InvalidRating(_) => Some("Use a rating from 1 to 5"),
            VendorError::InvalidTransition { .. } => Some("Only pending vendors can be approved or rejected"),
            VendorError::Store(StoreError::Unavailable(_)) => Some("Check THELEWALE_API_URL and your connection"),
            VendorError::CompensationFailed { .. } => Some("Remove the partial record by hand"),
            _ => None,
        }
    }

    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(VendorError::NotAdmin.code(), ErrorCode::NotAdmin);
        assert_eq!(
            VendorError::Store(StoreError::Unavailable("timeout".into())).code(),
            ErrorCode::BackendUnavailable
        );
        assert_eq!(
            VendorError::Store(StoreError::not_found("vendor", "v1")).code(),
            ErrorCode::NotFound
        );
    }

    #[test]
    fn test_messages() {
        let err = VendorError::SignInRequired { action: "add a vendor" };
        assert_eq!(err.to_string(), "Sign in to add a vendor");

        let err = VendorError::InvalidTransition {
            from: ModerationStatus::Approved,
            to: ModerationStatus::Rejected,
        };
        assert_eq!(err.to_string(), "Cannot move a vendor from approved to rejected");
    }

    #[test]
    fn test_suggestions() {
        assert!(VendorError::SignInRequired { action: "write a review" }
            .suggestion()
            .is_some_and(|s| s.contains("THELEWALE_USER")));
        assert!(VendorError::InvalidInput("vendor name is required".into()).suggestion().is_none());
    }
}
