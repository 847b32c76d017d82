//! Error types for visitor analytics
//!
//! Persistence errors (`StoreError`) never escape the public tracking API:
//! the stores log them and fall back to an empty document or a dropped
//! write. Validation errors are the only kind handed back to callers.

use thiserror::Error;

/// Errors raised while reading or writing a backing JSON file
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for fallible store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Rejections for user-submitted values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Name is required")]
    MissingName,

    #[error("Feature name must not be empty")]
    EmptyFeatureName,

    #[error("Rating for '{feature}' must be between 1 and 5, got {value}")]
    RatingOutOfRange { feature: String, value: i64 },
}

/// Why a feedback or contact submission was not accepted
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The record was valid but could not be written
    #[error("Could not save {0}, please try again later")]
    Storage(&'static str),
}

/// Failure reported by an outbound notifier
#[derive(Error, Debug)]
#[error("Notification failed: {0}")]
pub struct NotifyError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::InvalidEmail("not-an-email".to_string());
        assert_eq!(err.to_string(), "Invalid email address: not-an-email");

        let err = ValidationError::RatingOutOfRange {
            feature: "ui".to_string(),
            value: 7,
        };
        assert_eq!(err.to_string(), "Rating for 'ui' must be between 1 and 5, got 7");
    }

    #[test]
    fn test_submit_error_is_transparent_for_validation() {
        let err: SubmitError = ValidationError::MissingName.into();
        assert_eq!(err.to_string(), "Name is required");
        assert!(matches!(err, SubmitError::Validation(ValidationError::MissingName)));
    }

    #[test]
    fn test_store_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: StoreError = json_err.into();
        assert!(matches!(err, StoreError::Json(_)));
    }
}
