//! Validation for submitted form values
//!
//! Email checks are strict and reject submissions. Form choice checks are
//! soft and only warn.

mod email;
mod types;

pub use email::{is_valid_email, normalize_email, optional_email, required_email};
pub use types::{
    validate_experience_level, validate_usage_frequency, validate_user_type, EXPERIENCE_LEVELS,
    STANDARD_USER_TYPES, USAGE_FREQUENCIES,
};

use crate::error::ValidationError;

/// Reject blank feature names
pub fn feature_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyFeatureName)
    } else {
        Ok(trimmed)
    }
}

/// Per-feature ratings must be on the 1 to 5 scale
pub fn feature_rating(feature: &str, value: i64) -> Result<u8, ValidationError> {
    match u8::try_from(value) {
        Ok(v @ 1..=5) => Ok(v),
        _ => Err(ValidationError::RatingOutOfRange {
            feature: feature.to_string(),
            value,
        }),
    }
}
