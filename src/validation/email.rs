//! Email validation

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Check `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Trim and lower-case an email for storage and comparison
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate an optional email field.
///
/// Blank means "not provided" and yields `Ok(None)`. Anything else must
/// be a well-formed address.
pub fn optional_email(email: Option<&str>) -> Result<Option<String>, ValidationError> {
    match email.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if is_valid_email(value) => Ok(Some(value.to_string())),
        Some(value) => Err(ValidationError::InvalidEmail(value.to_string())),
    }
}

/// Validate a required email field, returning its normalized form
pub fn required_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = email.trim();
    if is_valid_email(trimmed) {
        Ok(normalize_email(trimmed))
    } else {
        Err(ValidationError::InvalidEmail(trimmed.to_string()))
    }
}
