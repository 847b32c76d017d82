//! Standard form choices with soft validation
//!
//! Free-text values outside these lists are accepted; the check only
//! produces a warning for the log.

/// Standard respondent types offered by the feedback form
pub const STANDARD_USER_TYPES: &[&str] = &[
    "Student",
    "Researcher",
    "Healthcare Professional",
    "Data Scientist",
    "Educator/Teacher",
    "Industry Professional",
    "Other",
];

/// ML/AI experience levels
pub const EXPERIENCE_LEVELS: &[&str] = &["Beginner", "Intermediate", "Advanced", "Expert"];

/// Planned usage frequencies
pub const USAGE_FREQUENCIES: &[&str] = &[
    "First time visit",
    "Occasionally",
    "Weekly",
    "Daily",
    "For a specific project",
];

/// Check if user type is standard, return warning if not
pub fn validate_user_type(user_type: &str) -> Option<String> {
    check(user_type, STANDARD_USER_TYPES, "userType")
}

/// Check if experience level is standard, return warning if not
pub fn validate_experience_level(level: &str) -> Option<String> {
    check(level, EXPERIENCE_LEVELS, "experienceLevel")
}

/// Check if usage frequency is standard, return warning if not
pub fn validate_usage_frequency(frequency: &str) -> Option<String> {
    check(frequency, USAGE_FREQUENCIES, "usageFrequency")
}

fn check(value: &str, allowed: &[&str], field: &str) -> Option<String> {
    if allowed.iter().any(|&t| t.eq_ignore_ascii_case(value.trim())) {
        None
    } else {
        Some(format!(
            "Non-standard {} '{}'. Recommended: {:?}",
            field, value, allowed
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_standard_user_type() {
        assert!(validate_user_type("Student").is_none());
        assert!(validate_user_type("data scientist").is_none()); // case insensitive
    }

    #[test]
    fn test_validate_non_standard_user_type() {
        let warning = validate_user_type("Astronaut");
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("Non-standard userType"));
    }

    #[test]
    fn test_validate_experience_and_frequency() {
        assert!(validate_experience_level("Expert").is_none());
        assert!(validate_experience_level("Guru").is_some());
        assert!(validate_usage_frequency("weekly").is_none());
        assert!(validate_usage_frequency("Hourly").is_some());
    }
}
