//! Form inputs and submission results

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SubmitError;
use crate::types::Rating;

/// Values entered in the feedback form
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub user_type: String,
    #[serde(default)]
    pub experience_level: String,
    pub overall_rating: Rating,
    /// Raw slider values, checked against the 1 to 5 scale on submit
    #[serde(default)]
    pub feature_ratings: BTreeMap<String, i64>,
    #[serde(default)]
    pub usage_frequency: String,
    #[serde(default)]
    pub valuable_features: Vec<String>,
    #[serde(default)]
    pub improvement_areas: Vec<String>,
    #[serde(default)]
    pub feedback_text: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl FeedbackForm {
    /// A form with only the overall rating filled in
    pub fn with_rating(overall_rating: Rating) -> Self {
        Self {
            user_type: String::new(),
            experience_level: String::new(),
            overall_rating,
            feature_ratings: BTreeMap::new(),
            usage_frequency: String::new(),
            valuable_features: Vec::new(),
            improvement_areas: Vec::new(),
            feedback_text: None,
            email: None,
        }
    }
}

/// Values entered in the contact / newsletter form
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub newsletter_subscription: bool,
    #[serde(default)]
    pub research_collaboration: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }
}

/// What happened to an accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new record was written with this id
    Saved(String),
    /// The contact email was already registered; nothing was written
    AlreadyRegistered,
}

/// Result shape handed to the form layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub accepted: bool,
    pub error: Option<String>,
}

impl Submission {
    pub fn accepted() -> Self {
        Self {
            accepted: true,
            error: None,
        }
    }

    pub fn rejected(error: impl ToString) -> Self {
        Self {
            accepted: false,
            error: Some(error.to_string()),
        }
    }
}

impl From<Result<SubmitOutcome, SubmitError>> for Submission {
    fn from(result: Result<SubmitOutcome, SubmitError>) -> Self {
        match result {
            Ok(_) => Self::accepted(),
            Err(e) => Self::rejected(e),
        }
    }
}
