//! Feedback records and the feedback document

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Records;
use crate::utils::time::{now_timestamp, parse_timestamp};

/// Star symbol used by the legacy string encoding of ratings
const RATING_SYMBOL: char = '⭐';

/// Overall rating on a 1 to 5 scale.
///
/// Stored as an integer. Older feedback files stored the rating as a label
/// prefixed with one star per point (`"⭐⭐⭐ Good"`); those still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rating {
    Poor = 1,
    Fair = 2,
    Good = 3,
    VeryGood = 4,
    Excellent = 5,
}

impl Rating {
    pub const ALL: [Rating; 5] = [
        Rating::Poor,
        Rating::Fair,
        Rating::Good,
        Rating::VeryGood,
        Rating::Excellent,
    ];

    pub fn from_value(value: u64) -> Option<Self> {
        match value {
            1 => Some(Rating::Poor),
            2 => Some(Rating::Fair),
            3 => Some(Rating::Good),
            4 => Some(Rating::VeryGood),
            5 => Some(Rating::Excellent),
            _ => None,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::Poor => "Poor",
            Rating::Fair => "Fair",
            Rating::Good => "Good",
            Rating::VeryGood => "Very Good",
            Rating::Excellent => "Excellent",
        }
    }

    /// `"⭐⭐⭐ Good"` style rendering
    pub fn stars(self) -> String {
        let stars: String = std::iter::repeat(RATING_SYMBOL)
            .take(self.value() as usize)
            .collect();
        format!("{} {}", stars, self.label())
    }

    /// Parse the legacy text encodings: star count, label, or digit
    pub fn parse_legacy(text: &str) -> Option<Self> {
        let stars = text.chars().filter(|c| *c == RATING_SYMBOL).count();
        if stars > 0 {
            return Self::from_value(stars as u64);
        }

        let text = text.trim();
        if let Ok(value) = text.parse::<u64>() {
            return Self::from_value(value);
        }

        Self::ALL
            .into_iter()
            .find(|rating| rating.label().eq_ignore_ascii_case(text))
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RatingVisitor)
    }
}

struct RatingVisitor;

impl<'de> Visitor<'de> for RatingVisitor {
    type Value = Rating;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer rating from 1 to 5 or a star-encoded rating string")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Rating, E> {
        Rating::from_value(value)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Rating, E> {
        u64::try_from(value)
            .ok()
            .and_then(Rating::from_value)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(value), &self))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Rating, E> {
        Rating::parse_legacy(value).ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

/// Keeps legacy records whose rating text carries no parseable rating.
fn lenient_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Rating>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value::<Rating>(v).ok()))
}

/// One submitted feedback form.
///
/// The first feedback widget wrote `rating`, `usage_type` and `feedback`
/// with no id; those keys are read as aliases and the id stays empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    #[serde(default)]
    pub feedback_id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, alias = "usage_type")]
    pub user_type: String,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default, alias = "rating", deserialize_with = "lenient_rating")]
    pub overall_rating: Option<Rating>,
    #[serde(default)]
    pub feature_ratings: BTreeMap<String, u8>,
    #[serde(default)]
    pub usage_frequency: String,
    #[serde(default)]
    pub valuable_features: Vec<String>,
    #[serde(default)]
    pub improvement_areas: Vec<String>,
    #[serde(default, alias = "feedback")]
    pub feedback_text: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub user_agent: String,
}

impl FeedbackRecord {
    pub fn submitted_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

/// Running totals kept next to the feedback list. `last_updated` stays
/// empty until the first write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackStats {
    #[serde(default)]
    pub total_feedback: usize,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub last_updated: String,
}

/// Top-level contents of `feedback.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackDocument {
    #[serde(default)]
    pub feedback: Records<FeedbackRecord>,
    #[serde(default)]
    pub stats: FeedbackStats,
}

impl FeedbackDocument {
    /// Recompute totals and the mean of all parseable ratings
    pub fn refresh_stats(&mut self) {
        self.stats.total_feedback = self.feedback.len();

        let ratings: Vec<u8> = self
            .feedback
            .iter()
            .filter_map(|fb| fb.overall_rating.map(Rating::value))
            .collect();

        if !ratings.is_empty() {
            let sum: u64 = ratings.iter().map(|r| *r as u64).sum();
            self.stats.average_rating = sum as f64 / ratings.len() as f64;
        }
        self.stats.last_updated = now_timestamp();
    }
}

/// Flattened feedback row for tabular export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackRow {
    pub timestamp: String,
    pub user_type: String,
    pub experience_level: String,
    pub overall_rating: Option<u8>,
    pub usage_frequency: String,
    pub feedback_text: Option<String>,
    pub email_provided: bool,
    pub valuable_features: String,
    pub improvement_areas: String,
    /// `<feature>_rating` columns
    #[serde(flatten)]
    pub ratings: BTreeMap<String, u8>,
}

impl From<&FeedbackRecord> for FeedbackRow {
    fn from(fb: &FeedbackRecord) -> Self {
        Self {
            timestamp: fb.timestamp.clone(),
            user_type: fb.user_type.clone(),
            experience_level: fb.experience_level.clone(),
            overall_rating: fb.overall_rating.map(Rating::value),
            usage_frequency: fb.usage_frequency.clone(),
            feedback_text: fb.feedback_text.clone(),
            email_provided: fb.email.as_deref().map(|e| !e.is_empty()).unwrap_or(false),
            valuable_features: fb.valuable_features.join(", "),
            improvement_areas: fb.improvement_areas.join(", "),
            ratings: fb
                .feature_ratings
                .iter()
                .map(|(feature, value)| (format!("{}_rating", feature), *value))
                .collect(),
        }
    }
}
