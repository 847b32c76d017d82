//! Summary types for usage statistics

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::FeatureCounter;

/// Aggregate view over the usage document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub total_sessions: usize,
    pub unique_users: usize,
    pub feature_usage: FeatureCounter,
    /// Sessions started inside the last `recent_window_days` days
    pub recent_sessions: usize,
    pub recent_window_days: i64,
    pub countries: BTreeMap<String, usize>,
    pub notifications_count: usize,
}

/// Session counts per location field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeoBreakdown {
    pub countries: BTreeMap<String, usize>,
    pub cities: BTreeMap<String, usize>,
    pub regions: BTreeMap<String, usize>,
}

/// Compact counter shown on the dashboard landing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitorSummary {
    pub total_visitors: usize,
    pub recent_visitors: usize,
    pub top_feature: String,
}

/// Browser family inferred from a user agent string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Browser {
    Edge,
    Chrome,
    Firefox,
    Safari,
    Unknown,
    Other,
}

impl Browser {
    /// Classify a user agent.
    ///
    /// Edge agents also mention Chrome and Safari, and Chrome agents
    /// mention Safari, so the checks run in that order.
    pub fn classify(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        if ua.contains("edge") || ua.contains("edg/") {
            Browser::Edge
        } else if ua.contains("chrome") {
            Browser::Chrome
        } else if ua.contains("firefox") {
            Browser::Firefox
        } else if ua.contains("safari") {
            Browser::Safari
        } else if ua.trim().is_empty() || ua.contains("unknown") {
            Browser::Unknown
        } else {
            Browser::Other
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Browser::Edge => "Microsoft Edge",
            Browser::Chrome => "Google Chrome",
            Browser::Firefox => "Mozilla Firefox",
            Browser::Safari => "Safari",
            Browser::Unknown => "Unknown",
            Browser::Other => "Other",
        };
        write!(f, "{}", name)
    }
}

/// Size and record counts of the usage file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub file_size: u64,
    pub session_count: usize,
    pub feature_count: usize,
    pub notification_count: usize,
}

impl StoreStats {
    /// Format size in human-readable format
    pub fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.2} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.2} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.2} KB", bytes as f64 / KB as f64)
        } else {
            format!("{} B", bytes)
        }
    }
}
