//! Usage document container type

use serde::{Deserialize, Serialize};

use super::{FeatureCounter, NotificationRecord, Records, SessionRecord};

/// Top-level contents of `usage_data.json`.
///
/// All three collections are always written, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsDocument {
    #[serde(default)]
    pub sessions: Records<SessionRecord>,
    #[serde(default)]
    pub features: FeatureCounter,
    #[serde(default)]
    pub notifications: Records<NotificationRecord>,
}

impl AnalyticsDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty() && self.features.is_empty() && self.notifications.is_empty()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.len()
    }
}
