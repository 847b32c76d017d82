//! Visitor notifications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GeoInfo;
use crate::utils::time::{format_timestamp, parse_timestamp};

/// Notification kind emitted when a new session starts
pub const NEW_VISITOR: &str = "new_visitor";

/// Notification kept in the usage document's capped history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    #[serde(default)]
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "geo_data", alias = "geo_info", default)]
    pub geo_info: GeoInfo,
}

impl NotificationRecord {
    /// "New visitor" notification for a resolved location
    pub fn new_visitor(geo_info: GeoInfo, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: format_timestamp(at),
            kind: NEW_VISITOR.to_string(),
            message: format!("New visitor from {}, {}", geo_info.city, geo_info.country),
            geo_info,
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}
