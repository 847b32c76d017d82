//! Session types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{default_anonymous, default_unknown, UNKNOWN};
use crate::utils::time::{format_timestamp, parse_timestamp};

/// Resolved location of a visitor.
///
/// Lookup happens outside this crate; the tracker only stores the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoInfo {
    #[serde(default = "default_unknown")]
    pub country: String,
    #[serde(default = "default_unknown")]
    pub region: String,
    #[serde(default = "default_unknown")]
    pub city: String,
    #[serde(default = "default_utc")]
    pub timezone: String,
}

fn default_utc() -> String {
    "UTC".to_string()
}

impl GeoInfo {
    pub fn new(
        country: impl Into<String>,
        region: impl Into<String>,
        city: impl Into<String>,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            region: region.into(),
            city: city.into(),
            timezone: timezone.into(),
        }
    }

    /// Location recorded for loopback or unidentified addresses
    pub fn local() -> Self {
        Self::new("Local", "Development", "Localhost", "UTC")
    }

    /// Location recorded when a real address could not be resolved
    pub fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN, UNKNOWN, "UTC")
    }

    /// Fallback when the caller supplies no resolved location
    pub fn fallback_for(ip_address: Option<&str>) -> Self {
        match ip_address.map(str::trim) {
            None | Some("") | Some("unknown") | Some("127.0.0.1") | Some("::1") => Self::local(),
            Some(_) => Self::unknown(),
        }
    }
}

impl Default for GeoInfo {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Caller-owned identity of one browsing session.
///
/// Create it once when the session starts and pass it to every tracking
/// call; the id is never regenerated by the stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub session_id: Uuid,
    pub user_id: Option<String>,
    pub user_agent: Option<String>,
}

impl SessionContext {
    /// Start a new session with a fresh v4 id
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            user_id: None,
            user_agent: None,
        }
    }

    /// Resume a session whose id was issued earlier
    pub fn with_id(session_id: Uuid) -> Self {
        Self {
            session_id,
            user_id: None,
            user_agent: None,
        }
    }

    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn session_id_string(&self) -> String {
        self.session_id.to_string()
    }

    pub fn user_agent_or_unknown(&self) -> String {
        non_blank(self.user_agent.as_deref()).unwrap_or_else(default_unknown)
    }

    pub fn user_id_or_anonymous(&self) -> String {
        non_blank(self.user_id.as_deref()).unwrap_or_else(default_anonymous)
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// One visit, appended when a browsing session starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default = "default_anonymous")]
    pub user_id: String,
    #[serde(default)]
    pub session_id: String,
    #[serde(default = "default_unknown")]
    pub user_agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(
        rename = "geo_data",
        alias = "geo_info",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub geo_info: Option<GeoInfo>,
}

impl SessionRecord {
    pub fn new(
        context: &SessionContext,
        ip_address: Option<String>,
        geo_info: Option<GeoInfo>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp: format_timestamp(at),
            user_id: context.user_id_or_anonymous(),
            session_id: context.session_id_string(),
            user_agent: context.user_agent_or_unknown(),
            ip_address,
            geo_info,
        }
    }

    /// Parsed start time, `None` when the stored value is missing or malformed
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// First eight characters of the session id
    pub fn short_id(&self) -> &str {
        match self.session_id.char_indices().nth(8) {
            Some((idx, _)) => &self.session_id[..idx],
            None => &self.session_id,
        }
    }
}
