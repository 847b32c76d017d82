//! Retention policy for the usage document
//!
//! Applied at write time only:
//! - sessions: once the history grows past `max_sessions`, only the newest
//!   `retained_sessions` are kept
//! - notifications: the newest `max_notifications` are kept
//! - feature counters are never trimmed (one entry per feature name)
//! - entries kept verbatim because they could not be read are not counted
//!   and never trimmed

use tracing::info;

use crate::config::AnalyticsConfig;
use crate::types::AnalyticsDocument;

/// History limits for the usage document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub max_sessions: usize,
    pub retained_sessions: usize,
    pub max_notifications: usize,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_sessions: 1000,
            retained_sessions: 500,
            max_notifications: 100,
        }
    }
}

/// Records removed by one application of the policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetentionOutcome {
    pub sessions_trimmed: usize,
    pub notifications_trimmed: usize,
}

impl RetentionOutcome {
    pub fn is_noop(&self) -> bool {
        self.sessions_trimmed == 0 && self.notifications_trimmed == 0
    }
}

impl RetentionPolicy {
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self {
            max_sessions: config.max_sessions,
            retained_sessions: config.retained_sessions.min(config.max_sessions),
            max_notifications: config.max_notifications,
        }
    }

    /// Trim sessions once they exceed the ceiling. Oldest go first.
    pub fn trim_sessions<T>(&self, sessions: &mut Vec<T>) -> usize {
        if sessions.len() <= self.max_sessions {
            return 0;
        }
        keep_newest(sessions, self.retained_sessions)
    }

    /// Keep only the newest notifications
    pub fn trim_notifications<T>(&self, notifications: &mut Vec<T>) -> usize {
        keep_newest(notifications, self.max_notifications)
    }

    /// Apply both limits to a document
    pub fn apply(&self, doc: &mut AnalyticsDocument) -> RetentionOutcome {
        let outcome = RetentionOutcome {
            sessions_trimmed: self.trim_sessions(doc.sessions.as_mut_vec()),
            notifications_trimmed: self.trim_notifications(doc.notifications.as_mut_vec()),
        };

        if !outcome.is_noop() {
            info!(
                sessions = outcome.sessions_trimmed,
                notifications = outcome.notifications_trimmed,
                "Trimmed usage history"
            );
        }

        outcome
    }
}

/// Drop leading (oldest) entries until at most `keep` remain
fn keep_newest<T>(items: &mut Vec<T>, keep: usize) -> usize {
    if items.len() <= keep {
        return 0;
    }
    let excess = items.len() - keep;
    items.drain(..excess);
    excess
}
