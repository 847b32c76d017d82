//! Analytics Tracker - usage recording facade
//!
//! Owns the usage document store and routes every call through it:
//! session and visit recording, feature counters, and the read-side
//! summaries. Tracking never fails because of storage; only invalid input
//! is reported back.

mod features;
mod sessions;
mod summarize;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::AnalyticsConfig;
use crate::error::ValidationError;
use crate::event_store::{JsonStore, RetentionPolicy};
use crate::notify::{LogNotifier, Notifier};
use crate::types::{
    AnalyticsDocument, AnalyticsSummary, Browser, GeoBreakdown, GeoInfo, NotificationRecord,
    SessionContext, SessionRecord, StoreStats, VisitorSummary,
};
use crate::utils::atomic::cleanup_temp_files;

/// Thread-safe usage tracker backed by one JSON document
pub struct AnalyticsTracker {
    pub(crate) config: AnalyticsConfig,
    pub(crate) store: JsonStore<AnalyticsDocument>,
    pub(crate) retention: RetentionPolicy,
    pub(crate) notifier: Box<dyn Notifier>,
}

impl AnalyticsTracker {
    /// Create a tracker for the given configuration.
    ///
    /// Creates the data directory and an empty usage file when absent and
    /// removes temp files left behind by interrupted writes.
    pub fn new(config: AnalyticsConfig) -> Self {
        let tracker = Self::open_read_only(config);
        tracker.store.ensure_initialized();

        match cleanup_temp_files(tracker.config.data_dir()) {
            Ok(0) => {}
            Ok(removed) => debug!(removed, "Removed stale temp files"),
            Err(e) => warn!(error = %e, "Could not clean up temp files"),
        }

        tracker
    }

    /// Open a tracker for reporting.
    ///
    /// Leaves the data directory as it is: nothing is created and no temp
    /// files are removed. A missing usage file reads as empty. Recording
    /// through this tracker still writes.
    pub fn open_read_only(config: AnalyticsConfig) -> Self {
        Self {
            store: JsonStore::new(config.usage_path(), config.cache_enabled),
            retention: RetentionPolicy::from_config(&config),
            config,
            notifier: Box::new(LogNotifier),
        }
    }

    /// Create a tracker using `ANALYTICS_DIR` (or `./analytics`)
    pub fn from_env() -> Self {
        Self::new(AnalyticsConfig::from_env())
    }

    /// Replace the notifier used by [`record_visit`](Self::record_visit)
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Underlying store, for cache inspection and tests
    pub fn store(&self) -> &JsonStore<AnalyticsDocument> {
        &self.store
    }

    /// Current usage document (empty if unreadable)
    pub fn load(&self) -> AnalyticsDocument {
        self.store.load()
    }
}

impl Default for AnalyticsTracker {
    fn default() -> Self {
        Self::from_env()
    }
}

// Operations implemented in submodules
impl AnalyticsTracker {
    // Sessions (from sessions.rs)
    pub fn record_session(
        &self,
        context: &SessionContext,
        ip_address: Option<String>,
        geo_info: Option<GeoInfo>,
    ) -> bool {
        sessions::record_session(self, context, ip_address, geo_info)
    }

    pub fn record_visit(
        &self,
        context: &SessionContext,
        ip_address: Option<String>,
        geo_info: Option<GeoInfo>,
    ) -> bool {
        sessions::record_visit(self, context, ip_address, geo_info)
    }

    // Features (from features.rs)
    pub fn record_feature_use(&self, feature: &str) -> Result<bool, ValidationError> {
        features::record_feature_use(self, feature)
    }

    // Read side (from summarize.rs)
    pub fn summarize(&self) -> AnalyticsSummary {
        summarize::summarize(self)
    }

    pub fn sessions_in_last_days(&self, days: i64) -> usize {
        summarize::sessions_in_last_days(self, days)
    }

    /// Sessions per UTC day
    pub fn daily_visits(&self) -> BTreeMap<NaiveDate, usize> {
        summarize::daily_visits(self)
    }

    /// Sessions per UTC hour of day
    pub fn hourly_distribution(&self) -> [usize; 24] {
        summarize::hourly_distribution(self)
    }

    pub fn sessions_today(&self) -> usize {
        summarize::sessions_today(self)
    }

    pub fn active_in_last_hour(&self) -> usize {
        summarize::active_in_last_hour(self)
    }

    pub fn most_used_feature(&self) -> String {
        summarize::most_used_feature(self)
    }

    pub fn geo_breakdown(&self) -> GeoBreakdown {
        summarize::geo_breakdown(self)
    }

    pub fn browser_breakdown(&self) -> BTreeMap<Browser, usize> {
        summarize::browser_breakdown(self)
    }

    pub fn recent_notifications(&self, limit: usize) -> Vec<NotificationRecord> {
        summarize::recent_notifications(self, limit)
    }

    pub fn latest_sessions(&self, limit: usize) -> Vec<SessionRecord> {
        summarize::latest_sessions(self, limit)
    }

    pub fn visitor_summary(&self) -> VisitorSummary {
        summarize::visitor_summary(self)
    }

    pub fn store_stats(&self) -> StoreStats {
        summarize::store_stats(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_initializes_usage_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = AnalyticsConfig::new(temp_dir.path().join("analytics"));
        let tracker = AnalyticsTracker::new(config.clone());

        assert!(config.usage_path().exists());
        assert!(tracker.load().is_empty());
    }

    #[test]
    fn test_new_keeps_existing_data() {
        let temp_dir = TempDir::new().unwrap();
        let config = AnalyticsConfig::new(temp_dir.path());

        let tracker = AnalyticsTracker::new(config.clone());
        tracker.record_feature_use("clustering_analysis").unwrap();
        drop(tracker);

        let tracker = AnalyticsTracker::new(config);
        assert_eq!(tracker.load().features.get("clustering_analysis"), 1);
    }

    #[test]
    fn test_read_only_open_leaves_directory_alone() {
        let temp_dir = TempDir::new().unwrap();
        let missing = AnalyticsConfig::new(temp_dir.path().join("analytics"));

        let tracker = AnalyticsTracker::open_read_only(missing.clone());
        assert_eq!(tracker.summarize().total_sessions, 0);
        assert_eq!(tracker.store_stats().file_size, 0);
        assert!(!missing.data_dir().exists());

        let config = AnalyticsConfig::new(temp_dir.path());
        let leftover = temp_dir.path().join("usage_data.tmp");
        std::fs::write(&leftover, "partial").unwrap();

        let tracker = AnalyticsTracker::open_read_only(config.clone());
        assert!(tracker.load().is_empty());
        assert!(leftover.exists());
        assert!(!config.usage_path().exists());
    }
}
