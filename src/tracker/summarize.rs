//! Summary operations

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};

use crate::event_store::{aggregate, StatsCollector};
use crate::types::{
    AnalyticsSummary, Browser, GeoBreakdown, NotificationRecord, SessionRecord, StoreStats,
    VisitorSummary,
};

use super::AnalyticsTracker;

/// Summary over the configured recent-activity window
pub fn summarize(tracker: &AnalyticsTracker) -> AnalyticsSummary {
    let window = tracker.config.summary_window_days;
    tracker
        .store
        .read(|doc| aggregate::summarize(doc, Utc::now(), window))
}

pub fn sessions_in_last_days(tracker: &AnalyticsTracker, days: i64) -> usize {
    tracker
        .store
        .read(|doc| aggregate::sessions_in_last_days(doc, Utc::now(), days))
}

pub fn daily_visits(tracker: &AnalyticsTracker) -> BTreeMap<NaiveDate, usize> {
    tracker.store.read(aggregate::daily_visits)
}

pub fn hourly_distribution(tracker: &AnalyticsTracker) -> [usize; 24] {
    tracker.store.read(aggregate::hourly_distribution)
}

pub fn sessions_today(tracker: &AnalyticsTracker) -> usize {
    tracker
        .store
        .read(|doc| aggregate::sessions_today(doc, Utc::now()))
}

pub fn active_in_last_hour(tracker: &AnalyticsTracker) -> usize {
    tracker
        .store
        .read(|doc| aggregate::active_in_last_hour(doc, Utc::now()))
}

pub fn most_used_feature(tracker: &AnalyticsTracker) -> String {
    tracker.store.read(aggregate::most_used_feature)
}

pub fn geo_breakdown(tracker: &AnalyticsTracker) -> GeoBreakdown {
    tracker.store.read(aggregate::geo_breakdown)
}

pub fn browser_breakdown(tracker: &AnalyticsTracker) -> BTreeMap<Browser, usize> {
    tracker.store.read(aggregate::browser_breakdown)
}

pub fn recent_notifications(tracker: &AnalyticsTracker, limit: usize) -> Vec<NotificationRecord> {
    tracker
        .store
        .read(|doc| aggregate::recent_notifications(doc, limit))
}

pub fn latest_sessions(tracker: &AnalyticsTracker, limit: usize) -> Vec<SessionRecord> {
    tracker.store.read(|doc| aggregate::latest_sessions(doc, limit))
}

pub fn visitor_summary(tracker: &AnalyticsTracker) -> VisitorSummary {
    tracker
        .store
        .read(|doc| aggregate::visitor_summary(doc, Utc::now()))
}

pub fn store_stats(tracker: &AnalyticsTracker) -> StoreStats {
    StatsCollector::new(&tracker.store).collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Timelike, Utc};
    use tempfile::TempDir;

    use crate::config::AnalyticsConfig;
    use crate::types::{Browser, SessionContext, SessionRecord};
    use crate::AnalyticsTracker;

    #[test]
    fn test_summary_after_activity() {
        let temp_dir = TempDir::new().unwrap();
        let tracker = AnalyticsTracker::new(AnalyticsConfig::new(temp_dir.path()));

        tracker.record_session(&SessionContext::new().user("a"), None, None);
        tracker.record_session(&SessionContext::new().user("b"), None, None);
        tracker.record_session(&SessionContext::new().user("a"), None, None);
        tracker.record_feature_use("clustering_analysis").unwrap();

        let summary = tracker.summarize();
        assert_eq!(summary.total_sessions, 3);
        assert_eq!(summary.unique_users, 2);
        assert_eq!(summary.recent_sessions, 3);
        assert_eq!(summary.recent_window_days, 30);
        assert_eq!(tracker.sessions_in_last_days(7), 3);
        assert_eq!(tracker.most_used_feature(), "clustering_analysis");
        assert_eq!(tracker.visitor_summary().top_feature, "Clustering Analysis");
    }

    #[test]
    fn test_empty_tracker_reads() {
        let temp_dir = TempDir::new().unwrap();
        let tracker = AnalyticsTracker::new(AnalyticsConfig::new(temp_dir.path()));

        assert_eq!(tracker.most_used_feature(), "none");
        assert!(tracker.latest_sessions(5).is_empty());
        assert!(tracker.recent_notifications(5).is_empty());
        assert!(tracker.browser_breakdown().is_empty());

        let stats = tracker.store_stats();
        assert_eq!(stats.session_count, 0);
        assert!(stats.file_size > 0);
    }

    #[test]
    fn test_browser_breakdown() {
        let temp_dir = TempDir::new().unwrap();
        let tracker = AnalyticsTracker::new(AnalyticsConfig::new(temp_dir.path()));

        let edge = "Mozilla/5.0 (Windows NT 10.0) AppleWebKit/537.36 Chrome/120.0 Safari/537.36 Edg/120.0";
        tracker.record_session(&SessionContext::new().agent(edge), None, None);
        tracker.record_session(&SessionContext::new(), None, None);

        let browsers = tracker.browser_breakdown();
        assert_eq!(browsers.get(&Browser::Edge), Some(&1));
        assert_eq!(browsers.get(&Browser::Unknown), Some(&1));
    }

    #[test]
    fn test_time_views() {
        let temp_dir = TempDir::new().unwrap();
        let tracker = AnalyticsTracker::new(AnalyticsConfig::new(temp_dir.path()));
        let now = Utc::now();

        tracker.record_session(&SessionContext::new(), None, None);
        tracker.store().update(|doc| {
            let ctx = SessionContext::new();
            doc.sessions
                .push(SessionRecord::new(&ctx, None, None, now - Duration::days(3)));
        });

        assert_eq!(tracker.active_in_last_hour(), 1);
        assert!(tracker.sessions_today() >= 1);

        let days = tracker.daily_visits();
        assert_eq!(days.values().sum::<usize>(), 2);
        assert_eq!(days.get(&(now - Duration::days(3)).date_naive()), Some(&1));

        let hours = tracker.hourly_distribution();
        assert_eq!(hours.iter().sum::<usize>(), 2);
        assert!(hours[now.hour() as usize] >= 1);
    }

    #[test]
    fn test_huge_window_does_not_panic() {
        let temp_dir = TempDir::new().unwrap();
        let tracker = AnalyticsTracker::new(AnalyticsConfig::new(temp_dir.path()));
        tracker.record_session(&SessionContext::new(), None, None);
        tracker.record_session(&SessionContext::new(), None, None);

        assert_eq!(tracker.sessions_in_last_days(i64::MAX / 86_400_000), 2);
        assert_eq!(tracker.sessions_in_last_days(i64::MAX), 2);
    }
}
