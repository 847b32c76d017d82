//! Session and visit recording

use chrono::Utc;
use tracing::{debug, warn};

use crate::types::{GeoInfo, NotificationRecord, SessionContext, SessionRecord};

use super::AnalyticsTracker;

/// Append one session record. No deduplication: every call is a visit.
///
/// Returns `false` when the write was dropped.
pub fn record_session(
    tracker: &AnalyticsTracker,
    context: &SessionContext,
    ip_address: Option<String>,
    geo_info: Option<GeoInfo>,
) -> bool {
    let record = SessionRecord::new(context, ip_address, geo_info, Utc::now());
    let retention = tracker.retention;

    tracker
        .store
        .update(|doc| {
            doc.sessions.push(record);
            retention.apply(doc);
        })
        .is_some()
}

/// Record a session together with a "new visitor" notification.
///
/// Without geo data the location falls back to the local-development
/// placeholder for loopback addresses and to "unknown" otherwise. The
/// notifier is called only after the notification is persisted.
pub fn record_visit(
    tracker: &AnalyticsTracker,
    context: &SessionContext,
    ip_address: Option<String>,
    geo_info: Option<GeoInfo>,
) -> bool {
    let now = Utc::now();
    let geo = geo_info.unwrap_or_else(|| GeoInfo::fallback_for(ip_address.as_deref()));
    let record = SessionRecord::new(context, ip_address, Some(geo.clone()), now);
    let notification = NotificationRecord::new_visitor(geo, now);
    let retention = tracker.retention;

    let saved = tracker
        .store
        .update(|doc| {
            doc.sessions.push(record);
            doc.notifications.push(notification.clone());
            retention.apply(doc);
        })
        .is_some();

    if saved {
        debug!(session = %context.session_id, "Recorded visit");
        if let Err(e) = tracker.notifier.notify(&notification) {
            warn!(error = %e, "Notifier failed, continuing");
        }
    }
    saved
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tempfile::TempDir;

    use crate::config::AnalyticsConfig;
    use crate::error::NotifyError;
    use crate::notify::Notifier;
    use crate::types::{GeoInfo, NotificationRecord, SessionContext, NEW_VISITOR};
    use crate::AnalyticsTracker;

    struct CountingNotifier(Arc<AtomicUsize>);

    impl Notifier for CountingNotifier {
        fn notify(&self, _: &NotificationRecord) -> Result<(), NotifyError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingNotifier;

    impl Notifier for FailingNotifier {
        fn notify(&self, _: &NotificationRecord) -> Result<(), NotifyError> {
            Err(NotifyError("smtp unavailable".to_string()))
        }
    }

    fn create_tracker() -> (AnalyticsTracker, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let tracker = AnalyticsTracker::new(AnalyticsConfig::new(temp_dir.path()));
        (tracker, temp_dir)
    }

    #[test]
    fn test_record_session_appends_without_dedup() {
        let (tracker, _temp_dir) = create_tracker();
        let ctx = SessionContext::new().user("a").agent("Mozilla/5.0 Firefox/120.0");

        assert!(tracker.record_session(&ctx, None, None));
        assert!(tracker.record_session(&ctx, None, None));

        let doc = tracker.load();
        assert_eq!(doc.sessions.len(), 2);
        assert_eq!(doc.sessions[0].session_id, doc.sessions[1].session_id);
        assert_eq!(doc.sessions[0].user_id, "a");
        assert!(doc.sessions[0].geo_info.is_none());
        assert!(doc.notifications.is_empty());
    }

    #[test]
    fn test_record_visit_adds_notification() {
        let (tracker, _temp_dir) = create_tracker();
        let geo = GeoInfo::new("Vietnam", "Hanoi", "Hanoi", "Asia/Ho_Chi_Minh");

        assert!(tracker.record_visit(&SessionContext::new(), Some("203.0.113.7".into()), Some(geo)));

        let doc = tracker.load();
        assert_eq!(doc.sessions.len(), 1);
        assert_eq!(doc.notifications.len(), 1);
        assert_eq!(doc.notifications[0].kind, NEW_VISITOR);
        assert_eq!(doc.notifications[0].message, "New visitor from Hanoi, Vietnam");
    }

    #[test]
    fn test_record_visit_geo_fallback() {
        let (tracker, _temp_dir) = create_tracker();

        tracker.record_visit(&SessionContext::new(), Some("127.0.0.1".into()), None);
        tracker.record_visit(&SessionContext::new(), Some("198.51.100.4".into()), None);

        let doc = tracker.load();
        assert_eq!(doc.sessions[0].geo_info, Some(GeoInfo::local()));
        assert_eq!(doc.sessions[1].geo_info, Some(GeoInfo::unknown()));
    }

    #[test]
    fn test_notifier_invoked_once_per_visit() {
        let temp_dir = TempDir::new().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let tracker = AnalyticsTracker::new(AnalyticsConfig::new(temp_dir.path()))
            .with_notifier(CountingNotifier(calls.clone()));

        tracker.record_visit(&SessionContext::new(), None, None);
        tracker.record_session(&SessionContext::new(), None, None);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failing_notifier_does_not_lose_visit() {
        let temp_dir = TempDir::new().unwrap();
        let tracker = AnalyticsTracker::new(AnalyticsConfig::new(temp_dir.path()))
            .with_notifier(FailingNotifier);

        assert!(tracker.record_visit(&SessionContext::new(), None, None));
        assert_eq!(tracker.load().notifications.len(), 1);
    }

    #[test]
    fn test_notifications_capped() {
        let temp_dir = TempDir::new().unwrap();
        let config = AnalyticsConfig::new(temp_dir.path()).with_max_notifications(3);
        let tracker = AnalyticsTracker::new(config);

        for _ in 0..5 {
            tracker.record_visit(&SessionContext::new(), None, None);
        }

        let doc = tracker.load();
        assert_eq!(doc.sessions.len(), 5);
        assert_eq!(doc.notifications.len(), 3);
    }
}
