//! Aggregations over a usage document
//!
//! Pure functions: each takes a document snapshot (and an explicit `now`
//! where time matters) so they can be tested without touching the clock
//! or the disk. Sessions or notifications with missing or malformed
//! timestamps are left out of time-based results.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};

use crate::types::{
    display_name, AnalyticsDocument, AnalyticsSummary, Browser, GeoBreakdown, NotificationRecord,
    SessionRecord, VisitorSummary, UNKNOWN,
};
use crate::utils::time::days_before;

/// Reported when no feature has been used yet
pub const NO_FEATURE: &str = "none";

/// Window used by the dashboard's visitor counter
pub const VISITOR_WINDOW_DAYS: i64 = 7;

/// A session counts as active for this many minutes after it starts
pub const ACTIVE_WINDOW_MINUTES: i64 = 60;

/// Build the full summary
pub fn summarize(doc: &AnalyticsDocument, now: DateTime<Utc>, window_days: i64) -> AnalyticsSummary {
    AnalyticsSummary {
        total_sessions: doc.sessions.len(),
        unique_users: unique_users(doc),
        feature_usage: doc.features.clone(),
        recent_sessions: sessions_in_last_days(doc, now, window_days),
        recent_window_days: window_days,
        countries: geo_breakdown(doc).countries,
        notifications_count: doc.notifications.len(),
    }
}

/// Distinct user ids; sessions without one count as "anonymous"
pub fn unique_users(doc: &AnalyticsDocument) -> usize {
    doc.sessions
        .iter()
        .map(|s| s.user_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Sessions whose start is strictly after `now - days`
pub fn sessions_in_last_days(doc: &AnalyticsDocument, now: DateTime<Utc>, days: i64) -> usize {
    let cutoff = days_before(now, days);
    doc.sessions
        .iter()
        .filter_map(SessionRecord::started_at)
        .filter(|started| *started > cutoff)
        .count()
}

/// Sessions per UTC calendar day, oldest day first
pub fn daily_visits(doc: &AnalyticsDocument) -> BTreeMap<NaiveDate, usize> {
    let mut days = BTreeMap::new();
    for started in doc.sessions.iter().filter_map(SessionRecord::started_at) {
        *days.entry(started.date_naive()).or_insert(0) += 1;
    }
    days
}

/// Sessions per UTC hour of day; index 0 is midnight
pub fn hourly_distribution(doc: &AnalyticsDocument) -> [usize; 24] {
    let mut hours = [0; 24];
    for started in doc.sessions.iter().filter_map(SessionRecord::started_at) {
        hours[started.hour() as usize] += 1;
    }
    hours
}

/// Sessions started on the same UTC date as `now`
pub fn sessions_today(doc: &AnalyticsDocument, now: DateTime<Utc>) -> usize {
    let today = now.date_naive();
    doc.sessions
        .iter()
        .filter_map(SessionRecord::started_at)
        .filter(|started| started.date_naive() == today)
        .count()
}

/// Sessions started strictly within the last hour
pub fn active_in_last_hour(doc: &AnalyticsDocument, now: DateTime<Utc>) -> usize {
    let cutoff = now
        .checked_sub_signed(Duration::minutes(ACTIVE_WINDOW_MINUTES))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    doc.sessions
        .iter()
        .filter_map(SessionRecord::started_at)
        .filter(|started| *started > cutoff)
        .count()
}

/// Key of the most used feature, or `"none"`
pub fn most_used_feature(doc: &AnalyticsDocument) -> String {
    doc.features
        .most_used()
        .map(|(name, _)| name.to_string())
        .unwrap_or_else(|| NO_FEATURE.to_string())
}

/// Session counts by country, city and region
pub fn geo_breakdown(doc: &AnalyticsDocument) -> GeoBreakdown {
    let mut breakdown = GeoBreakdown::default();

    for session in &doc.sessions {
        let (country, city, region) = match &session.geo_info {
            Some(geo) => (geo.country.as_str(), geo.city.as_str(), geo.region.as_str()),
            None => (UNKNOWN, UNKNOWN, UNKNOWN),
        };

        *breakdown.countries.entry(country.to_string()).or_insert(0) += 1;
        *breakdown.cities.entry(city.to_string()).or_insert(0) += 1;
        *breakdown.regions.entry(region.to_string()).or_insert(0) += 1;
    }

    breakdown
}

/// Session counts by browser family
pub fn browser_breakdown(doc: &AnalyticsDocument) -> BTreeMap<Browser, usize> {
    let mut browsers = BTreeMap::new();
    for session in &doc.sessions {
        *browsers.entry(Browser::classify(&session.user_agent)).or_insert(0) += 1;
    }
    browsers
}

/// Newest notifications first
pub fn recent_notifications(doc: &AnalyticsDocument, limit: usize) -> Vec<NotificationRecord> {
    let mut notifications: Vec<&NotificationRecord> = doc.notifications.iter().collect();
    notifications.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    notifications.into_iter().take(limit).cloned().collect()
}

/// Newest sessions first; sessions with unparseable timestamps sort last
pub fn latest_sessions(doc: &AnalyticsDocument, limit: usize) -> Vec<SessionRecord> {
    let mut sessions: Vec<&SessionRecord> = doc.sessions.iter().collect();
    sessions.sort_by(|a, b| b.started_at().cmp(&a.started_at()));
    sessions.into_iter().take(limit).cloned().collect()
}

/// Landing-page counter: totals, last 7 days, top feature display name
pub fn visitor_summary(doc: &AnalyticsDocument, now: DateTime<Utc>) -> VisitorSummary {
    let top_feature = match doc.features.most_used() {
        Some((name, _)) => display_name(name).to_string(),
        None => NO_FEATURE.to_string(),
    };

    VisitorSummary {
        total_visitors: doc.sessions.len(),
        recent_visitors: sessions_in_last_days(doc, now, VISITOR_WINDOW_DAYS),
        top_feature,
    }
}
