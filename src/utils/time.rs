//! Time and timestamp utilities
//!
//! Records store their timestamps as text so that one bad value never
//! invalidates a whole document. Parsing happens only when aggregating.

use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, Utc};

/// Current time as an RFC 3339 string (UTC, microsecond precision)
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Format an instant the way records store it
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 and the offset-less ISO form older dashboards wrote
/// (`2024-05-01T10:00:00.123456`), which is read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Instant `days` days before `now`, clamped to the representable range.
///
/// A window too wide for chrono reaches back to the earliest instant (or
/// forward to the latest one for negative `days`).
pub fn days_before(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(if days < 0 {
            DateTime::<Utc>::MAX_UTC
        } else {
            DateTime::<Utc>::MIN_UTC
        })
}

/// Human-readable form used by the report (`2024-05-01 10:00:00`)
pub fn format_display(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_round_trip_rfc3339() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let text = format_timestamp(instant);
        assert_eq!(text, "2024-05-01T10:00:00.000000Z");
        assert_eq!(parse_timestamp(&text), Some(instant));
    }

    #[test]
    fn test_parse_naive_iso() {
        let parsed = parse_timestamp("2024-05-01T10:00:00.123456").unwrap();
        assert_eq!(parsed.format("%H:%M:%S").to_string(), "10:00:00");

        assert!(parse_timestamp("2024-05-01 10:00:00").is_some());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-45T99:00:00").is_none());
    }

    #[test]
    fn test_days_before() {
        let now = Utc.with_ymd_and_hms(2024, 5, 8, 12, 0, 0).unwrap();
        assert_eq!(days_before(now, 7), Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        assert_eq!(days_before(now, 0), now);
    }

    #[test]
    fn test_days_before_clamps_huge_windows() {
        let now = Utc.with_ymd_and_hms(2024, 5, 8, 12, 0, 0).unwrap();
        assert_eq!(days_before(now, i64::MAX / 86_400_000), DateTime::<Utc>::MIN_UTC);
        assert_eq!(days_before(now, i64::MAX), DateTime::<Utc>::MIN_UTC);
        assert_eq!(days_before(now, i64::MIN), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format_display("2024-05-01T10:00:00Z"), "2024-05-01 10:00:00");
        assert_eq!(format_display("garbled"), "garbled");
    }
}
