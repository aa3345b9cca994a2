//! Date/time normalization for same-day matching and estimator hints.

use chrono::{Local, NaiveDate, NaiveTime};

/// Normalize a stored date cell to `YYYY-MM-DD`.
///
/// Earlier revisions serialized the date column inconsistently, so this
/// accepts:
/// - YYYY-MM-DD (returned as-is)
/// - RFC3339 datetime (date part extracted)
/// - Naive datetime YYYY-MM-DDTHH:MM:SS (date part extracted)
/// - Naive datetime with a space separator (date part extracted)
///
/// Every same-day comparison must go through this function; raw string
/// equality across representations silently drops rows.
pub fn normalize_date_str(s: &str) -> Option<String> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        // Re-serialize rather than echo the input: the parser accepts
        // non-zero-padded components like 2025-3-1.
        return Some(d.format("%Y-%m-%d").to_string());
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive().format("%Y-%m-%d").to_string());
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(ndt.date().format("%Y-%m-%d").to_string());
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(ndt.date().format("%Y-%m-%d").to_string());
    }
    None
}

/// Normalize a time string to `HH:MM`. Accepts `HH:MM` and `HH:MM:SS`
/// (seconds truncated).
pub fn normalize_time_str(s: &str) -> Option<String> {
    let s = s.trim();
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M") {
        return Some(t.format("%H:%M").to_string());
    }
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M:%S") {
        return Some(t.format("%H:%M").to_string());
    }
    None
}

/// Resolve estimator date/time hints into concrete values.
///
/// Absent or unparseable hints fall back to the current local date/time;
/// a bad hint is never an error.
pub fn resolve_entry_instant(
    date_hint: Option<&str>,
    time_hint: Option<&str>,
) -> (NaiveDate, String) {
    let now = Local::now().naive_local();
    let date = date_hint
        .and_then(normalize_date_str)
        .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
        .unwrap_or_else(|| now.date());
    let time = time_hint
        .and_then(normalize_time_str)
        .unwrap_or_else(|| now.time().format("%H:%M").to_string());
    (date, time)
}
