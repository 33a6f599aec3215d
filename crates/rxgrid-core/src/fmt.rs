//! Launch-date display formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format an ISO-8601 launch date as `DD.MM.YYYY`.
///
/// Accepts RFC 3339 (with `Z` or a numeric offset, with or without
/// fractional seconds), a naive datetime without an offset marker, or a
/// bare date. Day, month, and year are rendered as written in the
/// input. Malformed input is returned unchanged -- a graceful-degradation
/// contract, not an error path.
pub fn format_launch_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d.%m.%Y").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%d.%m.%Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d.%m.%Y").to_string();
    }
    raw.to_owned()
}
