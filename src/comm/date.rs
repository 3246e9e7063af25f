//! ISO 日期解析
//! Entity dates are kept as the strings the client sent; these helpers give them an order.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use std::cmp::Ordering;

/// Parses `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or an RFC 3339 timestamp.
/// Date-only values are local dates; timestamps with an offset are converted to local time.
pub fn parse_local_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Some(stamp.with_timezone(&Local).naive_local());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

pub fn parse_local_date(value: &str) -> Option<NaiveDate> {
    parse_local_datetime(value).map(|stamp| stamp.date())
}

/// Ascending order; values that do not parse sort after all that do.
pub fn compare_iso(a: &str, b: &str) -> Ordering {
    match (parse_local_datetime(a), parse_local_datetime(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive substring match; an empty needle matches everything.
pub fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}
