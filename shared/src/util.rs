use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// 当前 UTC 时间 (RFC 3339, 毫秒精度)
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored ISO date without timezone conversion.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps; the calendar date is taken
/// in the timestamp's own offset.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}
