//! Timestamp parsing for the formats Open-Meteo and its callers use.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a timestamp string. Inputs without an offset are read as UTC wall-clock time.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(ndt.and_utc());
        }
    }

    parse_date(text).and_then(|d| d.and_hms_opt(0, 0, 0)).map(|ndt| ndt.and_utc())
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}
