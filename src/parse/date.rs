use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Naive layouts accepted after RFC 3339 fails. Times without an offset are UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a schedule date string into a UTC instant with millisecond precision.
///
/// Accepts RFC 3339, an RFC 3339 offset followed by a stray `Z`
/// (`2024-05-01T10:00:00+02:00Z`), naive date-times (taken as UTC) and bare
/// `YYYY-MM-DD` dates (midnight UTC). Returns `None` for anything else.
pub fn parse_flexible_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    parse_rfc3339(value)
        .or_else(|| {
            let stripped = value.strip_suffix('Z')?;
            has_numeric_offset(stripped)
                .then(|| parse_rfc3339(stripped))
                .flatten()
        })
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|naive| naive.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
        .and_then(truncate_to_millis)
}

fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Whether `value` ends in `+HH:MM` or `-HH:MM`.
fn has_numeric_offset(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() < 6 {
        return false;
    }
    let tail = &bytes[bytes.len() - 6..];
    matches!(tail[0], b'+' | b'-')
        && tail[1].is_ascii_digit()
        && tail[2].is_ascii_digit()
        && tail[3] == b':'
        && tail[4].is_ascii_digit()
        && tail[5].is_ascii_digit()
}

fn truncate_to_millis(dt: DateTime<Utc>) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(dt.timestamp_millis())
}
