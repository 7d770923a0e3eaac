//! Timestamp handling for host-supplied times.
//!
//! The host encodes "never happened" as the zero time `0001-01-01T00:00:00Z`
//! and sometimes sends empty strings, `null`, or numbers instead of RFC 3339.
//! Raw values are kept as strings on the models and parsed on demand.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer};

/// Zero-value sentinel meaning "never".
pub const ZERO_TIME: &str = "0001-01-01T00:00:00Z";

/// Parse a raw timestamp. Empty, malformed, and zero-sentinel inputs all yield `None`.
pub fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = DateTime::parse_from_rfc3339(raw).ok()?.with_timezone(&Utc);
    if parsed.year() <= 1 {
        None
    } else {
        Some(parsed)
    }
}

/// Short relative form of `then` as seen from `now`, e.g. `"42s ago"`.
pub fn format_since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    match secs {
        s if s < 1 => "just now".to_string(),
        s if s < 60 => format!("{s}s ago"),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s => format!("{}d ago", s / 86_400),
    }
}

/// Accept a string, number, or `null` and keep it as a raw string.
pub(crate) fn deserialize_raw_time<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn zero_sentinel_is_not_a_time() {
        assert_eq!(parse_time(ZERO_TIME), None);
        assert_eq!(parse_time("0001-01-01T00:00:00.000Z"), None);
    }

    #[test]
    fn empty_and_malformed_are_not_times() {
        assert_eq!(parse_time(""), None);
        assert_eq!(parse_time("   "), None);
        assert_eq!(parse_time("1,555,970,585,039"), None);
        assert_eq!(parse_time("yesterday"), None);
    }

    #[test]
    fn rfc3339_parses_to_utc() {
        let parsed = parse_time("2019-04-22T18:03:05.039-04:00").unwrap();
        assert_eq!(parsed.timestamp_millis(), 1_555_970_585_039);
    }

    #[test]
    fn format_since_buckets() {
        let now = Utc.timestamp_opt(1_000_000, 0).unwrap();
        let ago = |secs: i64| format_since(now - chrono::Duration::seconds(secs), now);
        assert_eq!(ago(0), "just now");
        assert_eq!(ago(-30), "just now");
        assert_eq!(ago(42), "42s ago");
        assert_eq!(ago(125), "2m ago");
        assert_eq!(ago(7_200), "2h ago");
        assert_eq!(ago(3 * 86_400), "3d ago");
    }
}
