//! Timestamp handling for Digitraffic data.
//!
//! Digitraffic reports every time as an RFC 3339 UTC instant with
//! millisecond precision, e.g. `2025-01-10T06:00:00.000Z`. Per-row times
//! are decoded leniently: a missing, null or unparseable value becomes
//! `None` instead of failing the whole response, so one broken row cannot
//! take the board down.

use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// An instant on the timetable.
pub type Timestamp = DateTime<Utc>;

/// Parse an RFC 3339 timestamp, normalising it to UTC.
///
/// # Examples
///
/// ```
/// use z_train_server::domain::parse_timestamp;
///
/// let ts = parse_timestamp("2025-01-10T06:00:00.000Z").unwrap();
/// assert_eq!(ts.to_rfc3339(), "2025-01-10T06:00:00+00:00");
///
/// assert!(parse_timestamp("06:00").is_none());
/// ```
pub fn parse_timestamp(s: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format a timestamp the way Digitraffic does (`...T06:00:00.000Z`).
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Today's date on the local calendar.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a date as the `YYYY-MM-DD` path segment the trains endpoint expects.
pub fn date_path_segment(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Serde adapter: decode an optional timestamp, mapping anything unusable to `None`.
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(parse_timestamp))
}

/// Serde adapter: encode a timestamp in Digitraffic's format.
pub(crate) fn serialize_timestamp<S>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(ts))
}

/// Serde adapter: encode an optional timestamp, `None` as `null`.
pub(crate) fn serialize_optional_timestamp<S>(
    ts: &Option<Timestamp>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match ts {
        Some(ts) => serializer.serialize_str(&format_timestamp(ts)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize_lenient")]
        at: Option<Timestamp>,
    }

    fn decode(json: &str) -> Option<Timestamp> {
        serde_json::from_str::<Row>(json).unwrap().at
    }

    #[test]
    fn parses_digitraffic_format() {
        let ts = parse_timestamp("2025-01-10T06:12:30.000Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 1, 10, 6, 12, 30).unwrap());
    }

    #[test]
    fn normalises_offsets_to_utc() {
        let ts = parse_timestamp("2025-01-10T08:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 1, 10, 6, 0, 0).unwrap());
    }

    #[test]
    fn formats_with_milliseconds() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 10, 6, 0, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2025-01-10T06:00:00.000Z");
    }

    #[test]
    fn format_roundtrips_upstream_strings() {
        let raw = "2025-01-10T17:42:05.000Z";
        assert_eq!(format_timestamp(&parse_timestamp(raw).unwrap()), raw);
    }

    #[test]
    fn date_segment() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(date_path_segment(date), "2025-03-07");
    }

    #[test]
    fn lenient_decoding() {
        assert!(decode(r#"{"at": "2025-01-10T06:00:00.000Z"}"#).is_some());
        assert!(decode(r#"{}"#).is_none());
        assert!(decode(r#"{"at": null}"#).is_none());
        assert!(decode(r#"{"at": "soon"}"#).is_none());
        assert!(decode(r#"{"at": 1736488800000}"#).is_none());
    }
}
