//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::StationCode;

/// Message returned when no departures qualify.
pub const NO_DEPARTURES_MESSAGE: &str = "Ei tulevia Z-junia tälle asemalle tänään.";

/// Message returned for any fetch or internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Virhe junatiedoissa";

/// Query parameters of `/api/next-z-train`.
///
/// Everything is kept as raw text so that empty and malformed values get
/// the lenient treatment described on each accessor rather than a 400.
#[derive(Debug, Default, Deserialize)]
pub struct NextTrainRequest {
    /// Departure station; defaults to HKI when absent or empty
    pub station: Option<String>,

    /// Station the train must reach afterwards; empty means none
    pub target: Option<String>,

    /// How many departures to return; defaults to 1. See [`CountParam`]
    /// for zero, negative and non-numeric values.
    pub count: Option<String>,
}

impl NextTrainRequest {
    /// The departure station.
    pub fn station(&self) -> StationCode {
        self.station
            .as_deref()
            .and_then(|s| StationCode::parse(s).ok())
            .unwrap_or_else(StationCode::default_origin)
    }

    /// The required onward station, if any.
    pub fn target(&self) -> Option<StationCode> {
        self.target
            .as_deref()
            .and_then(|s| StationCode::parse(s).ok())
    }

    /// The requested count.
    pub fn count(&self) -> CountParam {
        match self.count.as_deref() {
            None | Some("") => CountParam::Number(1),
            Some(raw) => CountParam::parse(raw),
        }
    }
}

/// The `count` parameter after lenient integer parsing.
///
/// Parsing takes leading whitespace, an optional sign and then as many
/// decimal digits as there are, ignoring whatever follows, so `"2abc"` is 2.
/// Text without any leading digits is [`CountParam::NotANumber`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountParam {
    Number(i64),
    NotANumber,
}

impl CountParam {
    /// Parse a raw `count` value.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim_start();
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        if end == 0 {
            return CountParam::NotANumber;
        }

        // Huge values saturate; they mean "all of them" either way
        let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
        CountParam::Number(if negative { -magnitude } else { magnitude })
    }

    /// Maximum number of departures to return.
    ///
    /// Zero and negative counts give 0, so the request finds nothing.
    /// Non-numeric counts do not limit the result. They are deliberately not
    /// treated as zero, which would turn `count=abc` into a 404.
    pub fn limit(self) -> usize {
        match self {
            CountParam::Number(n) if n <= 0 => 0,
            CountParam::Number(n) => usize::try_from(n).unwrap_or(usize::MAX),
            CountParam::NotANumber => usize::MAX,
        }
    }

    /// Whether the response should be a single object instead of an array.
    pub fn wants_single(self) -> bool {
        self == CountParam::Number(1)
    }
}

/// Body of the 404 returned when no departures qualify.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoDeparturesResponse {
    pub error: String,
    pub station_short_code: String,
}

impl NoDeparturesResponse {
    /// The standard body for `station`.
    pub fn for_station(station: &StationCode) -> Self {
        Self {
            error: NO_DEPARTURES_MESSAGE.to_string(),
            station_short_code: station.as_str().to_string(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        station: Option<&str>,
        target: Option<&str>,
        count: Option<&str>,
    ) -> NextTrainRequest {
        NextTrainRequest {
            station: station.map(str::to_string),
            target: target.map(str::to_string),
            count: count.map(str::to_string),
        }
    }

    #[test]
    fn station_defaults_to_helsinki() {
        assert_eq!(request(None, None, None).station().as_str(), "HKI");
        assert_eq!(request(Some(""), None, None).station().as_str(), "HKI");
        assert_eq!(request(Some("MLÄ"), None, None).station().as_str(), "MLÄ");
    }

    #[test]
    fn empty_target_is_none() {
        assert_eq!(request(None, None, None).target(), None);
        assert_eq!(request(None, Some(""), None).target(), None);
        assert_eq!(
            request(None, Some("HKI"), None).target(),
            Some(StationCode::parse("HKI").unwrap())
        );
    }

    #[test]
    fn count_defaults_to_one() {
        assert_eq!(request(None, None, None).count(), CountParam::Number(1));
        assert_eq!(request(None, None, Some("")).count(), CountParam::Number(1));
        assert!(request(None, None, None).count().wants_single());
    }

    #[test]
    fn count_parses_leniently() {
        assert_eq!(CountParam::parse("2"), CountParam::Number(2));
        assert_eq!(CountParam::parse("  3"), CountParam::Number(3));
        assert_eq!(CountParam::parse("+4"), CountParam::Number(4));
        assert_eq!(CountParam::parse("-2"), CountParam::Number(-2));
        assert_eq!(CountParam::parse("2abc"), CountParam::Number(2));
        assert_eq!(CountParam::parse("1.9"), CountParam::Number(1));
        assert_eq!(CountParam::parse("abc"), CountParam::NotANumber);
        assert_eq!(CountParam::parse("-"), CountParam::NotANumber);
        assert_eq!(CountParam::parse(" "), CountParam::NotANumber);
    }

    #[test]
    fn huge_count_saturates() {
        assert_eq!(
            CountParam::parse("99999999999999999999999"),
            CountParam::Number(i64::MAX)
        );
    }

    #[test]
    fn count_limits() {
        assert_eq!(CountParam::Number(2).limit(), 2);
        assert_eq!(CountParam::Number(0).limit(), 0);
        assert_eq!(CountParam::Number(-3).limit(), 0);
        assert_eq!(CountParam::NotANumber.limit(), usize::MAX);
    }

    #[test]
    fn only_exactly_one_is_single() {
        assert!(CountParam::Number(1).wants_single());
        assert!(CountParam::parse("1x").wants_single());
        assert!(!CountParam::Number(2).wants_single());
        assert!(!CountParam::Number(0).wants_single());
        assert!(!CountParam::NotANumber.wants_single());
    }

    #[test]
    fn no_departures_body_shape() {
        let body = NoDeparturesResponse::for_station(&StationCode::parse("MLÄ").unwrap());
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": NO_DEPARTURES_MESSAGE,
                "stationShortCode": "MLÄ"
            })
        );
    }
}
