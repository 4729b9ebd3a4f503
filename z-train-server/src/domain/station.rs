//! Station short code type.

use std::fmt;

/// Station the API answers for when the caller does not name one.
pub const DEFAULT_ORIGIN: &str = "HKI";

/// Error returned when parsing an invalid station short code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station short code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A Digitraffic station short code, e.g. `HKI` or `MLÄ`.
///
/// Short codes are opaque: they vary in length and may contain non-ASCII
/// letters, so the only validation is that the code is non-empty. Codes are
/// compared exactly as given, without case folding.
///
/// # Examples
///
/// ```
/// use z_train_server::domain::StationCode;
///
/// let mla = StationCode::parse("MLÄ").unwrap();
/// assert_eq!(mla.as_str(), "MLÄ");
///
/// // Empty strings are rejected
/// assert!(StationCode::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station short code.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        if s.is_empty() {
            return Err(InvalidStationCode {
                reason: "station short code cannot be empty",
            });
        }
        Ok(StationCode(s.to_string()))
    }

    /// The station used when a request names none.
    pub fn default_origin() -> Self {
        StationCode(DEFAULT_ORIGIN.to_string())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the code of the given timetable row's station.
    pub fn matches(&self, station_short_code: &str) -> bool {
        self.0 == station_short_code
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
