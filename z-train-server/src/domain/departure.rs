//! The computed next-departure record returned by the API.

use chrono::NaiveDate;
use serde::Serialize;

use super::delay::delay_minutes;
use super::station::StationCode;
use super::time::{Timestamp, serialize_optional_timestamp, serialize_timestamp};
use super::train::{TimetableRow, TrainRecord};

/// One upcoming departure of a train from a station.
///
/// Serialized with the exact camelCase field names the dashboard reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Departure {
    pub station_short_code: String,
    pub train_number: u32,
    pub departure_date: NaiveDate,
    #[serde(serialize_with = "serialize_timestamp")]
    pub scheduled_time: Timestamp,
    /// Actual time if known, else the live estimate, else null.
    #[serde(serialize_with = "serialize_optional_timestamp")]
    pub actual_time: Option<Timestamp>,
    pub delay_minutes: i64,
    /// Cancelled as a whole train or at this stop.
    pub cancelled: bool,
}

impl Departure {
    /// Build a departure from a train's departure row at `station`.
    ///
    /// `scheduled_time` is passed separately because the row's own value is
    /// optional and callers have already checked it.
    pub fn from_row(
        station: &StationCode,
        train: &TrainRecord,
        row: &TimetableRow,
        scheduled_time: Timestamp,
    ) -> Self {
        Self {
            station_short_code: station.as_str().to_string(),
            train_number: train.train_number,
            departure_date: train.departure_date,
            scheduled_time,
            actual_time: row.effective_actual_time(),
            delay_minutes: delay_minutes(row),
            cancelled: train.cancelled || row.cancelled,
        }
    }
}
