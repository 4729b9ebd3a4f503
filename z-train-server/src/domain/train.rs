//! Train records as served by the Digitraffic `trains/{date}` endpoint.
//!
//! These types map directly to the JSON the API returns. Train identity
//! (number and departure date) is required; every other field falls back
//! to its default when it is missing, null or of the wrong type, because
//! the board should survive a partially filled row rather than reject the
//! whole day.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use super::time::{Timestamp, deserialize_lenient};

/// Whether a timetable row is the train arriving at or leaving a station.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowType {
    Arrival,
    Departure,
    /// Anything else the API might send. Never matches a query.
    #[default]
    #[serde(other)]
    Unknown,
}

/// One stop event (arrival or departure) of a train at a station.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableRow {
    /// Station short code, e.g. "HKI".
    #[serde(default, deserialize_with = "or_default")]
    pub station_short_code: String,

    /// Arrival or departure.
    #[serde(rename = "type", default, deserialize_with = "or_default")]
    pub row_type: RowType,

    /// Timetabled time.
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub scheduled_time: Option<Timestamp>,

    /// Time the event actually happened, once it has.
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub actual_time: Option<Timestamp>,

    /// Live forecast for events that have not happened yet.
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub live_estimate_time: Option<Timestamp>,

    /// Whether this single stop is cancelled.
    #[serde(default, deserialize_with = "or_default")]
    pub cancelled: bool,

    /// Whether the train stops here at all (false for pass-through rows).
    #[serde(default, deserialize_with = "or_default")]
    pub train_stopping: bool,

    /// Platform track shown to passengers.
    #[serde(default, deserialize_with = "or_default")]
    pub commercial_track: Option<String>,
}

impl TimetableRow {
    /// The best known time of the event: actual, else live estimate.
    pub fn effective_actual_time(&self) -> Option<Timestamp> {
        self.actual_time.or(self.live_estimate_time)
    }

    /// Whether this row is a departure from the given station.
    pub fn is_departure_from(&self, station_short_code: &str) -> bool {
        self.row_type == RowType::Departure && self.station_short_code == station_short_code
    }
}

/// One train running on the query date.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainRecord {
    /// Commuter line letter, e.g. "Z". Absent or empty for long-distance trains.
    #[serde(rename = "commuterLineID", default, deserialize_with = "or_default")]
    pub commuter_line_id: Option<String>,

    pub train_number: u32,

    /// Date the train departs its origin.
    pub departure_date: NaiveDate,

    /// Whether the whole train is cancelled.
    #[serde(default, deserialize_with = "or_default")]
    pub cancelled: bool,

    /// Train type, e.g. "HL" for commuter trains.
    #[serde(default, deserialize_with = "or_default")]
    pub train_type: Option<String>,

    /// Operator, e.g. "vr".
    #[serde(default, deserialize_with = "or_default")]
    pub operator_short_code: Option<String>,

    #[serde(default, deserialize_with = "or_default")]
    pub running_currently: bool,

    /// The train's full stop sequence for the day, in running order.
    #[serde(default, deserialize_with = "or_default")]
    pub time_table_rows: Vec<TimetableRow>,
}

impl TrainRecord {
    /// Whether the train runs on the given commuter line.
    pub fn is_on_line(&self, line_id: &str) -> bool {
        self.commuter_line_id.as_deref() == Some(line_id)
    }

    /// Index of the first departure row at the station.
    pub fn departure_row_index(&self, station_short_code: &str) -> Option<usize> {
        self.time_table_rows
            .iter()
            .position(|r| r.is_departure_from(station_short_code))
    }

    /// Index of the first row of any type at the station.
    pub fn first_row_index(&self, station_short_code: &str) -> Option<usize> {
        self.time_table_rows
            .iter()
            .position(|r| r.station_short_code == station_short_code)
    }
}

/// Serde adapter: decode a field, falling back to its default when the value
/// is null or has the wrong shape.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const TRAIN_JSON: &str = r#"{
        "trainNumber": 9651,
        "departureDate": "2025-01-10",
        "operatorUICCode": 10,
        "operatorShortCode": "vr",
        "trainType": "HL",
        "trainCategory": "Commuter",
        "commuterLineID": "Z",
        "runningCurrently": true,
        "cancelled": false,
        "version": 289000000000,
        "timetableType": "REGULAR",
        "timeTableRows": [
            {
                "stationShortCode": "HKI",
                "stationUICCode": 1,
                "countryCode": "FI",
                "type": "DEPARTURE",
                "trainStopping": true,
                "commercialStop": true,
                "commercialTrack": "9",
                "cancelled": false,
                "scheduledTime": "2025-01-10T06:00:00.000Z",
                "actualTime": "2025-01-10T06:01:00.000Z",
                "differenceInMinutes": 1
            },
            {
                "stationShortCode": "PSL",
                "type": "ARRIVAL",
                "trainStopping": true,
                "cancelled": false,
                "scheduledTime": "2025-01-10T06:05:00.000Z",
                "liveEstimateTime": "2025-01-10T06:06:00.000Z"
            }
        ]
    }"#;

    #[test]
    fn deserialize_train() {
        let train: TrainRecord = serde_json::from_str(TRAIN_JSON).unwrap();

        assert_eq!(train.train_number, 9651);
        assert_eq!(train.commuter_line_id.as_deref(), Some("Z"));
        assert_eq!(
            train.departure_date,
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
        );
        assert_eq!(train.train_type.as_deref(), Some("HL"));
        assert!(train.running_currently);
        assert_eq!(train.time_table_rows.len(), 2);

        let first = &train.time_table_rows[0];
        assert_eq!(first.station_short_code, "HKI");
        assert_eq!(first.row_type, RowType::Departure);
        assert_eq!(first.commercial_track.as_deref(), Some("9"));
        assert!(first.train_stopping);
        assert_eq!(
            first.scheduled_time,
            Some(Utc.with_ymd_and_hms(2025, 1, 10, 6, 0, 0).unwrap())
        );

        let second = &train.time_table_rows[1];
        assert_eq!(second.row_type, RowType::Arrival);
        assert!(second.actual_time.is_none());
        assert_eq!(
            second.effective_actual_time(),
            Some(Utc.with_ymd_and_hms(2025, 1, 10, 6, 6, 0).unwrap())
        );
    }

    #[test]
    fn tolerate_sparse_rows() {
        let json = r#"{
            "trainNumber": 1,
            "departureDate": "2025-01-10",
            "timeTableRows": [
                {},
                {"stationShortCode": "KE", "type": "PASS", "scheduledTime": "garbage"}
            ]
        }"#;

        let train: TrainRecord = serde_json::from_str(json).unwrap();

        assert!(train.commuter_line_id.is_none());
        assert!(!train.cancelled);
        assert_eq!(train.time_table_rows[0], TimetableRow::default());
        assert_eq!(train.time_table_rows[1].row_type, RowType::Unknown);
        assert!(train.time_table_rows[1].scheduled_time.is_none());
    }

    #[test]
    fn tolerate_null_and_mistyped_fields() {
        let json = r#"{
            "trainNumber": 3,
            "departureDate": "2025-01-10",
            "commuterLineID": "Z",
            "cancelled": null,
            "runningCurrently": "yes",
            "trainType": 7,
            "operatorShortCode": null,
            "timeTableRows": [
                {
                    "stationShortCode": null,
                    "type": null,
                    "cancelled": null,
                    "trainStopping": null,
                    "commercialTrack": 9
                },
                {
                    "stationShortCode": "HKI",
                    "type": "DEPARTURE",
                    "cancelled": "no",
                    "trainStopping": true,
                    "scheduledTime": "2025-01-10T06:00:00.000Z"
                }
            ]
        }"#;

        let train: TrainRecord = serde_json::from_str(json).unwrap();

        assert!(!train.cancelled);
        assert!(!train.running_currently);
        assert!(train.train_type.is_none());
        assert!(train.operator_short_code.is_none());
        assert_eq!(train.time_table_rows[0], TimetableRow::default());

        let departure = &train.time_table_rows[1];
        assert!(departure.is_departure_from("HKI"));
        assert!(!departure.cancelled);
        assert!(departure.train_stopping);
    }

    #[test]
    fn null_rows_are_empty() {
        let json = r#"{"trainNumber": 4, "departureDate": "2025-01-10", "timeTableRows": null}"#;
        let train: TrainRecord = serde_json::from_str(json).unwrap();
        assert!(train.time_table_rows.is_empty());
    }

    #[test]
    fn missing_rows_are_empty() {
        let json = r#"{"trainNumber": 2, "departureDate": "2025-01-10"}"#;
        let train: TrainRecord = serde_json::from_str(json).unwrap();
        assert!(train.time_table_rows.is_empty());
    }

    #[test]
    fn train_identity_is_required() {
        let json = r#"{"departureDate": "2025-01-10"}"#;
        assert!(serde_json::from_str::<TrainRecord>(json).is_err());
    }

    #[test]
    fn line_membership() {
        let train: TrainRecord = serde_json::from_str(TRAIN_JSON).unwrap();
        assert!(train.is_on_line("Z"));
        assert!(!train.is_on_line("R"));
        assert!(!train.is_on_line("z"));
    }

    #[test]
    fn row_lookup() {
        let train: TrainRecord = serde_json::from_str(TRAIN_JSON).unwrap();

        assert_eq!(train.departure_row_index("HKI"), Some(0));
        // PSL only has an arrival row
        assert_eq!(train.departure_row_index("PSL"), None);
        assert_eq!(train.first_row_index("PSL"), Some(1));
        assert_eq!(train.first_row_index("MLÄ"), None);
    }
}
