//! Mock train source for running without the live API.
//!
//! Loads a saved `trains/{date}` response from disk and serves it as if it
//! were today's, shifting every date and time by whole days so that the
//! board shows upcoming departures whenever it is run.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::BoxFuture;
use tracing::debug;

use crate::domain::{Timestamp, TrainRecord};

use super::client::decode_line_trains;
use super::error::FetchError;
use super::source::{LineTrains, TrainSource};

/// Train source that serves a saved Digitraffic response.
#[derive(Debug, Clone)]
pub struct MockTrainSource {
    /// Line trains as recorded, in file order.
    trains: Arc<Vec<TrainRecord>>,
}

impl MockTrainSource {
    /// Load a JSON train array from `path`, keeping trains on `line_id`.
    pub fn new(path: impl AsRef<Path>, line_id: &str) -> Result<Self, FetchError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| FetchError::Mock {
            message: format!("Failed to read {:?}: {}", path, e),
        })?;

        let trains: Vec<serde_json::Value> =
            serde_json::from_str(&json).map_err(|e| FetchError::Mock {
                message: format!("Failed to parse {:?}: {}", path, e),
            })?;

        let trains = decode_line_trains(trains, line_id);

        if trains.is_empty() {
            return Err(FetchError::Mock {
                message: format!("No line {} trains in {:?}", line_id, path),
            });
        }

        Ok(Self {
            trains: Arc::new(trains),
        })
    }

    /// Number of line trains loaded.
    pub fn len(&self) -> usize {
        self.trains.len()
    }

    /// Whether no trains were loaded.
    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }

    /// The recorded trains moved onto `date`.
    pub fn trains_on(&self, date: NaiveDate) -> Vec<TrainRecord> {
        self.trains.iter().map(|t| rebase(t, date)).collect()
    }
}

impl TrainSource for MockTrainSource {
    fn line_trains(&self, date: NaiveDate) -> BoxFuture<'_, Result<LineTrains, FetchError>> {
        Box::pin(async move {
            debug!(%date, trains = self.trains.len(), "serving mock trains");
            Ok(Arc::new(self.trains_on(date)))
        })
    }
}

/// Shift a train by whole days so that it departs on `date`.
fn rebase(train: &TrainRecord, date: NaiveDate) -> TrainRecord {
    let shift = date.signed_duration_since(train.departure_date);
    let move_time = |t: Option<Timestamp>| t.map(|t| t + shift);

    let mut moved = train.clone();
    moved.departure_date = date;
    for row in &mut moved.time_table_rows {
        row.scheduled_time = move_time(row.scheduled_time);
        row.actual_time = move_time(row.actual_time);
        row.live_estimate_time = move_time(row.live_estimate_time);
    }
    moved
}
