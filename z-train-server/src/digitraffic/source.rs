//! Abstraction over where the day's line trains come from.

use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::BoxFuture;

use crate::domain::{TrainRecord, today_local};

use super::client::DigitrafficClient;
use super::error::FetchError;

/// Shared, immutable list of trains for one date.
pub type LineTrains = Arc<Vec<TrainRecord>>;

/// A provider of the trains running on the board's line on a given date.
///
/// Implemented by the live client, the caching wrapper and the file-backed
/// mock, so the web layer does not care which one it talks to.
pub trait TrainSource: Send + Sync {
    /// Trains on the line running on `date`.
    fn line_trains(&self, date: NaiveDate) -> BoxFuture<'_, Result<LineTrains, FetchError>>;

    /// Trains on the line running today, by the local calendar.
    fn line_trains_today(&self) -> BoxFuture<'_, Result<LineTrains, FetchError>> {
        self.line_trains(today_local())
    }
}

impl TrainSource for DigitrafficClient {
    fn line_trains(&self, date: NaiveDate) -> BoxFuture<'_, Result<LineTrains, FetchError>> {
        Box::pin(async move { self.fetch_line_trains_on(date).await.map(Arc::new) })
    }
}
