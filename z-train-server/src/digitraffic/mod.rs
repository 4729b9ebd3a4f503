//! Digitraffic rail API client.
//!
//! This module fetches the day's train schedule from the Finnish open rail
//! data API (`rata.digitraffic.fi`) and narrows it to one commuter line.
//!
//! Key characteristics of Digitraffic:
//! - `GET /trains/{YYYY-MM-DD}` returns every train running that day, with
//!   its full list of timetable rows (one arrival and one departure per
//!   intermediate stop)
//! - Clients identify themselves with a `Digitraffic-User` header
//! - Times are UTC instants with millisecond precision

mod client;
mod error;
mod mock;
mod source;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_CLIENT_ID, DEFAULT_LINE_ID, DigitrafficClient, DigitrafficConfig,
};
pub use error::FetchError;
pub use mock::MockTrainSource;
pub use source::{LineTrains, TrainSource};
