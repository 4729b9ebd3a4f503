//! Domain types for the Z-line departure board.
//!
//! Train records as fetched from Digitraffic, station codes, timestamp
//! handling, and the derived [`Departure`] the API returns.

mod delay;
mod departure;
mod station;
mod time;
mod train;

pub use delay::delay_minutes;
pub use departure::Departure;
pub use station::{DEFAULT_ORIGIN, InvalidStationCode, StationCode};
pub use time::{Timestamp, date_path_segment, format_timestamp, parse_timestamp, today_local};
pub use train::{RowType, TimetableRow, TrainRecord};
