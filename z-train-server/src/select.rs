//! Next-departure selection.
//!
//! Given the day's trains for the line, works out which ones leave a
//! station next, optionally only those that continue on to a target
//! station afterwards.

use crate::domain::{Departure, StationCode, Timestamp, TrainRecord};

/// Select the upcoming departures from `station`.
///
/// A train contributes a departure when:
/// - it has a DEPARTURE row at `station` (the first such row is used),
/// - if `target` is given, the first row at `target` comes strictly after
///   that departure row, and
/// - the departure row's scheduled time is strictly after `now`.
///
/// Results are sorted by scheduled time, ties keeping the input order of
/// the trains, and truncated to `limit`. No qualifying trains yields an
/// empty vector.
pub fn select_next_departures(
    trains: &[TrainRecord],
    station: &StationCode,
    target: Option<&StationCode>,
    limit: usize,
    now: Timestamp,
) -> Vec<Departure> {
    let mut departures: Vec<Departure> = trains
        .iter()
        .filter_map(|train| next_departure(train, station, target, now))
        .collect();

    // Stable, so trains with equal times keep their relative order
    departures.sort_by_key(|d| d.scheduled_time);
    departures.truncate(limit);

    departures
}

/// The departure a single train contributes, if any.
fn next_departure(
    train: &TrainRecord,
    station: &StationCode,
    target: Option<&StationCode>,
    now: Timestamp,
) -> Option<Departure> {
    let depart_idx = train.departure_row_index(station.as_str())?;

    if let Some(target) = target {
        let target_idx = train.first_row_index(target.as_str())?;
        if target_idx <= depart_idx {
            // Wrong direction, or the target was visited before this station
            return None;
        }
    }

    let row = &train.time_table_rows[depart_idx];
    let scheduled = row.scheduled_time.filter(|t| *t > now)?;

    Some(Departure::from_row(station, train, row, scheduled))
}
