//! Delay calculation for a single timetable row.

use super::train::TimetableRow;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Delay of a timetable row in whole minutes; negative means early.
///
/// Compares the scheduled time with the actual time, falling back to the
/// live estimate. A row missing either side counts as on time (0), so
/// "no data" and "punctual" are indistinguishable to callers.
///
/// Half minutes round towards positive infinity: +7.5 min is 8, -7.5 min
/// is -7.
pub fn delay_minutes(row: &TimetableRow) -> i64 {
    let (Some(scheduled), Some(actual)) = (row.scheduled_time, row.effective_actual_time()) else {
        return 0;
    };

    let millis = actual.signed_duration_since(scheduled).num_milliseconds();
    round_to_minutes(millis)
}

fn round_to_minutes(millis: i64) -> i64 {
    millis
        .saturating_add(MILLIS_PER_MINUTE / 2)
        .div_euclid(MILLIS_PER_MINUTE)
}
