//! UTC offset formatting and extraction.

use crate::model::Timestamp;

const SECONDS_PER_MINUTE: i64 = 60;
const MINUTES_PER_HOUR: i64 = 60;

/// Formats an offset in seconds east of UTC as `+HH:MM` or `-HH:MM`.
///
/// RFC 3339 offsets have minute granularity. A sub-minute remainder is
/// rounded to the nearest minute, ties to even, before the value is split
/// into hours and minutes, so 3599 seconds is `+01:00`.
///
/// Zero formats as `+00:00`; the generator writes `Z` for UTC itself.
pub fn format_offset(offset_seconds: i32) -> String {
    let sign = if offset_seconds >= 0 { '+' } else { '-' };
    let total_minutes = round_to_minutes(i64::from(offset_seconds).abs());
    let hours = total_minutes / MINUTES_PER_HOUR;
    let minutes = total_minutes % MINUTES_PER_HOUR;

    format!("{}{:02}:{:02}", sign, hours, minutes)
}

fn round_to_minutes(abs_seconds: i64) -> i64 {
    let minutes = abs_seconds / SECONDS_PER_MINUTE;
    let remainder = abs_seconds % SECONDS_PER_MINUTE;
    let half = SECONDS_PER_MINUTE / 2;
    if remainder > half || (remainder == half && minutes % 2 == 1) {
        minutes + 1
    } else {
        minutes
    }
}

/// Returns the offset of an aware value in seconds east of UTC.
///
/// # Panics
///
/// Panics if `value` is naive. A naive value has no offset, and asking for
/// one is a caller bug.
pub fn utc_offset_seconds(value: &Timestamp) -> i32 {
    match value.offset_seconds() {
        Some(seconds) => seconds,
        None => panic!("utc_offset_seconds called on a naive timestamp"),
    }
}
