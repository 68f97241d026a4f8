//! RFC 3339 generator.
//!
//! Output always has a 4-digit year, `T` and `Z` in upper case, either no
//! fraction or exactly six fraction digits, and a non-UTC offset written as
//! `+HH:MM` / `-HH:MM`. A zero offset is always written as `Z`.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc};

use crate::error::GenerateError;
use crate::model::{GenerateOptions, Timestamp};
use crate::util::offset::format_offset;

const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

/// Generates a UTC timestamp with default options.
///
/// Naive values are rejected and any fraction is dropped.
pub fn generate<T: Into<Timestamp>>(value: T) -> Result<String, GenerateError> {
    generate_with_options(value, GenerateOptions::default())
}

/// Generates an RFC 3339 timestamp.
///
/// Never fails for an aware value whose year (after any UTC conversion)
/// lies in 0..=9999. Naive values fail unless `accept_naive` and `utc` are
/// both set.
pub fn generate_with_options<T: Into<Timestamp>>(
    value: T,
    options: GenerateOptions,
) -> Result<String, GenerateError> {
    let mut dt = resolve_awareness(value.into(), options)?;
    if options.utc {
        dt = dt.with_timezone(&Utc.fix());
    }

    let local = dt.naive_local();
    let year = local.year();
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(GenerateError::YearOutOfRange { year });
    }

    let mut out = format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        year,
        local.month(),
        local.day(),
        local.hour(),
        local.minute(),
        local.second()
    );

    if options.microseconds {
        out.push_str(&format!(".{:06}", Timestamp::Aware(dt).microsecond()));
    }

    let offset_seconds = dt.offset().local_minus_utc();
    if offset_seconds == 0 {
        out.push('Z');
    } else {
        out.push_str(&format_offset(offset_seconds));
    }

    Ok(out)
}

fn resolve_awareness(
    value: Timestamp,
    options: GenerateOptions,
) -> Result<DateTime<FixedOffset>, GenerateError> {
    match value {
        Timestamp::Aware(dt) => Ok(dt),
        Timestamp::Naive(_) if !options.accept_naive => Err(GenerateError::NaiveNotAccepted),
        Timestamp::Naive(_) if !options.utc => Err(GenerateError::NaiveLocal),
        Timestamp::Naive(naive) => {
            debug!("treating naive {} as UTC", naive);
            Ok(naive.and_utc().fixed_offset())
        }
    }
}
