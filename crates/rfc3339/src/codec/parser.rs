//! RFC 3339 parser.
//!
//! Matches the `date-time` production of RFC 3339 section 5.6, anchored at
//! both ends:
//!
//! ```text
//! date-time    = full-date "T" full-time
//! full-date    = 4DIGIT "-" 2DIGIT "-" 2DIGIT
//! full-time    = partial-time time-offset
//! partial-time = 2DIGIT ":" 2DIGIT ":" 2DIGIT [ "." 1*DIGIT ]
//! time-offset  = "Z" / ( ( "+" / "-" ) 2DIGIT ":" 2DIGIT )
//! ```
//!
//! `T` and `Z` match in either case. The whole input is matched before any
//! field is range-checked, so a structural problem is always reported as a
//! format error.

use std::cmp::Ordering;

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};

use crate::codec::cursor::Cursor;
use crate::error::{Field, ParseError};
use crate::model::{ParseOptions, Timestamp};

const MICROS_DIGITS: usize = 6;
const MAX_MICROS: u32 = 999_999;

struct DateFields {
    year: u32,
    month: u32,
    day: u32,
}

struct TimeFields<'a> {
    hour: u32,
    minute: u32,
    second: u32,
    fraction: Option<&'a str>,
}

/// The `time-offset` as written.
enum Designator<'a> {
    /// `Z`, `+00:00` or `-00:00`.
    Utc,
    Numeric {
        negative: bool,
        hours: u32,
        minutes: u32,
        text: &'a str,
    },
}

// =============================================================================
// GRAMMAR
// =============================================================================

fn read_full_date(cursor: &mut Cursor<'_>) -> Result<DateFields, ParseError> {
    let year = cursor.read_digits(4, "4-digit year")?;
    cursor.expect(b'-', "'-' after year")?;
    let month = cursor.read_digits(2, "2-digit month")?;
    cursor.expect(b'-', "'-' after month")?;
    let day = cursor.read_digits(2, "2-digit day")?;
    Ok(DateFields { year, month, day })
}

fn read_partial_time<'a>(cursor: &mut Cursor<'a>) -> Result<TimeFields<'a>, ParseError> {
    let hour = cursor.read_digits(2, "2-digit hour")?;
    cursor.expect(b':', "':' after hour")?;
    let minute = cursor.read_digits(2, "2-digit minute")?;
    cursor.expect(b':', "':' after minute")?;
    let second = cursor.read_digits(2, "2-digit second")?;

    let fraction = if cursor.peek() == Some(b'.') {
        cursor.expect(b'.', "'.'")?;
        Some(cursor.read_digit_run("fractional second digits")?)
    } else {
        None
    };

    Ok(TimeFields {
        hour,
        minute,
        second,
        fraction,
    })
}

fn read_time_offset<'a>(cursor: &mut Cursor<'a>) -> Result<Designator<'a>, ParseError> {
    let start = cursor.position();
    let negative = match cursor.peek() {
        Some(b'Z' | b'z') => {
            cursor.expect(b'Z', "'Z'")?;
            return Ok(Designator::Utc);
        }
        Some(b'+') => false,
        Some(b'-') => true,
        _ => return Err(cursor.error("time offset ('Z' or '+HH:MM')")),
    };
    cursor.expect(if negative { b'-' } else { b'+' }, "offset sign")?;
    let hours = cursor.read_digits(2, "2-digit offset hour")?;
    cursor.expect(b':', "':' in offset")?;
    let minutes = cursor.read_digits(2, "2-digit offset minute")?;

    if hours == 0 && minutes == 0 {
        return Ok(Designator::Utc);
    }
    Ok(Designator::Numeric {
        negative,
        hours,
        minutes,
        text: cursor.consumed_since(start),
    })
}

// =============================================================================
// RANGE CHECKS
// =============================================================================

fn check_range(field: Field, value: u32, min: u32, max: u32) -> Result<(), ParseError> {
    if value < min || value > max {
        trace!("{} {} outside {}..{}", field, value, min, max);
        return Err(ParseError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn year_out_of_range(year: u32) -> ParseError {
    ParseError::OutOfRange {
        field: Field::Year,
        value: year,
        min: 0,
        max: 9999,
    }
}

/// Returns the length of a month, taken from the calendar as the day
/// before the first of the following month.
fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()
        .map(|last| last.day())
}

fn validate_date(fields: &DateFields) -> Result<NaiveDate, ParseError> {
    let DateFields { year, month, day } = *fields;
    check_range(Field::Year, year, 0, 9999)?;
    check_range(Field::Month, month, 1, 12)?;
    let max_day = days_in_month(year as i32, month).ok_or_else(|| year_out_of_range(year))?;
    check_range(Field::Day, day, 1, max_day)?;

    NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(|| year_out_of_range(year))
}

fn validate_time(fields: &TimeFields<'_>) -> Result<NaiveTime, ParseError> {
    check_range(Field::Hour, fields.hour, 0, 23)?;
    check_range(Field::Minute, fields.minute, 0, 59)?;
    check_range(Field::Second, fields.second, 0, 59)?;

    let micros = match fields.fraction {
        Some(digits) => fraction_to_micros(digits),
        None => 0,
    };
    check_range(Field::Microsecond, micros, 0, MAX_MICROS)?;

    NaiveTime::from_hms_micro_opt(fields.hour, fields.minute, fields.second, micros).ok_or(
        ParseError::OutOfRange {
            field: Field::Microsecond,
            value: micros,
            min: 0,
            max: MAX_MICROS,
        },
    )
}

/// Converts fractional-second digits to microseconds.
///
/// Digits past the sixth are rounded half-to-even on their exact decimal
/// value. A fraction that rounds up to a whole second yields 1_000_000,
/// which the caller rejects.
fn fraction_to_micros(digits: &str) -> u32 {
    let bytes = digits.as_bytes();
    let mut micros = 0u32;
    for i in 0..MICROS_DIGITS {
        let digit = bytes.get(i).map_or(0, |b| u32::from(b - b'0'));
        micros = micros * 10 + digit;
    }

    let rest = bytes.get(MICROS_DIGITS..).unwrap_or(&[]);
    let round_up = match rest.split_first() {
        None => false,
        Some((first, tail)) => match first.cmp(&b'5') {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => tail.iter().any(|b| *b != b'0') || micros % 2 == 1,
        },
    };
    if round_up {
        micros += 1;
    }
    micros
}

impl Designator<'_> {
    fn to_fixed_offset(&self) -> Result<FixedOffset, ParseError> {
        match *self {
            Designator::Utc => Ok(Utc.fix()),
            Designator::Numeric {
                negative,
                hours,
                minutes,
                ..
            } => {
                check_range(Field::OffsetHour, hours, 0, 23)?;
                check_range(Field::OffsetMinute, minutes, 0, 59)?;
                let seconds = (hours * 3600 + minutes * 60) as i32;
                let seconds = if negative { -seconds } else { seconds };
                FixedOffset::east_opt(seconds).ok_or(ParseError::OutOfRange {
                    field: Field::OffsetHour,
                    value: hours,
                    min: 0,
                    max: 23,
                })
            }
        }
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Parses an RFC 3339 `date-time` with default options.
///
/// The result keeps the offset it was written with; `Z`, `+00:00` and
/// `-00:00` all produce a zero offset.
pub fn parse(text: &str) -> Result<Timestamp, ParseError> {
    parse_with_options(text, ParseOptions::default())
}

/// Parses an RFC 3339 `date-time`.
///
/// Fails with a format error when `text` does not match the grammar, a
/// range error when a field is out of range, and a conversion error when
/// `produce_naive` is set but the timestamp carries a non-zero offset.
pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<Timestamp, ParseError> {
    let mut cursor = Cursor::new(text);
    let date = read_full_date(&mut cursor)?;
    cursor.expect(b'T', "'T' between date and time")?;
    let time = read_partial_time(&mut cursor)?;
    let designator = read_time_offset(&mut cursor)?;
    cursor.finish()?;

    let offset = match (&designator, options.produce_naive) {
        (Designator::Utc, true) => None,
        (Designator::Numeric { text, .. }, true) => {
            return Err(ParseError::NaiveFromLocal {
                offset: text.to_string(),
            });
        }
        (designator, false) => Some(designator.to_fixed_offset()?),
    };

    let date = validate_date(&date)?;
    let time = validate_time(&time)?;
    let naive = NaiveDateTime::new(date, time);

    let value = match offset {
        None => Timestamp::Naive(naive),
        Some(offset) => Timestamp::Aware(to_aware(naive, offset)?),
    };

    if options.utc && value.is_aware() {
        debug!("normalizing {:?} to UTC", text);
        return Ok(value.to_utc());
    }
    Ok(value)
}

fn to_aware(
    naive: NaiveDateTime,
    offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, ParseError> {
    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| year_out_of_range(naive.year() as u32))
}

/// Parses an RFC 3339 `full-date` (`YYYY-MM-DD`).
pub fn parse_date(text: &str) -> Result<NaiveDate, ParseError> {
    let mut cursor = Cursor::new(text);
    let date = read_full_date(&mut cursor)?;
    cursor.finish()?;
    validate_date(&date)
}

/// Parses an RFC 3339 `full-time` (`HH:MM:SS[.frac]` plus offset).
pub fn parse_time(text: &str) -> Result<(NaiveTime, FixedOffset), ParseError> {
    let mut cursor = Cursor::new(text);
    let time = read_partial_time(&mut cursor)?;
    let designator = read_time_offset(&mut cursor)?;
    cursor.finish()?;

    let offset = designator.to_fixed_offset()?;
    let time = validate_time(&time)?;
    Ok((time, offset))
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;
    use crate::error::ErrorKind;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, us: u32) -> Timestamp {
        let naive = NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_micro_opt(h, mi, s, us)
            .unwrap();
        Timestamp::Aware(Utc.fix().from_local_datetime(&naive).unwrap())
    }

    #[test]
    fn test_parse_utc() {
        let ts = parse("2009-01-01T10:01:02Z").unwrap();
        assert_eq!(ts, utc(2009, 1, 1, 10, 1, 2, 0));
        assert!(ts.is_utc());
    }

    #[test]
    fn test_parse_local_offset() {
        let ts = parse("2009-01-01T14:01:02-04:00").unwrap();
        assert_eq!(ts.offset_seconds(), Some(-4 * 3600));
        assert_eq!(ts.local().hour(), 14);
        assert_eq!(ts, utc(2009, 1, 1, 18, 1, 2, 0));
    }

    #[test]
    fn test_sign_applies_to_whole_offset() {
        let ts = parse("2009-01-01T14:01:02-04:30").unwrap();
        assert_eq!(ts.offset_seconds(), Some(-(4 * 3600 + 30 * 60)));

        let ts = parse("2009-01-01T14:01:02+05:45").unwrap();
        assert_eq!(ts.offset_seconds(), Some(5 * 3600 + 45 * 60));

        // A zero hour must not drop the sign from the minutes.
        let ts = parse("2009-01-01T14:01:02-00:30").unwrap();
        assert_eq!(ts.offset_seconds(), Some(-30 * 60));
        assert_eq!(ts.to_utc(), utc(2009, 1, 1, 14, 31, 2, 0));
    }

    #[test]
    fn test_zero_offsets_are_utc() {
        let z = parse("2009-01-01T10:02:03Z").unwrap();
        let plus = parse("2009-01-01T10:02:03+00:00").unwrap();
        let minus = parse("2009-01-01T10:02:03-00:00").unwrap();
        assert_eq!(z, plus);
        assert_eq!(z, minus);
        assert!(plus.is_utc());
        assert!(minus.is_utc());
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            parse("2009-01-01t10:01:02z").unwrap(),
            parse("2009-01-01T10:01:02Z").unwrap()
        );
    }

    #[test]
    fn test_parse_normalize_utc() {
        let ts = parse_with_options("2009-01-01T06:01:02-04:00", ParseOptions::utc()).unwrap();
        assert!(ts.is_utc());
        assert_eq!(ts.local().hour(), 10);
    }

    #[test]
    fn test_produce_naive() {
        let options = ParseOptions {
            utc: false,
            produce_naive: true,
        };
        let ts = parse_with_options("2009-01-01T10:01:02Z", options).unwrap();
        assert!(ts.is_naive());
        assert_eq!(ts.local().hour(), 10);

        let ts = parse_with_options("2009-01-01T10:01:02-00:00", options).unwrap();
        assert!(ts.is_naive());

        // Combined with utc, the naive value stays as written.
        let options = ParseOptions {
            utc: true,
            produce_naive: true,
        };
        let ts = parse_with_options("2009-01-01T10:01:02Z", options).unwrap();
        assert!(ts.is_naive());
        assert_eq!(ts.local().hour(), 10);
    }

    #[test]
    fn test_produce_naive_rejects_local() {
        let options = ParseOptions {
            utc: false,
            produce_naive: true,
        };
        let err = parse_with_options("2009-01-01T14:01:02-04:00", options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
        assert_eq!(
            err,
            ParseError::NaiveFromLocal {
                offset: "-04:00".to_string()
            }
        );
    }

    #[test]
    fn test_fraction() {
        assert_eq!(parse("2009-01-01T10:02:03.25Z").unwrap().microsecond(), 250_000);
        assert_eq!(parse("2009-01-01T10:02:03.000001Z").unwrap().microsecond(), 1);
        assert_eq!(parse("2009-01-01T10:02:03.123456Z").unwrap().microsecond(), 123_456);
        assert_eq!(parse("2009-01-01T10:02:03Z").unwrap().microsecond(), 0);
    }

    #[test]
    fn test_fraction_rounding() {
        assert_eq!(fraction_to_micros("1234564"), 123_456);
        assert_eq!(fraction_to_micros("1234566"), 123_457);
        // Exact ties go to even.
        assert_eq!(fraction_to_micros("1234565"), 123_456);
        assert_eq!(fraction_to_micros("1234575"), 123_458);
        assert_eq!(fraction_to_micros("12345650001"), 123_457);
        assert_eq!(fraction_to_micros("9999995"), 1_000_000);
        assert_eq!(fraction_to_micros("9999994"), 999_999);
    }

    #[test]
    fn test_fraction_rounding_to_whole_second_rejected() {
        for text in [
            "2009-12-31T23:59:59.9999999Z",
            "9999-12-31T23:59:59.9999999Z",
            "2009-06-15T10:20:30.99999951+02:00",
        ] {
            let err = parse(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Range);
            assert_eq!(
                err,
                ParseError::OutOfRange {
                    field: Field::Microsecond,
                    value: 1_000_000,
                    min: 0,
                    max: 999_999,
                }
            );
        }

        let ts = parse("2009-12-31T23:59:59.9999994Z").unwrap();
        assert_eq!(ts, utc(2009, 12, 31, 23, 59, 59, 999_999));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2009, 4), Some(30));
        assert_eq!(days_in_month(0, 2), Some(29));
        assert_eq!(days_in_month(9999, 12), Some(31));
    }

    #[test]
    fn test_hour_out_of_range() {
        let err = parse("2009-01-01T25:01:02Z").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.field(), Some(Field::Hour));
        assert_eq!(err.to_string(), "hour must be in 0..23, found 25");
    }

    #[test]
    fn test_fields_out_of_range() {
        let cases = [
            ("2009-13-01T00:00:00Z", Field::Month),
            ("2009-00-01T00:00:00Z", Field::Month),
            ("2009-01-00T00:00:00Z", Field::Day),
            ("2009-02-29T00:00:00Z", Field::Day),
            ("2009-04-31T00:00:00Z", Field::Day),
            ("2009-01-01T00:60:00Z", Field::Minute),
            ("2009-01-01T00:00:60Z", Field::Second),
            ("2009-01-01T00:00:00+24:00", Field::OffsetHour),
            ("2009-01-01T00:00:00-01:60", Field::OffsetMinute),
        ];
        for (input, field) in cases {
            let err = parse(input).unwrap_err();
            assert_eq!(err.field(), Some(field), "wrong field for {}", input);
        }
    }

    #[test]
    fn test_leap_day() {
        assert!(parse("2008-02-29T00:00:00Z").is_ok());
        assert!(parse("2000-02-29T00:00:00Z").is_ok());
        assert!(parse("1900-02-29T00:00:00Z").is_err());
    }

    #[test]
    fn test_missing_offset() {
        let err = parse("2009-01-01T06:01:02").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(matches!(err, ParseError::Format { position: 19, .. }));
    }

    #[test]
    fn test_malformed() {
        let inputs = [
            "",
            "2009-01-01",
            "2009-01-01 10:01:02Z",
            "09-01-01T10:01:02Z",
            "2009-1-01T10:01:02Z",
            "2009-01-01T10:01Z",
            "2009-01-01T10:01:02.Z",
            "2009-01-01T10:01:02+0400",
            "2009-01-01T10:01:02+4:00",
            "2009-01-01T10:01:02ZZ",
            " 2009-01-01T10:01:02Z",
            "2009-01-01T10:01:02Z ",
            "+2009-01-01T10:01:02Z",
        ];
        for input in inputs {
            let err = parse(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format, "expected format error for {:?}", input);
        }
    }

    #[test]
    fn test_format_checked_before_range() {
        // Hour 25 and a missing offset: the structural problem wins.
        let err = parse("2009-01-01T25:01:02").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_year_zero() {
        let ts = parse("0000-01-01T00:00:00Z").unwrap();
        assert_eq!(ts.local().year(), 0);
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-03-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("2024-03-15Z").is_err());
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn test_parse_time() {
        let (time, offset) = parse_time("14:30:00.5+05:30").unwrap();
        assert_eq!(time, NaiveTime::from_hms_micro_opt(14, 30, 0, 500_000).unwrap());
        assert_eq!(offset.local_minus_utc(), 330 * 60);

        let err = parse_time("23:59:59.9999999Z").unwrap_err();
        assert_eq!(err.field(), Some(Field::Microsecond));

        assert!(parse_time("24:00:00Z").is_err());
        assert!(parse_time("14:30:00").is_err());
    }

    #[test]
    fn test_from_str() {
        let ts: Timestamp = "2009-01-01T10:01:02Z".parse().unwrap();
        assert_eq!(ts, utc(2009, 1, 1, 10, 1, 2, 0));
        assert!("garbage".parse::<Timestamp>().is_err());
    }
}
