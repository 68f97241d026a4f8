//! Error types for RFC 3339 parsing and generation.

use std::fmt;

use thiserror::Error;

/// Broad classes of failure shared by [`ParseError`] and [`GenerateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The text does not match the RFC 3339 grammar.
    Format,
    /// A field is well-formed but outside its valid range.
    Range,
    /// The requested options contradict the value's awareness.
    Conversion,
}

/// A date, time or offset field named in a range error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Microsecond,
    OffsetHour,
    OffsetMinute,
}

impl Field {
    /// Returns the field name as used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Year => "year",
            Field::Month => "month",
            Field::Day => "day",
            Field::Hour => "hour",
            Field::Minute => "minute",
            Field::Second => "second",
            Field::Microsecond => "microsecond",
            Field::OffsetHour => "offset hour",
            Field::OffsetMinute => "offset minute",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error while parsing an RFC 3339 timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("timestamp {input:?} does not conform to RFC 3339: expected {expected} at byte {position}")]
    Format {
        input: String,
        expected: &'static str,
        position: usize,
    },

    #[error("{field} must be in {min}..{max}, found {value}")]
    OutOfRange {
        field: Field,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("cannot produce a naive datetime from a local timestamp (offset {offset})")]
    NaiveFromLocal { offset: String },
}

impl ParseError {
    /// Returns the class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Format { .. } => ErrorKind::Format,
            ParseError::OutOfRange { .. } => ErrorKind::Range,
            ParseError::NaiveFromLocal { .. } => ErrorKind::Conversion,
        }
    }

    /// Returns the offending field for range errors.
    pub fn field(&self) -> Option<Field> {
        match self {
            ParseError::OutOfRange { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Error while generating an RFC 3339 timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("naive datetime and accept_naive is false")]
    NaiveNotAccepted,

    #[error("cannot generate a local timestamp from a naive datetime")]
    NaiveLocal,

    #[error("year {year} cannot be written as a 4-digit RFC 3339 year")]
    YearOutOfRange { year: i32 },
}

impl GenerateError {
    /// Returns the class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerateError::NaiveNotAccepted | GenerateError::NaiveLocal => ErrorKind::Conversion,
            GenerateError::YearOutOfRange { .. } => ErrorKind::Range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_message_names_field() {
        let err = ParseError::OutOfRange {
            field: Field::Hour,
            value: 25,
            min: 0,
            max: 23,
        };
        assert_eq!(err.to_string(), "hour must be in 0..23, found 25");
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.field(), Some(Field::Hour));
    }

    #[test]
    fn test_format_message_quotes_input() {
        let err = ParseError::Format {
            input: "2009-01-01T06:01:02".to_string(),
            expected: "time offset",
            position: 19,
        };
        let msg = err.to_string();
        assert!(msg.contains("\"2009-01-01T06:01:02\""));
        assert!(msg.contains("time offset"));
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_generate_kinds() {
        assert_eq!(GenerateError::NaiveNotAccepted.kind(), ErrorKind::Conversion);
        assert_eq!(GenerateError::NaiveLocal.kind(), ErrorKind::Conversion);
        assert_eq!(
            GenerateError::YearOutOfRange { year: 10000 }.kind(),
            ErrorKind::Range
        );
    }
}
