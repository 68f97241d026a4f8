//! The date-time value produced by the parser and consumed by the generator.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Timelike, Utc};

use crate::error::ParseError;
use crate::util::offset::utc_offset_seconds;

/// A civil date-time that is either aware (carries a UTC offset) or naive.
///
/// Equality between two aware values compares the instants they denote,
/// so `10:00:00Z` equals `06:00:00-04:00`. An aware value never equals a
/// naive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    /// A date-time with an attached UTC offset.
    Aware(DateTime<FixedOffset>),
    /// A date-time with no offset; ambiguous as to instant.
    Naive(NaiveDateTime),
}

impl Timestamp {
    /// Returns true if the value carries an offset.
    pub fn is_aware(&self) -> bool {
        matches!(self, Timestamp::Aware(_))
    }

    /// Returns true if the value carries no offset.
    pub fn is_naive(&self) -> bool {
        matches!(self, Timestamp::Naive(_))
    }

    /// Returns the aware date-time, if any.
    pub fn as_aware(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Timestamp::Aware(dt) => Some(dt),
            Timestamp::Naive(_) => None,
        }
    }

    /// Returns the naive date-time, if any.
    pub fn as_naive(&self) -> Option<&NaiveDateTime> {
        match self {
            Timestamp::Aware(_) => None,
            Timestamp::Naive(naive) => Some(naive),
        }
    }

    /// Returns the civil date-time as written, without the offset.
    pub fn local(&self) -> NaiveDateTime {
        match self {
            Timestamp::Aware(dt) => dt.naive_local(),
            Timestamp::Naive(naive) => *naive,
        }
    }

    /// Returns the offset in seconds east of UTC, or `None` for naive values.
    pub fn offset_seconds(&self) -> Option<i32> {
        self.as_aware().map(|dt| dt.offset().local_minus_utc())
    }

    /// Returns the offset in seconds east of UTC.
    ///
    /// # Panics
    ///
    /// Panics if the value is naive. Check [`is_aware`](Self::is_aware)
    /// first, or use [`offset_seconds`](Self::offset_seconds).
    pub fn utc_offset_seconds(&self) -> i32 {
        utc_offset_seconds(self)
    }

    /// Returns true if the value is aware with a zero offset.
    pub fn is_utc(&self) -> bool {
        self.offset_seconds() == Some(0)
    }

    /// Converts an aware value to a zero offset, preserving the instant.
    /// Naive values are returned unchanged.
    pub fn to_utc(&self) -> Timestamp {
        match self {
            Timestamp::Aware(dt) => Timestamp::Aware(dt.with_timezone(&Utc.fix())),
            Timestamp::Naive(_) => *self,
        }
    }

    /// Returns the sub-second part in microseconds (0..=999_999).
    ///
    /// A leap-second representation is folded back into the 59th second.
    pub fn microsecond(&self) -> u32 {
        self.local().nanosecond() % 1_000_000_000 / 1_000
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Timestamp::Aware(dt)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::Aware(dt.fixed_offset())
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(naive: NaiveDateTime) -> Self {
        Timestamp::Naive(naive)
    }
}

impl FromStr for Timestamp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::codec::parse(s)
    }
}
