//! Serde adapters for RFC 3339 text.
//!
//! Use with serde's `#[serde(with = "...")]` field attribute:
//!
//! ```rust
//! use chrono::{DateTime, FixedOffset};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Event {
//!     #[serde(with = "rfc3339::serde_rfc3339")]
//!     at: DateTime<FixedOffset>,
//! }
//! ```
//!
//! The top-level functions keep the value's own offset. [`utc`] always
//! writes `Z`, and [`option`] handles `Option<DateTime<FixedOffset>>`.
//! Six fraction digits are written only when the value has a non-zero
//! sub-second part.

use chrono::{DateTime, FixedOffset};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

use crate::codec::{generate_with_options, parse_with_options};
use crate::error::GenerateError;
use crate::model::{GenerateOptions, ParseOptions, Timestamp};

fn to_text(dt: DateTime<FixedOffset>, utc: bool) -> Result<String, GenerateError> {
    let options = GenerateOptions {
        utc,
        accept_naive: false,
        microseconds: Timestamp::Aware(dt).microsecond() != 0,
    };
    generate_with_options(dt, options)
}

fn from_text<E: serde::de::Error>(
    text: &str,
    options: ParseOptions,
) -> Result<DateTime<FixedOffset>, E> {
    parse_with_options(text, options)
        .map_err(E::custom)?
        .as_aware()
        .copied()
        .ok_or_else(|| E::custom("expected a timestamp with an offset"))
}

/// Serializes a `DateTime<FixedOffset>` as RFC 3339 text with its own offset.
pub fn serialize<S: Serializer>(
    dt: &DateTime<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let text = to_text(*dt, false).map_err(S::Error::custom)?;
    serializer.serialize_str(&text)
}

/// Deserializes a `DateTime<FixedOffset>` from RFC 3339 text.
pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<FixedOffset>, D::Error> {
    let text = String::deserialize(deserializer)?;
    from_text(&text, ParseOptions::default())
}

/// Adapters for `DateTime<Utc>`, always written with `Z`.
pub mod utc {
    use chrono::{DateTime, Utc};
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::model::ParseOptions;

    /// Serializes a `DateTime<Utc>` as RFC 3339 text ending in `Z`.
    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        let text = super::to_text(dt.fixed_offset(), true).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    /// Deserializes RFC 3339 text with any offset into a `DateTime<Utc>`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        let dt = super::from_text::<D::Error>(&text, ParseOptions::utc())?;
        Ok(dt.with_timezone(&Utc))
    }
}

/// Adapters for `Option<DateTime<FixedOffset>>`.
pub mod option {
    use chrono::{DateTime, FixedOffset};
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::model::ParseOptions;

    /// Serializes `Some` as RFC 3339 text and `None` as none.
    pub fn serialize<S: Serializer>(
        dt: &Option<DateTime<FixedOffset>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => {
                let text = super::to_text(*dt, false).map_err(S::Error::custom)?;
                serializer.serialize_some(&text)
            }
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes optional RFC 3339 text.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<FixedOffset>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => super::from_text::<D::Error>(&text, ParseOptions::default()).map(Some),
            None => Ok(None),
        }
    }
}
