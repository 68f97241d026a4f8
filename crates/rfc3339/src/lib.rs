//! Strict RFC 3339 timestamp parsing and generation.
//!
//! This crate converts between RFC 3339 `date-time` text and an in-memory
//! [`Timestamp`], which is either aware (a `chrono::DateTime<FixedOffset>`)
//! or naive (a `chrono::NaiveDateTime`).
//!
//! # Quick Start
//!
//! ```rust
//! use rfc3339::{generate, generate_with_options, parse, GenerateOptions};
//!
//! let ts = parse("2009-01-01T14:01:02-04:00").unwrap();
//! assert_eq!(ts.offset_seconds(), Some(-4 * 3600));
//!
//! // UTC output by default.
//! assert_eq!(generate(ts).unwrap(), "2009-01-01T18:01:02Z");
//!
//! // Or keep the original offset.
//! let local = generate_with_options(ts, GenerateOptions::local()).unwrap();
//! assert_eq!(local, "2009-01-01T14:01:02-04:00");
//! ```
//!
//! # Modules
//!
//! - [`model`]: The [`Timestamp`] value and per-call options
//! - [`codec`]: The grammar-driven parser and the generator
//! - [`util`]: Offset formatting and extraction
//! - [`error`]: Error types
//!
//! # Wire Format
//!
//! Parsing accepts exactly the RFC 3339 `date-time` production (`T` and `Z`
//! in either case, any number of fraction digits). Generation always writes
//! a 4-digit year, upper-case `T`, either no fraction or exactly six
//! digits, and `Z` for a zero offset, never `+00:00`.
//!
//! # Features
//!
//! - `logging`: emit `log` records for rejected input
//! - `serde`: `#[serde(with = ...)]` adapters in `serde_rfc3339`

#[macro_use]
mod logging;

pub mod codec;
pub mod error;
pub mod model;
#[cfg(feature = "serde")]
pub mod serde_rfc3339;
pub mod util;

// Re-export commonly used types at crate root
pub use codec::{
    generate, generate_with_options, parse, parse_date, parse_time, parse_with_options,
};
pub use error::{ErrorKind, Field, GenerateError, ParseError};
pub use model::{GenerateOptions, ParseOptions, Timestamp};
pub use util::{format_offset, utc_offset_seconds};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
