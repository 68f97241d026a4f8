//! Data model types.
//!
//! - [`Timestamp`]: an aware or naive civil date-time
//! - [`ParseOptions`] / [`GenerateOptions`]: per-call conversion options

pub mod options;
pub mod timestamp;

pub use options::{GenerateOptions, ParseOptions};
pub use timestamp::Timestamp;
