//! Offset helpers shared by the parser and the generator.

pub mod offset;

pub use offset::{format_offset, utc_offset_seconds};
