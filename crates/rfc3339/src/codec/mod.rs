//! Text encoding/decoding of RFC 3339 timestamps.

pub mod cursor;
pub mod generator;
pub mod parser;

pub use cursor::Cursor;
pub use generator::{generate, generate_with_options};
pub use parser::{parse, parse_date, parse_time, parse_with_options};
