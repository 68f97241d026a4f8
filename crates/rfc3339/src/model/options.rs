//! Per-call options for parsing and generation.

/// Options for [`parse_with_options`](crate::parse_with_options).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Normalize the result to UTC, preserving the instant.
    pub utc: bool,

    /// Return a naive value for UTC timestamps.
    ///
    /// Parsing a timestamp with a non-zero offset fails when this is set,
    /// since the offset would be lost.
    pub produce_naive: bool,
}

impl ParseOptions {
    /// Creates default options: keep the parsed offset, produce aware values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that normalize the result to UTC.
    pub fn utc() -> Self {
        Self {
            utc: true,
            produce_naive: false,
        }
    }
}

/// Options for [`generate_with_options`](crate::generate_with_options).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Convert to UTC and emit `Z`. When false, the value's own offset is
    /// written.
    pub utc: bool,

    /// Treat a naive value as UTC instead of rejecting it. Only valid
    /// together with `utc`.
    pub accept_naive: bool,

    /// Append the fraction as exactly six digits. When false, any fraction
    /// is dropped (truncated, never rounded into the seconds).
    pub microseconds: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            utc: true,
            accept_naive: false,
            microseconds: false,
        }
    }
}

impl GenerateOptions {
    /// Creates default options: UTC output, no fraction, naive rejected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that keep the value's own offset.
    pub fn local() -> Self {
        Self {
            utc: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let parse = ParseOptions::new();
        assert!(!parse.utc);
        assert!(!parse.produce_naive);

        let generate = GenerateOptions::new();
        assert!(generate.utc);
        assert!(!generate.accept_naive);
        assert!(!generate.microseconds);
    }

    #[test]
    fn test_named_constructors() {
        assert!(ParseOptions::utc().utc);
        assert!(!GenerateOptions::local().utc);
        assert!(!GenerateOptions::local().microseconds);
    }
}
