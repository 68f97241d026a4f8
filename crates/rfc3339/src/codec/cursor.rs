//! Byte cursor over timestamp text.
//!
//! RFC 3339 timestamps are pure ASCII, so the grammar works on bytes and
//! any non-ASCII byte simply fails to match.

use crate::error::ParseError;

/// Cursor for matching the RFC 3339 grammar.
///
/// Wraps the input text and provides methods for consuming fixed-width
/// digit runs and separators, reporting a format error that names the
/// whole input on mismatch.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the current byte position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the text consumed since byte position `start`.
    pub fn consumed_since(&self, start: usize) -> &'a str {
        &self.input[start..self.pos]
    }

    /// Returns true if all input has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns the next byte without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Builds a format error at the current position.
    pub fn error(&self, expected: &'static str) -> ParseError {
        trace!(
            "rejected {:?} at byte {}: expected {}",
            self.input, self.pos, expected
        );
        ParseError::Format {
            input: self.input.to_string(),
            expected,
            position: self.pos,
        }
    }

    /// Consumes `byte`, ignoring ASCII case.
    #[inline]
    pub fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), ParseError> {
        match self.peek() {
            Some(b) if b.eq_ignore_ascii_case(&byte) => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.error(expected)),
        }
    }

    /// Consumes exactly `width` ASCII digits and returns their value.
    #[inline]
    pub fn read_digits(
        &mut self,
        width: usize,
        expected: &'static str,
    ) -> Result<u32, ParseError> {
        let bytes = self.input.as_bytes();
        let mut value = 0u32;
        for i in 0..width {
            match bytes.get(self.pos + i) {
                Some(b) if b.is_ascii_digit() => value = value * 10 + u32::from(b - b'0'),
                _ => {
                    self.pos += i;
                    return Err(self.error(expected));
                }
            }
        }
        self.pos += width;
        Ok(value)
    }

    /// Consumes one or more ASCII digits and returns them as text.
    pub fn read_digit_run(&mut self, expected: &'static str) -> Result<&'a str, ParseError> {
        let start = self.pos;
        let len = self.input.as_bytes()[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if len == 0 {
            return Err(self.error(expected));
        }
        self.pos += len;
        Ok(&self.input[start..self.pos])
    }

    /// Fails unless all input has been consumed.
    pub fn finish(&self) -> Result<(), ParseError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.error("end of input"))
        }
    }
}
