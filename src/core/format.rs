//! Purpose: Centralize the count-prefixed text format shared by loader and writer.
//! Exports: `Header`, `LEGACY_LINE_BUFFER`, `strip_terminator`.
//! Role: Single source for header parsing rules and line terminator handling.
//! Invariants: A parsed header always declares a count greater than zero.
//! Invariants: Only the leading integer of the count line is significant.
//! Invariants: `Header` display output is accepted by `Header::parse`.

use std::fmt;
use std::num::NonZeroUsize;

use bstr::ByteSlice;

use crate::core::error::{Error, ErrorKind};

/// Buffer size of the legacy fixed-buffer reader, terminator included.
pub const LEGACY_LINE_BUFFER: usize = 128;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Header {
    count: NonZeroUsize,
}

impl Header {
    pub fn new(count: usize) -> Option<Self> {
        NonZeroUsize::new(count).map(|count| Self { count })
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Parses the first line of an input file: optional leading whitespace,
    /// an optional sign, then a run of decimal digits. Whatever follows the
    /// digits is ignored, so `3 20` (count, then maximum record length)
    /// declares three records.
    pub fn parse(line: &[u8]) -> Result<Self, Error> {
        let rest = line.trim_start();
        let (negative, unsigned) = match rest.first() {
            Some(b'-') => (true, &rest[1..]),
            Some(b'+') => (false, &rest[1..]),
            _ => (false, rest),
        };
        let digits_len = unsigned.iter().take_while(|b| b.is_ascii_digit()).count();
        let digits = &unsigned[..digits_len];

        if digits.is_empty() {
            let shown = line.trim();
            if shown.is_empty() {
                return Err(malformed("missing item count"));
            }
            return Err(malformed(format!(
                "item count is not a decimal integer: {:?}",
                shown.as_bstr()
            )));
        }
        if negative && digits.iter().any(|&b| b != b'0') {
            return Err(malformed(format!(
                "item count must be positive, got -{}",
                digits.as_bstr()
            )));
        }

        let count = digits.iter().try_fold(0usize, |acc, &b| {
            acc.checked_mul(10)?.checked_add(usize::from(b - b'0'))
        });
        let Some(count) = count else {
            return Err(malformed(format!(
                "item count {} is out of range",
                digits.as_bstr()
            )));
        };

        Header::new(count).ok_or_else(|| malformed("item count must be greater than zero"))
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count)
    }
}

/// Removes a single trailing `\n`. Carriage returns are record content.
pub fn strip_terminator(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
    }
}

fn malformed(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::MalformedHeader)
        .with_message(message)
        .with_line(1)
        .with_hint("The first line must hold the number of records, e.g. `3`.")
}
