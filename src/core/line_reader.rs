// Line reading over `BufRead` with an optional legacy fixed-buffer bound.
use std::io::{self, BufRead};

use bstr::ByteSlice;

use crate::core::format::LEGACY_LINE_BUFFER;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineLimit {
    /// Growable buffer; a physical line is always one read.
    #[default]
    Unbounded,
    /// Each read yields at most `buffer_len - 1` bytes, terminator included.
    /// Longer physical lines come back in several reads.
    Legacy { buffer_len: usize },
}

impl LineLimit {
    pub fn legacy() -> Self {
        LineLimit::Legacy {
            buffer_len: LEGACY_LINE_BUFFER,
        }
    }

    fn max_read(self) -> Option<usize> {
        match self {
            LineLimit::Unbounded => None,
            LineLimit::Legacy { buffer_len } => Some(buffer_len.saturating_sub(1).max(1)),
        }
    }
}

pub struct LineReader<R> {
    inner: R,
    limit: LineLimit,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R, limit: LineLimit) -> Self {
        Self { inner, limit }
    }

    /// Replaces `buf` with the next line, terminator included when present.
    /// Returns `false` at end of input.
    pub fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<bool> {
        buf.clear();
        let Some(max) = self.limit.max_read() else {
            return Ok(self.inner.read_until(b'\n', buf)? > 0);
        };

        while buf.len() < max {
            let (used, done) = {
                let available = match self.inner.fill_buf() {
                    Ok(available) => available,
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => return Err(err),
                };
                if available.is_empty() {
                    break;
                }
                let window = &available[..available.len().min(max - buf.len())];
                match window.find_byte(b'\n') {
                    Some(pos) => {
                        buf.extend_from_slice(&window[..=pos]);
                        (pos + 1, true)
                    }
                    None => {
                        buf.extend_from_slice(window);
                        (window.len(), false)
                    }
                }
            };
            self.inner.consume(used);
            if done {
                break;
            }
        }
        Ok(!buf.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::{LineLimit, LineReader};
    use std::io::{BufReader, Cursor};

    fn collect(input: &[u8], limit: LineLimit) -> Vec<Vec<u8>> {
        let mut reader = LineReader::new(Cursor::new(input.to_vec()), limit);
        let mut buf = Vec::new();
        let mut lines = Vec::new();
        while reader.read_line(&mut buf).expect("read") {
            lines.push(buf.clone());
        }
        lines
    }

    #[test]
    fn unbounded_reads_whole_lines() {
        let long = "x".repeat(10_000);
        let input = format!("a\n{long}\nlast");
        let lines = collect(input.as_bytes(), LineLimit::Unbounded);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], b"a\n");
        assert_eq!(lines[1].len(), 10_001);
        assert_eq!(lines[2], b"last");
    }

    #[test]
    fn legacy_splits_long_lines() {
        let lines = collect(b"abcdefg\nhi\n", LineLimit::Legacy { buffer_len: 4 });
        assert_eq!(
            lines,
            vec![
                b"abc".to_vec(),
                b"def".to_vec(),
                b"g\n".to_vec(),
                b"hi\n".to_vec(),
            ]
        );
    }

    #[test]
    fn legacy_line_that_fills_buffer_leaves_terminator_for_next_read() {
        let input = format!("{}\nz\n", "y".repeat(127));
        let lines = collect(input.as_bytes(), LineLimit::legacy());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 127);
        assert_eq!(lines[1], b"\n");
        assert_eq!(lines[2], b"z\n");
    }

    #[test]
    fn legacy_limit_holds_across_small_internal_buffers() {
        let input = b"0123456789\n".to_vec();
        let inner = BufReader::with_capacity(3, Cursor::new(input));
        let mut reader = LineReader::new(inner, LineLimit::Legacy { buffer_len: 8 });
        let mut buf = Vec::new();
        assert!(reader.read_line(&mut buf).unwrap());
        assert_eq!(buf, b"0123456");
        assert!(reader.read_line(&mut buf).unwrap());
        assert_eq!(buf, b"789\n");
        assert!(!reader.read_line(&mut buf).unwrap());
        assert!(buf.is_empty());
    }

    #[test]
    fn empty_input_is_end_of_stream() {
        assert!(collect(b"", LineLimit::Unbounded).is_empty());
        assert!(collect(b"", LineLimit::legacy()).is_empty());
    }
}
