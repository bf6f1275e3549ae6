//! Purpose: Load a count-prefixed text file into a `RecordSet`.
//! Exports: `load`, `load_with`, `load_file`, `load_file_with`.
//! Role: First pipeline stage; all format validation happens here.
//! Invariants: Success yields exactly `count` records; fewer lines is always an error.
//! Invariants: Lines beyond the declared count are left unread.
//! Invariants: Only the trailing `\n` of each line is removed.
//! Invariants: The header hook fires once the count parses, before storage is reserved.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use bstr::BString;
use tracing::debug;

use crate::core::error::{Error, ErrorKind};
use crate::core::format::{Header, strip_terminator};
use crate::core::line_reader::{LineLimit, LineReader};
use crate::core::record_set::RecordSet;

pub fn load<R: BufRead>(reader: R, limit: LineLimit) -> Result<RecordSet, Error> {
    load_with(reader, limit, |_| {})
}

/// Like [`load`], calling `on_header` as soon as the count line is accepted.
pub fn load_with<R, F>(reader: R, limit: LineLimit, mut on_header: F) -> Result<RecordSet, Error>
where
    R: BufRead,
    F: FnMut(&Header),
{
    let mut lines = LineReader::new(reader, limit);
    let mut buf = Vec::new();

    if !lines.read_line(&mut buf).map_err(|err| read_error(err, 1))? {
        return Err(Error::new(ErrorKind::EmptyInput)
            .with_message("input file seems to be empty")
            .with_hint("The first line must hold the number of records."));
    }
    let header = Header::parse(&buf)?;
    let count = header.count();
    debug!(count, "parsed header");
    on_header(&header);

    let mut records = RecordSet::with_capacity(count)?;
    for index in 0..count {
        let line = index as u64 + 2;
        if !lines.read_line(&mut buf).map_err(|err| read_error(err, line))? {
            return Err(Error::new(ErrorKind::MissingLines)
                .with_message(format!(
                    "header declares {count} records but input ends after {index}"
                ))
                .with_hint("Fix the count on the first line or add the missing lines.")
                .with_line(line)
                .with_counts(count as u64, index as u64));
        }
        strip_terminator(&mut buf);
        records.push(BString::from(std::mem::take(&mut buf)));
    }

    Ok(records)
}

pub fn load_file(path: &Path, limit: LineLimit) -> Result<RecordSet, Error> {
    load_file_with(path, limit, |_| {})
}

pub fn load_file_with<F>(path: &Path, limit: LineLimit, on_header: F) -> Result<RecordSet, Error>
where
    F: FnMut(&Header),
{
    let file = File::open(path).map_err(|err| {
        Error::new(ErrorKind::FileOpen)
            .with_message("unable to open input file")
            .with_hint("Check that the input path exists and is readable.")
            .with_path(path)
            .with_source(err)
    })?;

    let records = load_with(BufReader::new(file), limit, on_header).map_err(|err| match err.path() {
        Some(_) => err,
        None => err.with_path(path),
    })?;
    debug!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

fn read_error(err: io::Error, line: u64) -> Error {
    Error::new(ErrorKind::Io)
        .with_message("failed to read input")
        .with_line(line)
        .with_source(err)
}
