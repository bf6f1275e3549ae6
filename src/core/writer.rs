// Serialize a `RecordSet` back to the count-prefixed text format.
// Embedded line breaks are written verbatim; such records do not round-trip.
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::core::error::{Error, ErrorKind};
use crate::core::record_set::RecordSet;

/// Writes the header line and one line per record. Returns bytes written.
pub fn write<W: Write>(records: &RecordSet, mut writer: W) -> io::Result<u64> {
    let header = format!("{}\n", records.len());
    writer.write_all(header.as_bytes())?;
    let mut written = header.len() as u64;
    for record in records {
        writer.write_all(record)?;
        writer.write_all(b"\n")?;
        written += record.len() as u64 + 1;
    }
    writer.flush()?;
    Ok(written)
}

pub fn write_file(records: &RecordSet, path: &Path) -> Result<u64, Error> {
    let file = File::create(path).map_err(|err| {
        Error::new(ErrorKind::FileOpen)
            .with_message("cannot open output file")
            .with_hint("Check that the output directory exists and is writable.")
            .with_path(path)
            .with_source(err)
    })?;

    let written = write(records, BufWriter::new(file)).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write output file")
            .with_hint("Check free disk space on the output filesystem.")
            .with_path(path)
            .with_source(err)
    })?;
    debug!(path = %path.display(), bytes = written, "wrote records");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::{write, write_file};
    use crate::core::error::ErrorKind;
    use crate::core::record_set::RecordSet;

    #[test]
    fn writes_header_then_records() {
        let records: RecordSet = ["apple", "banana", "cherry"].into_iter().collect();
        let mut out = Vec::new();
        let written = write(&records, &mut out).unwrap();
        assert_eq!(out, b"3\napple\nbanana\ncherry\n");
        assert_eq!(written, out.len() as u64);
    }

    #[test]
    fn empty_records_still_get_a_line() {
        let records: RecordSet = ["", "x"].into_iter().collect();
        let mut out = Vec::new();
        write(&records, &mut out).unwrap();
        assert_eq!(out, b"2\n\nx\n");
    }

    #[test]
    fn writes_to_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("out.txt");
        let records: RecordSet = ["x"].into_iter().collect();
        write_file(&records, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1\nx\n");
    }

    #[test]
    fn unopenable_destination_is_a_file_open_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("missing-dir").join("out.txt");
        let records: RecordSet = ["x"].into_iter().collect();
        let err = write_file(&records, &path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileOpen);
        assert_eq!(err.path(), Some(path.as_path()));
    }
}
