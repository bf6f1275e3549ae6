//! Purpose: Stdout reporting for the sort pipeline stages.
//! Exports: `TextProgress`, `JsonProgress`.
//! Role: CLI-side `Observer` implementations; the library never prints.
//! Invariants: The "contains N items" line appears as soon as the count parses.
//! Invariants: `--print` output carries record bytes unchanged.
//! Invariants: JSON mode writes exactly one line, after a successful run.

use std::io::{self, Write};
use std::path::Path;

use linesort::core::error::{Error, ErrorKind};
use linesort::core::pipeline::{Observer, SortReport};
use linesort::core::record_set::RecordSet;
use linesort::core::timer::SortTiming;

fn stdout_error(err: io::Error) -> Error {
    Error::new(ErrorKind::Io)
        .with_message("failed to write to stdout")
        .with_source(err)
}

pub(crate) struct TextProgress {
    print_records: bool,
    count: usize,
}

impl TextProgress {
    pub(crate) fn new(print_records: bool) -> Self {
        Self {
            print_records,
            count: 0,
        }
    }
}

impl Observer for TextProgress {
    fn on_header(&mut self, input: &Path, count: usize) -> Result<(), Error> {
        self.count = count;
        let mut out = io::stdout().lock();
        writeln!(
            out,
            "Input file {} contains {count} items to sort",
            input.display()
        )
        .and_then(|()| out.flush())
        .map_err(stdout_error)
    }

    fn on_sorted(&mut self, records: &RecordSet, timing: SortTiming) -> Result<(), Error> {
        let mut out = io::stdout().lock();
        writeln!(
            out,
            "Sorting {} items required {} microseconds",
            self.count, timing.micros
        )
        .map_err(stdout_error)?;
        writeln!(out, "({} microseconds per item)", timing.micros_per_item)
            .map_err(stdout_error)?;
        if self.print_records {
            writeln!(out, "Current contents of the array").map_err(stdout_error)?;
            for record in records {
                out.write_all(record).map_err(stdout_error)?;
                out.write_all(b"\n").map_err(stdout_error)?;
            }
        }
        out.flush().map_err(stdout_error)
    }
}

pub(crate) struct JsonProgress;

impl Observer for JsonProgress {}

impl JsonProgress {
    pub(crate) fn finish(&self, report: &SortReport) -> Result<(), Error> {
        let json = serde_json::to_string(report).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to encode run report")
                .with_source(err)
        })?;
        let mut out = io::stdout().lock();
        writeln!(out, "{json}").map_err(stdout_error)
    }
}
