//! Purpose: Run one load → sort → write pass and report what it cost.
//! Exports: `SortJob`, `SortReport`, `Observer`, `run`, `run_observed`.
//! Role: Composition point used by the CLI; stages stay independently testable.
//! Invariants: The output file is never opened unless loading succeeded.
//! Invariants: The input handle is released before the sort starts.
//! Invariants: Only the sort step is timed.
//! Invariants: `on_header` fires before records are read, so it also runs on short inputs.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::core::error::Error;
use crate::core::line_reader::LineLimit;
use crate::core::loader::load_file_with;
use crate::core::record_set::RecordSet;
use crate::core::sorter::SortStats;
use crate::core::timer::{SortTiming, time_it};
use crate::core::writer::write_file;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub line_limit: LineLimit,
}

impl SortJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            line_limit: LineLimit::Unbounded,
        }
    }

    pub fn with_line_limit(mut self, line_limit: LineLimit) -> Self {
        self.line_limit = line_limit;
        self
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SortReport {
    pub input: String,
    pub output: String,
    pub count: usize,
    #[serde(flatten)]
    pub timing: SortTiming,
    pub stats: SortStats,
    pub bytes_written: u64,
}

/// Hooks fired between stages. Defaults do nothing; an error aborts the run.
pub trait Observer {
    /// The count line parsed; records are not read yet.
    fn on_header(&mut self, _input: &Path, _count: usize) -> Result<(), Error> {
        Ok(())
    }

    fn on_sorted(&mut self, _records: &RecordSet, _timing: SortTiming) -> Result<(), Error> {
        Ok(())
    }
}

impl Observer for () {}

pub fn run(job: &SortJob) -> Result<SortReport, Error> {
    run_observed(job, &mut ())
}

pub fn run_observed(job: &SortJob, observer: &mut impl Observer) -> Result<SortReport, Error> {
    let mut hook = Ok(());
    let loaded = load_file_with(&job.input, job.line_limit, |header| {
        hook = observer.on_header(&job.input, header.count());
    });
    let mut records = loaded?;
    hook?;
    let count = records.len();

    let (stats, elapsed) = time_it(|| records.sort());
    let timing = SortTiming::new(elapsed, count);
    info!(
        count,
        micros = timing.micros,
        passes = stats.passes,
        swaps = stats.swaps,
        "sorted records"
    );
    observer.on_sorted(&records, timing)?;

    let bytes_written = write_file(&records, &job.output)?;

    Ok(SortReport {
        input: job.input.display().to_string(),
        output: job.output.display().to_string(),
        count,
        timing,
        stats,
        bytes_written,
    })
}
