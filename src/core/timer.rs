// Wall-clock timing around the sort step.
use std::time::{Duration, Instant};

use serde::Serialize;

#[derive(Clone, Copy, Debug)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

pub fn time_it<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let stopwatch = Stopwatch::start();
    let value = f();
    (value, stopwatch.elapsed())
}

/// Sort duration in whole microseconds, total and per item.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct SortTiming {
    pub micros: u64,
    pub micros_per_item: u64,
}

impl SortTiming {
    pub fn new(elapsed: Duration, count: usize) -> Self {
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        let micros_per_item = micros.checked_div(count as u64).unwrap_or(0);
        Self {
            micros,
            micros_per_item,
        }
    }
}
