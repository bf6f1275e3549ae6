//! Purpose: Library crate behind the `linesort` CLI and its integration tests.
//! Exports: `core` (format, loading, exchange sort, writing, timing, pipeline, errors).
//! Role: Keeps the sort pipeline testable without spawning the binary.
//! Invariants: Core modules take explicit inputs and hold no global state.
#![allow(clippy::result_large_err)]
pub mod core;
