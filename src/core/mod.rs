// Core modules implementing the count-prefixed format, the exchange sort, and error modeling.
pub mod error;
pub mod format;
pub mod line_reader;
pub mod loader;
pub mod pipeline;
pub mod record_set;
pub mod sorter;
pub mod timer;
pub mod writer;
