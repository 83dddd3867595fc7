//! File system input and output.

pub mod reader;
pub mod writer;

pub use reader::{InputReader, LoadResult, LoadStatistics, LoadedInput, collect_loaded};
pub use writer::{OutputWriter, WriteOptions, WriteStatistics};
