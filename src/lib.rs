//! sortdir - sort a directory's files into subfolders
//!
//! This library scans a directory tree, classifies each file under one of
//! four sorting policies (by file type, by creation date, alphabetically, or
//! by size class), moves the files into their bucket subdirectories, and
//! prunes directories left empty. Progress is reported through a
//! caller-supplied event sink, so both the bundled CLI and a GUI host can
//! drive the same entry points.

pub mod cleanup;
pub mod cli;
pub mod config;
pub mod output;
pub mod policy;
pub mod progress;
pub mod relocator;
pub mod scanner;
pub mod sorter;

pub use config::{ConfigError, FilterConfig, ScanFilters};
pub use policy::SortPolicy;
pub use progress::Event;
pub use relocator::{MoveStats, SortError};
pub use scanner::FileRecord;
pub use sorter::FileSorter;
