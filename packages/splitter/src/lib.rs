//! Grid Splitter - Split puzzle record files into per-level grid files.
//!
//! Each input line holds a puzzle identifier, an 81-character grid string and
//! a dotted difficulty level. Every record is written as a nine-line board
//! into a directory named after its level.
//!
//! # Example
//!
//! ```
//! use grid_splitter::types::Record;
//!
//! let line = format!("p1 {} x 3.7", "123456789".repeat(9));
//! let record = Record::parse(&line, 1).unwrap();
//! assert_eq!(record.file_name(), "se3_7-p1");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants and run configuration
//! - [`error`]: Error types and Result alias
//! - [`types`]: Records, levels and the run report
//! - [`grid`]: Board formatting
//! - [`writer`]: Directory creation and file output
//! - [`splitter`]: Line-by-line driver
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
pub mod splitter;
pub mod types;
pub mod writer;

// Re-export main functions
pub use splitter::{split_file, split_reader};

// Re-export commonly used items
pub use config::SplitConfig;
pub use error::{Result, SplitterError};
pub use types::{Level, Record, ShortGridPolicy, SplitReport};
