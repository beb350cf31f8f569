//! Error types for the splitter.
//!
//! Record-level failures carry the 1-based line number they came from so a
//! failed run points straight at the offending input line.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the splitter library.
#[derive(Debug, Error)]
pub enum SplitterError {
    /// Missing or invalid command-line arguments.
    #[error("{0}")]
    Usage(String),

    /// A record line lacks one of the fields the splitter reads.
    #[error("Line {line}: missing {field} field (token {index}); found {found} token(s)")]
    MalformedRecord {
        line: usize,
        field: &'static str,
        index: usize,
        found: usize,
    },

    /// The level field is not a dotted `A.B` pair.
    #[error("Line {line}: malformed level '{value}'. Expected A.B (e.g., 3.7)")]
    MalformedLevel { line: usize, value: String },

    /// A line is not valid UTF-8.
    #[error("Line {line}: not valid UTF-8")]
    InvalidEncoding { line: usize },

    /// Grid string shorter than a full board.
    #[error("Line {line}: grid has {len} characters, expected at least 81")]
    ShortGrid { line: usize, len: usize },

    /// Directory creation or output write failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file could not be opened.
    #[error("Failed to read {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SplitterError {
    /// Whether the error concerns a single input record rather than the run.
    ///
    /// Only record errors may be skipped in keep-going mode.
    #[must_use]
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedRecord { .. }
                | Self::MalformedLevel { .. }
                | Self::InvalidEncoding { .. }
                | Self::ShortGrid { .. }
        )
    }

    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            _ => 1,
        }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitterError>;
