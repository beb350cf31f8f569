//! Core data types for the splitter.
//!
//! A [`Record`] is one parsed input line; its [`Level`] decides which
//! directory the reformatted grid lands in.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::config::{
    DIR_PREFIX, FIELD_SEPARATOR, GRID_FIELD, IDENTIFIER_FIELD, LEVEL_FIELD, LEVEL_SEPARATOR,
};
use crate::error::{Result, SplitterError};

/// How grids shorter than a full board are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShortGridPolicy {
    /// Fail the record.
    #[default]
    Reject,

    /// Write whatever is there; trailing rows come out short or empty.
    Truncate,
}

/// Dotted two-part difficulty level, e.g. `3.7`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Level {
    pub major: String,
    pub minor: String,
}

impl Level {
    /// Parse a raw level token.
    ///
    /// Surrounding whitespace is trimmed. Components after the second are
    /// ignored, so `3.7.1` buckets with `3.7`.
    ///
    /// # Examples
    /// ```
    /// use grid_splitter::types::Level;
    ///
    /// let level = Level::parse("3.7\n", 1).unwrap();
    /// assert_eq!(level.dir_name(), "se3_7");
    /// assert!(Level::parse("37", 1).is_err());
    /// ```
    pub fn parse(raw: &str, line: usize) -> Result<Self> {
        let trimmed = raw.trim();
        let mut parts = trimmed.split(LEVEL_SEPARATOR);

        match (parts.next(), parts.next()) {
            (Some(major), Some(minor)) => Ok(Self {
                major: major.to_string(),
                minor: minor.to_string(),
            }),
            _ => Err(SplitterError::MalformedLevel {
                line,
                value: trimmed.to_string(),
            }),
        }
    }

    /// Destination directory name: `se<major>_<minor>`.
    #[must_use]
    pub fn dir_name(&self) -> String {
        format!("{DIR_PREFIX}{}_{}", self.major, self.minor)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{LEVEL_SEPARATOR}{}", self.major, self.minor)
    }
}

/// One puzzle record parsed from an input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Puzzle identifier, used verbatim in the output filename.
    pub identifier: String,

    /// Flat row-major grid string.
    pub grid: String,

    /// Difficulty level.
    pub level: Level,
}

impl Record {
    /// Parse a record from an input line.
    ///
    /// `line` is the 1-based line number, used only for error reporting.
    pub fn parse(text: &str, line: usize) -> Result<Self> {
        let tokens: Vec<&str> = text.split(FIELD_SEPARATOR).collect();
        let missing = |field: &'static str, index: usize| SplitterError::MalformedRecord {
            line,
            field,
            index,
            found: tokens.len(),
        };

        let Some(grid) = tokens.get(GRID_FIELD) else {
            return Err(missing("grid", GRID_FIELD));
        };
        let Some(level) = tokens.get(LEVEL_FIELD) else {
            return Err(missing("level", LEVEL_FIELD));
        };

        Ok(Self {
            identifier: tokens[IDENTIFIER_FIELD].to_string(),
            grid: (*grid).to_string(),
            level: Level::parse(level, line)?,
        })
    }

    /// Directory this record is written into.
    #[must_use]
    pub fn dir_name(&self) -> String {
        self.level.dir_name()
    }

    /// Output filename: `<dir>-<identifier>`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}-{}", self.dir_name(), self.identifier)
    }

    /// Grid length in characters.
    #[must_use]
    pub fn grid_len(&self) -> usize {
        self.grid.chars().count()
    }
}

/// Outcome of a splitter run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    /// Records written.
    pub records: usize,

    /// Output files written, in input order.
    pub outputs: Vec<PathBuf>,

    /// Distinct level directories touched.
    pub directories: BTreeSet<String>,

    /// Non-fatal problems, one entry per affected line.
    pub warnings: Vec<String>,

    /// Lines skipped in keep-going mode.
    pub skipped: usize,
}

impl SplitReport {
    /// True when every line was written without warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.skipped == 0
    }
}
