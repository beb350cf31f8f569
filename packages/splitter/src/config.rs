//! Configuration constants and run settings for the splitter.

use std::path::{Path, PathBuf};

use crate::error::{Result, SplitterError};
use crate::types::ShortGridPolicy;

/// Number of cells on a full board.
pub const GRID_CELLS: usize = 81;

/// Cells per output line.
pub const ROW_WIDTH: usize = 9;

/// Prefix of every destination directory name.
pub const DIR_PREFIX: &str = "se";

/// Separator between the two level components.
pub const LEVEL_SEPARATOR: char = '.';

/// Record fields are separated by a single literal space.
///
/// Tabs or repeated spaces yield empty tokens and shift field positions.
pub const FIELD_SEPARATOR: char = ' ';

/// Token index of the puzzle identifier.
pub const IDENTIFIER_FIELD: usize = 0;

/// Token index of the grid string.
pub const GRID_FIELD: usize = 1;

/// Token index of the dotted level.
pub const LEVEL_FIELD: usize = 3;

/// Environment variable overriding the base output directory.
pub const OUTPUT_DIR_ENV: &str = "GRID_SPLITTER_OUTPUT_DIR";

/// Environment variable enabling truncated output for short grids.
pub const ALLOW_SHORT_GRIDS_ENV: &str = "GRID_SPLITTER_ALLOW_SHORT_GRIDS";

/// Settings for a single splitter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    /// Base directory under which level directories are created.
    pub output_dir: PathBuf,
    /// What to do with grids shorter than [`GRID_CELLS`].
    pub short_grids: ShortGridPolicy,
    /// Skip malformed records instead of aborting the run.
    pub keep_going: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitConfig {
    /// Fail-fast configuration writing into the current directory.
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            short_grids: ShortGridPolicy::default(),
            keep_going: false,
        }
    }

    /// Build a configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(dir) = lookup(OUTPUT_DIR_ENV).filter(|v| !v.is_empty()) {
            config.output_dir = PathBuf::from(dir);
        }

        let allow_short = lookup(ALLOW_SHORT_GRIDS_ENV)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if allow_short {
            config.short_grids = ShortGridPolicy::Truncate;
        }

        config
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_short_grids(mut self, policy: ShortGridPolicy) -> Self {
        self.short_grids = policy;
        self
    }

    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }
}

/// Validate that the base output directory exists and is a directory.
///
/// # Examples
/// ```
/// use grid_splitter::config::validate_output_dir;
///
/// assert!(validate_output_dir(std::path::Path::new(".")).is_ok());
/// assert!(validate_output_dir(std::path::Path::new("/no/such/dir")).is_err());
/// ```
pub fn validate_output_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SplitterError::Config(format!(
            "Output directory does not exist: {}",
            path.display()
        )));
    }
    if !path.is_dir() {
        return Err(SplitterError::Config(format!(
            "Output path is not a directory: {}",
            path.display()
        )));
    }
    Ok(())
}
