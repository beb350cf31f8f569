//! Output writing: level directories and per-record grid files.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Result, SplitterError};
use crate::grid::format_grid;
use crate::types::Record;

/// Make sure `base/name` exists as a directory.
///
/// An existing directory is not an error; an existing non-directory is.
pub fn ensure_dir(base: &Path, name: &str) -> Result<()> {
    let path = base.join(name);

    match fs::create_dir(&path) {
        Ok(()) => {
            tracing::debug!(dir = %path.display(), "created level directory");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(SplitterError::filesystem(path, e)),
    }
}

/// Write `content` to `dir/file_name`, replacing any existing file.
///
/// Uses atomic write pattern: writes to a randomly named temp file in the
/// same directory, syncs to disk, then persists it over the target. The temp
/// file is removed on drop if any step fails.
pub fn write_atomic(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    let output_file = dir.join(file_name);

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| SplitterError::filesystem(dir, e))?;
    temp.write_all(content.as_bytes())
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| SplitterError::filesystem(temp.path(), e))?;

    temp.persist(&output_file)
        .map_err(|e| SplitterError::filesystem(&output_file, e.error))?;

    Ok(output_file)
}

/// Save a record's grid under `output_base/<dir>/<dir>-<identifier>`.
///
/// # Returns
/// Path to the written file
pub fn save_record(record: &Record, output_base: &Path) -> Result<PathBuf> {
    let dir_name = record.dir_name();
    ensure_dir(output_base, &dir_name)?;

    let content = format_grid(&record.grid);
    write_atomic(&output_base.join(&dir_name), &record.file_name(), &content)
}
