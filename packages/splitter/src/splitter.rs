//! Record splitter that ties parsing and writing together.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::{SplitConfig, GRID_CELLS};
use crate::error::{Result, SplitterError};
use crate::types::{Record, ShortGridPolicy, SplitReport};
use crate::writer::save_record;

/// Split every record of an input file into its level directory.
///
/// # Arguments
/// * `input` - Path to the record file
/// * `config` - Output directory and failure policies
///
/// # Returns
/// A `SplitReport` describing what was written and any warnings
pub fn split_file(input: &Path, config: &SplitConfig) -> Result<SplitReport> {
    let file = File::open(input).map_err(|source| SplitterError::ReadInput {
        path: input.to_path_buf(),
        source,
    })?;

    tracing::info!(
        input = %input.display(),
        output = %config.output_dir.display(),
        "splitting records"
    );

    split_reader(BufReader::new(file), config)
}

/// Split records read from any buffered source.
///
/// Lines are numbered from 1. The first failing line aborts the run unless
/// `keep_going` is set, in which case record-level failures are logged and
/// skipped. Filesystem failures always abort.
pub fn split_reader<R: BufRead>(reader: R, config: &SplitConfig) -> Result<SplitReport> {
    let mut report = SplitReport::default();

    for (idx, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes?;
        let line_number = idx + 1;

        let result = decode_line(bytes, line_number)
            .and_then(|line| split_line(&line, line_number, config, &mut report));
        match result {
            Ok(()) => {}
            Err(e) if config.keep_going && e.is_record_error() => {
                tracing::warn!(line = line_number, error = %e, "skipping malformed record");
                report.warnings.push(e.to_string());
                report.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        records = report.records,
        directories = report.directories.len(),
        skipped = report.skipped,
        "split finished"
    );

    Ok(report)
}

/// Decode one raw line, dropping a trailing `\r`.
fn decode_line(mut bytes: Vec<u8>, line_number: usize) -> Result<String> {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    String::from_utf8(bytes).map_err(|_| SplitterError::InvalidEncoding { line: line_number })
}

/// Parse and write a single line.
fn split_line(
    line: &str,
    line_number: usize,
    config: &SplitConfig,
    report: &mut SplitReport,
) -> Result<()> {
    let record = Record::parse(line, line_number)?;

    let len = record.grid_len();
    if len < GRID_CELLS {
        match config.short_grids {
            ShortGridPolicy::Reject => {
                return Err(SplitterError::ShortGrid {
                    line: line_number,
                    len,
                });
            }
            ShortGridPolicy::Truncate => {
                tracing::warn!(line = line_number, len, "short grid, writing truncated board");
                report.warnings.push(format!(
                    "Line {line_number}: grid has {len} characters, output truncated"
                ));
            }
        }
    }

    let path = save_record(&record, &config.output_dir)?;
    tracing::debug!(
        line = line_number,
        level = %record.level,
        path = %path.display(),
        "record written"
    );

    report.directories.insert(record.dir_name());
    report.outputs.push(path);
    report.records += 1;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn grid() -> String {
        "123456789".repeat(9)
    }

    #[test]
    fn test_split_reader_writes_each_record() {
        let temp_dir = tempdir().unwrap();
        let config = SplitConfig::new().with_output_dir(temp_dir.path());
        let input = format!("p1 {g} x 3.7\np2 {g} x 3.7\np3 {g} x 1.2\n", g = grid());

        let report = split_reader(Cursor::new(input), &config).unwrap();

        assert_eq!(report.records, 3);
        assert_eq!(
            report.directories.iter().cloned().collect::<Vec<_>>(),
            vec!["se1_2".to_string(), "se3_7".to_string()]
        );
        assert_eq!(
            report.outputs,
            vec![
                temp_dir.path().join("se3_7/se3_7-p1"),
                temp_dir.path().join("se3_7/se3_7-p2"),
                temp_dir.path().join("se1_2/se1_2-p3"),
            ]
        );
        assert!(report.is_clean());
    }

    #[test]
    fn test_split_reader_aborts_on_first_error() {
        let temp_dir = tempdir().unwrap();
        let config = SplitConfig::new().with_output_dir(temp_dir.path());
        let input = format!("p1 {g} x 3.7\np2 {g}\np3 {g} x 3.7\n", g = grid());

        let err = split_reader(Cursor::new(input), &config).unwrap_err();
        assert!(
            matches!(err, SplitterError::MalformedRecord { line: 2, .. }),
            "got: {err}"
        );

        // Output written before the failure stays on disk
        assert!(temp_dir.path().join("se3_7/se3_7-p1").exists());
        assert!(!temp_dir.path().join("se3_7/se3_7-p3").exists());
    }

    #[test]
    fn test_split_reader_empty_line_is_fatal() {
        let temp_dir = tempdir().unwrap();
        let config = SplitConfig::new().with_output_dir(temp_dir.path());
        let input = format!("p1 {g} x 3.7\n\np3 {g} x 3.7\n", g = grid());

        let err = split_reader(Cursor::new(input), &config).unwrap_err();
        assert!(
            matches!(err, SplitterError::MalformedRecord { line: 2, .. }),
            "got: {err}"
        );
    }

    #[test]
    fn test_short_grid_rejected_by_default() {
        let temp_dir = tempdir().unwrap();
        let config = SplitConfig::new().with_output_dir(temp_dir.path());

        let err = split_reader(Cursor::new("p1 1234 x 3.7\n"), &config).unwrap_err();
        assert!(
            matches!(err, SplitterError::ShortGrid { line: 1, len: 4 }),
            "got: {err}"
        );
        assert!(!temp_dir.path().join("se3_7").exists());
    }

    #[test]
    fn test_short_grid_truncated_when_allowed() {
        let temp_dir = tempdir().unwrap();
        let config = SplitConfig::new()
            .with_output_dir(temp_dir.path())
            .with_short_grids(ShortGridPolicy::Truncate);

        let report = split_reader(Cursor::new("p1 1234567891 x 3.7\n"), &config).unwrap();

        assert_eq!(report.records, 1);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("Line 1:"));
        let content = fs::read_to_string(temp_dir.path().join("se3_7/se3_7-p1")).unwrap();
        assert_eq!(content, "123456789\n1\n\n\n\n\n\n\n\n");
    }

    #[test]
    fn test_keep_going_skips_record_errors() {
        let temp_dir = tempdir().unwrap();
        let config = SplitConfig::new()
            .with_output_dir(temp_dir.path())
            .with_keep_going(true);
        let input = format!("p1 {g} x 3.7\nbroken\np3 {g} x 37\np4 {g} x 2.2\n", g = grid());

        let report = split_reader(Cursor::new(input), &config).unwrap();

        assert_eq!(report.records, 2);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].starts_with("Line 2:"));
        assert!(report.warnings[1].starts_with("Line 3:"));
        assert!(temp_dir.path().join("se2_2/se2_2-p4").exists());
    }

    #[test]
    fn test_keep_going_still_aborts_on_filesystem_error() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("se3_7"), "blocking file").unwrap();
        let config = SplitConfig::new()
            .with_output_dir(temp_dir.path())
            .with_keep_going(true);

        let err = split_reader(Cursor::new(format!("p1 {} x 3.7\n", grid())), &config)
            .unwrap_err();
        assert!(matches!(err, SplitterError::Filesystem { .. }), "got: {err}");
    }

    #[test]
    fn test_invalid_utf8_line_is_fatal() {
        let temp_dir = tempdir().unwrap();
        let config = SplitConfig::new().with_output_dir(temp_dir.path());
        let mut input = format!("p1 {} x 3.7\n", grid()).into_bytes();
        input.extend_from_slice(b"p2 \xff\xfe x 3.7\n");

        let err = split_reader(Cursor::new(input), &config).unwrap_err();
        assert!(
            matches!(err, SplitterError::InvalidEncoding { line: 2 }),
            "got: {err}"
        );
        assert!(temp_dir.path().join("se3_7/se3_7-p1").exists());
    }

    #[test]
    fn test_keep_going_skips_invalid_utf8_line() {
        let temp_dir = tempdir().unwrap();
        let config = SplitConfig::new()
            .with_output_dir(temp_dir.path())
            .with_keep_going(true);
        let mut input = format!("p1 {} x 3.7\n", grid()).into_bytes();
        input.extend_from_slice(b"p2 \xff\xfe x 3.7\n");
        input.extend_from_slice(format!("p3 {} x 3.7\n", grid()).as_bytes());

        let report = split_reader(Cursor::new(input), &config).unwrap();

        assert_eq!(report.records, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.warnings, vec!["Line 2: not valid UTF-8".to_string()]);
        assert!(temp_dir.path().join("se3_7/se3_7-p3").exists());
    }

    #[test]
    fn test_crlf_line_endings_are_stripped() {
        let temp_dir = tempdir().unwrap();
        let config = SplitConfig::new().with_output_dir(temp_dir.path());
        let input = format!("p1 {} x 3.7\r\n", grid());

        let report = split_reader(Cursor::new(input), &config).unwrap();
        assert_eq!(report.outputs, vec![temp_dir.path().join("se3_7/se3_7-p1")]);
    }

    #[test]
    fn test_split_file_missing_input() {
        let temp_dir = tempdir().unwrap();
        let config = SplitConfig::new().with_output_dir(temp_dir.path());

        let err = split_file(&temp_dir.path().join("nope.txt"), &config).unwrap_err();
        assert!(matches!(err, SplitterError::ReadInput { .. }), "got: {err}");
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn test_split_empty_input() {
        let temp_dir = tempdir().unwrap();
        let config = SplitConfig::new().with_output_dir(temp_dir.path());

        let report = split_reader(Cursor::new(""), &config).unwrap();
        assert_eq!(report, SplitReport::default());
    }
}
