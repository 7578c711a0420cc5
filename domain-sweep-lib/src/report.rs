//! Report file writing.
//!
//! The output file is the whole point of a sweep: one timestamped text
//! file, created fresh per run, holding a header block and the available
//! domains in completion order.

use crate::error::SweepError;
use crate::types::RunReport;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Write the report file for a completed run.
///
/// The file is named `available_<YYYYMMDD>_<HHMMSS>.txt` from the run's
/// start time and placed in `out_dir` (created if missing). Returns the
/// path of the written file.
///
/// # Errors
///
/// Returns `SweepError::OutputError` if the directory or file cannot be
/// written. This is fatal for the caller: the results exist only in memory
/// and recomputing them is expensive.
pub fn write_report(report: &RunReport, out_dir: &Path) -> Result<PathBuf, SweepError> {
    fs::create_dir_all(out_dir)
        .map_err(|e| SweepError::output(out_dir.to_string_lossy(), e.to_string()))?;

    let filename = format!(
        "available_{}.txt",
        report.started_at.format("%Y%m%d_%H%M%S")
    );
    let path = out_dir.join(filename);

    let mut body = String::new();
    let _ = writeln!(
        body,
        "# Available domains - {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(body, "# Input file: {}", report.input_file);
    let _ = writeln!(
        body,
        "# Checked: {}, Available: {}, Errors: {}",
        report.checked, report.available_count, report.errors
    );
    body.push('\n');
    for domain in &report.available {
        body.push_str(domain);
        body.push('\n');
    }

    fs::write(&path, body)
        .map_err(|e| SweepError::output(path.to_string_lossy(), e.to_string()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_report() -> RunReport {
        RunReport {
            input_file: "domains.txt".to_string(),
            started_at: chrono::Local
                .with_ymd_and_hms(2025, 3, 14, 9, 26, 53)
                .unwrap(),
            checked: 4,
            available_count: 2,
            taken: 1,
            errors: 1,
            rejected_lines: 0,
            elapsed_seconds: 1.5,
            available: vec!["free-one.com".to_string(), "free-two.org".to_string()],
        }
    }

    #[test]
    fn test_filename_uses_start_time() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_report(&sample_report(), dir.path()).expect("write");
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "available_20250314_092653.txt"
        );
    }

    #[test]
    fn test_header_and_body() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_report(&sample_report(), dir.path()).expect("write");
        let content = fs::read_to_string(path).expect("read back");

        assert!(content.starts_with("# Available domains - 2025-03-14 09:26:53\n"));
        assert!(content.contains("# Input file: domains.txt\n"));
        assert!(content.contains("# Checked: 4, Available: 2, Errors: 1\n"));
        assert!(content.ends_with("free-one.com\nfree-two.org\n"));
    }

    #[test]
    fn test_empty_available_set_still_writes_header() {
        let mut report = sample_report();
        report.available.clear();
        report.available_count = 0;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_report(&report, dir.path()).expect("write");
        let content = fs::read_to_string(path).expect("read back");

        assert!(content.contains("# Checked: 4, Available: 0, Errors: 1\n"));
        assert!(content.ends_with("\n\n"));
    }

    #[test]
    fn test_creates_missing_output_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("reports").join("2025");
        let path = write_report(&sample_report(), &nested).expect("write");
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_dir_is_output_error() {
        let err = write_report(&sample_report(), Path::new("/proc/definitely/not/writable"))
            .unwrap_err();
        assert!(matches!(err, SweepError::OutputError { .. }));
    }
}
