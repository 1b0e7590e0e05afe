//! Report artifact writing shared by the pipeline stages.
//!
//! Each stage drops its machine-readable JSON report (and optionally a
//! human-readable Markdown companion) into a stage-specific directory,
//! with a timestamped filename so successive runs never clobber each other.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Filename-safe UTC timestamp, e.g. `2026-08-29T14-30-05`.
#[must_use]
pub fn timestamp_slug() -> String {
    Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string()
}

/// Serialize `report` as pretty-printed JSON into `dir/<stem>-<timestamp>.json`,
/// creating `dir` if needed. Returns the path written.
///
/// # Errors
///
/// Returns `ReportError` if the directory cannot be created, serialization
/// fails, or the file cannot be written.
pub fn write_json_report<T: Serialize>(
    dir: &Path,
    stem: &str,
    report: &T,
) -> Result<PathBuf, ReportError> {
    let path = dir.join(format!("{stem}-{}.json", timestamp_slug()));
    let body = serde_json::to_string_pretty(report)?;
    write_file(dir, &path, &body)?;
    Ok(path)
}

/// Serialize `report` as pretty-printed JSON into `dir/<filename>`, creating
/// `dir` if needed. The filename is stable, so a re-run refreshes the report
/// in place.
///
/// # Errors
///
/// Returns `ReportError` if the directory cannot be created, serialization
/// fails, or the file cannot be written.
pub fn write_json<T: Serialize>(
    dir: &Path,
    filename: &str,
    report: &T,
) -> Result<PathBuf, ReportError> {
    let path = dir.join(filename);
    let body = serde_json::to_string_pretty(report)?;
    write_file(dir, &path, &body)?;
    Ok(path)
}

/// Write a Markdown document to `dir/<filename>`, creating `dir` if needed.
/// Unlike JSON reports the filename is caller-supplied and stable, so a
/// re-run refreshes the document in place.
///
/// # Errors
///
/// Returns `ReportError` if the directory cannot be created or the file
/// cannot be written.
pub fn write_markdown(dir: &Path, filename: &str, body: &str) -> Result<PathBuf, ReportError> {
    let path = dir.join(filename);
    write_file(dir, &path, body)?;
    Ok(path)
}

fn write_file(dir: &Path, path: &Path, body: &str) -> Result<(), ReportError> {
    fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    fs::write(path, body).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use tempfile::tempdir;

    use super::*;

    #[derive(Serialize)]
    struct SampleReport {
        score: u32,
        passed: bool,
    }

    #[test]
    fn write_json_report_creates_dir_and_file() {
        let tmp = tempdir().expect("tempdir");
        let dir = tmp.path().join("qa-reports");
        let report = SampleReport {
            score: 85,
            passed: true,
        };

        let path = write_json_report(&dir, "qa-report", &report).expect("write report");
        assert!(path.exists());
        let name = path.file_name().and_then(|n| n.to_str()).expect("filename");
        assert!(name.starts_with("qa-report-"));
        assert!(name.ends_with(".json"));

        let body = std::fs::read_to_string(&path).expect("read back");
        assert!(body.contains("\"score\": 85"));
    }

    #[test]
    fn write_markdown_overwrites_in_place() {
        let tmp = tempdir().expect("tempdir");
        let dir = tmp.path().to_path_buf();

        let first = write_markdown(&dir, "GUIDE.md", "# v1\n").expect("write");
        let second = write_markdown(&dir, "GUIDE.md", "# v2\n").expect("rewrite");
        assert_eq!(first, second);
        assert_eq!(std::fs::read_to_string(&second).expect("read"), "# v2\n");
    }

    #[test]
    fn timestamp_slug_is_filename_safe() {
        let slug = timestamp_slug();
        assert!(!slug.contains(':'));
        assert!(!slug.contains(' '));
    }
}
