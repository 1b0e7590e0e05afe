use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a customization run.
///
/// Missing extracted data never lands here; it becomes a manual-review item.
/// These are file-system and template-shape failures only.
#[derive(Debug, Error)]
pub enum CustomizeError {
    #[error("template directory not found: {0}")]
    TemplateNotFound(PathBuf),

    #[error("required template file missing: {0}")]
    RequiredFileMissing(PathBuf),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Report(#[from] clinicforge_core::ReportError),
}

pub(crate) fn io_err(path: &std::path::Path, source: std::io::Error) -> CustomizeError {
    CustomizeError::Io {
        path: path.to_path_buf(),
        source,
    }
}
