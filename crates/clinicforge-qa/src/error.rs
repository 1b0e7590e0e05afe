//! Quality gate error type.
//!
//! Individual checks degrade to `warning` or `error` statuses instead of
//! propagating, so this enum only covers failures that stop the run
//! entirely.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QaError {
    #[error("project path is not a directory: {0}")]
    ProjectNotFound(PathBuf),

    #[error("unknown report level: {0}")]
    UnknownReportLevel(String),

    #[error(transparent)]
    Report(#[from] clinicforge_core::ReportError),
}
