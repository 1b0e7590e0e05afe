//! Deployment error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    /// A pre-deployment validation check failed. Carries the check name
    /// and the reason; failure-report troubleshooting keys off the text.
    #[error("validation failed: {check} - {reason}")]
    Validation { check: String, reason: String },

    #[error("unsupported deployment platform: {0}")]
    UnsupportedPlatform(String),

    /// The hosting CLI is not on PATH.
    #[error("{cli} CLI not installed. Install with: {install_hint}")]
    CliMissing {
        cli: &'static str,
        install_hint: &'static str,
    },

    /// A subprocess exited non-zero. `output` is stderr when present,
    /// otherwise the exit status.
    #[error("{command} failed: {output}")]
    Command { command: String, output: String },

    #[error("could not spawn {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("could not extract deployment URL from {platform} output")]
    MissingDeploymentUrl { platform: String },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Report(#[from] clinicforge_core::ReportError),
}

pub(crate) fn io_err(path: &std::path::Path, source: std::io::Error) -> DeployError {
    DeployError::Io {
        path: path.to_path_buf(),
        source,
    }
}
