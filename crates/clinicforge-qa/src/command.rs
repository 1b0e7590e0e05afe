//! Subprocess capture for tool-backed checks.
//!
//! Unlike the deployment stages, a failing tool here is a check outcome,
//! not an error, so the raw exit status and both streams are returned.

use std::path::Path;

use tokio::process::Command;

pub(crate) struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs `program args...` in `cwd`, capturing both streams.
///
/// # Errors
///
/// Only spawn failures (program not on PATH) surface as `Err`; a
/// non-zero exit is a normal `CommandOutput` with `success: false`.
pub(crate) async fn run(
    program: &str,
    args: &[&str],
    cwd: &Path,
) -> std::io::Result<CommandOutput> {
    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .await?;
    Ok(CommandOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
