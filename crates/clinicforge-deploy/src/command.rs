//! Subprocess execution for the deployment stages.
//!
//! Every external tool (npm, git, hosting CLIs) runs through [`run`] so
//! output capture and failure reporting stay uniform. Commands block until
//! exit with no timeout beyond the OS default.

use std::path::Path;

use tokio::process::Command;

use crate::error::DeployError;

/// Runs `program args...` in `cwd` and returns captured stdout.
///
/// # Errors
///
/// `DeployError::Spawn` when the program cannot be started (typically not
/// on PATH), `DeployError::Command` when it exits non-zero. The command
/// error carries stderr when the tool wrote any, the exit status otherwise.
pub(crate) async fn run(program: &str, args: &[&str], cwd: &Path) -> Result<String, DeployError> {
    let rendered = render(program, args);
    tracing::debug!(command = %rendered, cwd = %cwd.display(), "running command");

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .await
        .map_err(|source| DeployError::Spawn {
            command: rendered.clone(),
            source,
        })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = if stderr.trim().is_empty() {
            output.status.to_string()
        } else {
            stderr.trim().to_owned()
        };
        Err(DeployError::Command {
            command: rendered,
            output: detail,
        })
    }
}

fn render(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_owned()
    } else {
        format!("{program} {}", args.join(" "))
    }
}
