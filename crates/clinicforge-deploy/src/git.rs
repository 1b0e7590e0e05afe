//! Git repository setup before platform deployment.

use std::path::Path;

use crate::command;
use crate::error::DeployError;

/// Ensures the project is a git repository with no uncommitted changes,
/// optionally wiring a remote. An already-configured remote is not an
/// error.
///
/// # Errors
///
/// Propagates git subprocess failures from init, add, and commit.
pub async fn setup(project_dir: &Path, remote: Option<&str>) -> Result<(), DeployError> {
    if project_dir.join(".git").is_dir() {
        let status = command::run("git", &["status", "--porcelain"], project_dir).await?;
        if !status.trim().is_empty() {
            tracing::info!("committing pending changes");
            command::run("git", &["add", "."], project_dir).await?;
            command::run(
                "git",
                &["commit", "-m", "Pre-deployment customizations"],
                project_dir,
            )
            .await?;
        }
    } else {
        tracing::info!("initializing git repository");
        command::run("git", &["init"], project_dir).await?;
        command::run("git", &["add", "."], project_dir).await?;
        command::run(
            "git",
            &[
                "commit",
                "-m",
                "Initial commit - Customized CO2 Laser Template",
            ],
            project_dir,
        )
        .await?;
    }

    if let Some(remote) = remote {
        match command::run("git", &["remote", "add", "origin", remote], project_dir).await {
            Ok(_) => tracing::info!(remote, "added remote repository"),
            Err(err) => {
                tracing::warn!(remote, %err, "remote already configured or could not be added");
            }
        }
    }

    Ok(())
}
