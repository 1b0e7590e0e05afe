//! Hosting platform deployment via the vendor CLIs.
//!
//! Neither CLI offers a stable machine-readable output here, so the live
//! URL is scraped from stdout and the result is tagged low-confidence.

use std::path::Path;

use clinicforge_core::{DeploymentResult, UrlConfidence};
use regex::Regex;

use crate::command;
use crate::error::DeployError;
use crate::types::{Environment, Platform};

/// Deploys `project_dir` with the platform CLI and scrapes the resulting
/// URL from its output.
///
/// # Errors
///
/// `DeployError::CliMissing` when the tool is not installed,
/// `DeployError::Command` when the deploy itself fails, and
/// `DeployError::MissingDeploymentUrl` when no URL appears in the output.
pub async fn deploy(
    project_dir: &Path,
    platform: Platform,
    environment: Environment,
) -> Result<DeploymentResult, DeployError> {
    ensure_cli(project_dir, platform).await?;

    let args: &[&str] = match (platform, environment) {
        (Platform::Vercel, Environment::Production) => &["--prod"],
        (Platform::Vercel, Environment::Staging) => &[],
        (Platform::Netlify, Environment::Production) => &["deploy", "--prod"],
        (Platform::Netlify, Environment::Staging) => &["deploy"],
    };

    tracing::info!(%platform, %environment, "deploying");
    let output = command::run(platform.cli(), args, project_dir).await?;
    parse_deploy_output(&output, platform)
}

/// Best-effort custom domain configuration. Failure logs guidance and
/// never aborts the pipeline.
pub async fn configure_domain(project_dir: &Path, platform: Platform, domain: &str) {
    let result = match platform {
        Platform::Vercel => {
            command::run("vercel", &["domains", "add", domain], project_dir).await
        }
        Platform::Netlify => {
            let site_name = domain.replace('.', "-");
            command::run(
                "netlify",
                &["sites:update", "--name", &site_name],
                project_dir,
            )
            .await
        }
    };

    match result {
        Ok(_) => tracing::info!(domain, %platform, "custom domain configured"),
        Err(err) => {
            tracing::warn!(domain, %err, "domain configuration failed");
            tracing::warn!("configure the domain manually in the {platform} dashboard");
        }
    }
}

async fn ensure_cli(project_dir: &Path, platform: Platform) -> Result<(), DeployError> {
    command::run(platform.cli(), &["--version"], project_dir)
        .await
        .map_err(|_| DeployError::CliMissing {
            cli: platform.cli(),
            install_hint: platform.install_hint(),
        })?;
    Ok(())
}

fn parse_deploy_output(
    output: &str,
    platform: Platform,
) -> Result<DeploymentResult, DeployError> {
    let url_re = Regex::new(r"https://\S+").expect("valid URL regex");
    let url = url_re
        .find(output)
        .map(|m| m.as_str().to_owned())
        .ok_or_else(|| DeployError::MissingDeploymentUrl {
            platform: platform.to_string(),
        })?;

    Ok(DeploymentResult {
        url,
        deployment_id: extract_deployment_id(output, platform),
        platform: platform.to_string(),
        url_confidence: UrlConfidence::StdoutScrape,
    })
}

fn extract_deployment_id(output: &str, platform: Platform) -> Option<String> {
    let pattern = match platform {
        Platform::Vercel => r"https://([^.\s]+)\.vercel\.app",
        Platform::Netlify => r"https://([^.\s]+)\.netlify\.app",
    };
    let re = Regex::new(pattern).expect("valid deployment id regex");
    re.captures(output).map(|c| c[1].to_owned())
}
