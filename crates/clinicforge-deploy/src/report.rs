//! Deployment report generation.
//!
//! Success writes `deployment-report.json` plus `DEPLOYMENT-REPORT.md`
//! into `deployment-reports/` under the project; failure writes
//! `deployment-failure.json` with troubleshooting suggestions instead.

use std::path::{Path, PathBuf};

use clinicforge_core::{report as core_report, CheckStatus};
use serde::Serialize;

use crate::error::DeployError;
use crate::types::{DeployOutcome, Environment, Platform};

pub const REPORT_DIR: &str = "deployment-reports";

#[derive(Serialize)]
struct DeploymentReport<'a> {
    timestamp: String,
    #[serde(flatten)]
    outcome: &'a DeployOutcome,
    next_steps: Vec<String>,
}

/// Writes the success report pair.
///
/// # Errors
///
/// Returns `DeployError::Report` when a report file cannot be written.
pub fn write_reports(project_dir: &Path, outcome: &DeployOutcome) -> Result<PathBuf, DeployError> {
    let report_dir = project_dir.join(REPORT_DIR);
    let report = DeploymentReport {
        timestamp: chrono::Utc::now().to_rfc3339(),
        outcome,
        next_steps: next_steps(outcome),
    };

    core_report::write_json(&report_dir, "deployment-report.json", &report)?;
    core_report::write_markdown(
        &report_dir,
        "DEPLOYMENT-REPORT.md",
        &render_markdown(&report),
    )?;

    tracing::info!(dir = %report_dir.display(), "deployment report saved");
    Ok(report_dir)
}

fn next_steps(outcome: &DeployOutcome) -> Vec<String> {
    let mut steps = vec![
        format!("Site is live at: {}", outcome.result.url),
        "Test the site on mobile devices".to_owned(),
        "Test all contact forms and booking integration".to_owned(),
        "Set up Google Analytics tracking".to_owned(),
        "Submit sitemap to Google Search Console".to_owned(),
    ];
    if let Some(domain) = &outcome.domain {
        steps.push(format!("Verify custom domain: https://{domain}"));
        steps.push("Update DNS records if needed".to_owned());
    }
    if outcome
        .smoke_checks
        .iter()
        .any(|c| c.status != CheckStatus::Pass)
    {
        steps.push("Address failed post-deployment checks".to_owned());
    }
    steps
}

fn render_markdown(report: &DeploymentReport<'_>) -> String {
    let outcome = report.outcome;
    let passed = outcome
        .smoke_checks
        .iter()
        .filter(|c| c.status == CheckStatus::Pass)
        .count();

    let mut md = String::new();
    md.push_str("# Deployment Report\n\n## Summary\n");
    md.push_str(&format!("- **Deployment Date**: {}\n", report.timestamp));
    md.push_str(&format!("- **Platform**: {}\n", outcome.result.platform));
    md.push_str(&format!(
        "- **Live URL**: [{url}]({url})\n",
        url = outcome.result.url
    ));
    md.push_str(&format!(
        "- **Custom Domain**: {}\n",
        outcome.domain.as_deref().unwrap_or("Not configured")
    ));

    md.push_str("\n## Deployment Status: SUCCESS\n");

    md.push_str(&format!(
        "\n## Post-Deployment Checks\n**Score: {passed}/{} passed**\n\n",
        outcome.smoke_checks.len()
    ));
    for check in &outcome.smoke_checks {
        let marker = if check.status == CheckStatus::Pass {
            "[x]"
        } else {
            "[!]"
        };
        match &check.details {
            Some(details) => md.push_str(&format!("- {marker} **{}**: {details}\n", check.name)),
            None => md.push_str(&format!("- {marker} **{}**\n", check.name)),
        }
    }

    md.push_str("\n## Next Steps\n");
    for step in &report.next_steps {
        md.push_str(&format!("- [ ] {step}\n"));
    }

    md.push_str("\n## Validation Log\n");
    for line in &outcome.validation_log {
        md.push_str(&format!("- {line}\n"));
    }

    md
}

#[derive(Serialize)]
struct FailureReport {
    timestamp: String,
    error: String,
    platform: Platform,
    environment: Environment,
    logs: Vec<String>,
    troubleshooting: Vec<String>,
}

/// Writes `deployment-failure.json` for a failed run. Report write
/// failures are logged and swallowed so the original error survives.
pub fn write_failure_report(
    project_dir: &Path,
    error: &DeployError,
    platform: Platform,
    environment: Environment,
    logs: Vec<String>,
) -> Vec<String> {
    let troubleshooting = troubleshooting_steps(error);
    let report = FailureReport {
        timestamp: chrono::Utc::now().to_rfc3339(),
        error: error.to_string(),
        platform,
        environment,
        logs,
        troubleshooting: troubleshooting.clone(),
    };

    let report_dir = project_dir.join(REPORT_DIR);
    if let Err(write_err) =
        core_report::write_json(&report_dir, "deployment-failure.json", &report)
    {
        tracing::warn!(%write_err, "could not save failure report");
    } else {
        tracing::info!(dir = %report_dir.display(), "failure report saved for analysis");
    }

    troubleshooting
}

/// Generic recovery steps plus extras keyed by substrings of the error
/// message.
#[must_use]
pub fn troubleshooting_steps(error: &DeployError) -> Vec<String> {
    let message = error.to_string();
    let mut steps = vec![
        "Check all required files are present in the project directory".to_owned(),
        "Verify package.json has correct build and start scripts".to_owned(),
        "Ensure all dependencies are installed (npm install)".to_owned(),
        "Test local build (npm run build)".to_owned(),
        "Check for any remaining placeholder content".to_owned(),
    ];

    if message.contains("build") {
        steps.push("Review build logs for specific error details".to_owned());
        steps.push("Check Next.js configuration file".to_owned());
    }
    if message.contains("vercel") || message.contains("netlify") {
        steps.push("Verify CLI tool is installed and authenticated".to_owned());
        steps.push("Check platform-specific configuration files".to_owned());
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinicforge_core::{DeploymentResult, UrlConfidence};
    use crate::types::SmokeCheck;
    use tempfile::tempdir;

    fn sample_outcome() -> DeployOutcome {
        DeployOutcome {
            result: DeploymentResult {
                url: "https://acme-site.vercel.app".to_owned(),
                deployment_id: Some("acme-site".to_owned()),
                platform: "vercel".to_owned(),
                url_confidence: UrlConfidence::StdoutScrape,
            },
            domain: Some("acme.co.uk".to_owned()),
            smoke_checks: vec![
                SmokeCheck {
                    name: "Site accessibility",
                    status: CheckStatus::Pass,
                    details: None,
                },
                SmokeCheck {
                    name: "SEO basics",
                    status: CheckStatus::Warning,
                    details: Some("h1 heading missing".to_owned()),
                },
            ],
            validation_log: vec!["Project directory exists: passed".to_owned()],
        }
    }

    #[test]
    fn write_reports_emits_json_and_markdown() {
        let dir = tempdir().expect("tempdir");
        let report_dir = write_reports(dir.path(), &sample_outcome()).expect("write");
        assert!(report_dir.join("deployment-report.json").is_file());

        let md = std::fs::read_to_string(report_dir.join("DEPLOYMENT-REPORT.md")).expect("read");
        assert!(md.contains("**Score: 1/2 passed**"));
        assert!(md.contains("Verify custom domain: https://acme.co.uk"));
        assert!(md.contains("Address failed post-deployment checks"));
    }

    #[test]
    fn troubleshooting_adds_build_steps_for_build_errors() {
        let err = DeployError::Command {
            command: "npm run build".to_owned(),
            output: "type error".to_owned(),
        };
        let steps = troubleshooting_steps(&err);
        assert!(steps.iter().any(|s| s.contains("Review build logs")));
    }

    #[test]
    fn troubleshooting_adds_cli_steps_for_platform_errors() {
        let err = DeployError::CliMissing {
            cli: "vercel",
            install_hint: "npm i -g vercel",
        };
        let steps = troubleshooting_steps(&err);
        assert!(steps
            .iter()
            .any(|s| s.contains("CLI tool is installed and authenticated")));
    }

    #[test]
    fn failure_report_written_to_disk() {
        let dir = tempdir().expect("tempdir");
        let err = DeployError::MissingDeploymentUrl {
            platform: "vercel".to_owned(),
        };
        write_failure_report(
            dir.path(),
            &err,
            Platform::Vercel,
            Environment::Production,
            vec!["Package.json exists: passed".to_owned()],
        );
        let content = std::fs::read_to_string(
            dir.path().join(REPORT_DIR).join("deployment-failure.json"),
        )
        .expect("read");
        assert!(content.contains("could not extract deployment URL"));
        assert!(content.contains("Package.json exists: passed"));
    }
}
