//! Deployment state machine.
//!
//! Stages run strictly in order: validate, environment setup, build, git,
//! platform deploy, smoke tests, optional domain config, report. The first
//! error aborts the remaining stages and writes the failure report; there
//! is no per-stage retry. Partial progress stays on disk for inspection.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;

use crate::error::DeployError;
use crate::report;
use crate::smoke::SmokeTester;
use crate::types::{DeployOptions, DeployOutcome};
use crate::{build, env_setup, git, platform, validate};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs the full deployment pipeline for one project directory.
pub struct Deployer {
    project_dir: PathBuf,
    options: DeployOptions,
    http: Client,
}

impl Deployer {
    /// # Errors
    ///
    /// Returns the `reqwest` builder error when the HTTP client cannot be
    /// constructed.
    pub fn new(project_dir: PathBuf, options: DeployOptions) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent("clinicforge/0.1 (site-automation)")
            .build()?;
        Ok(Self {
            project_dir,
            options,
            http,
        })
    }

    /// Runs every stage and writes the deployment report.
    ///
    /// On failure the error is returned after
    /// `deployment-reports/deployment-failure.json` is written with
    /// troubleshooting suggestions.
    ///
    /// # Errors
    ///
    /// The first stage error encountered, unchanged.
    pub async fn deploy(&self) -> Result<DeployOutcome, DeployError> {
        tracing::info!(
            project = %self.project_dir.display(),
            platform = %self.options.platform,
            environment = %self.options.environment,
            "starting deployment"
        );

        let mut log = Vec::new();
        match self.run_stages(&mut log).await {
            Ok(outcome) => {
                report::write_reports(&self.project_dir, &outcome)?;
                tracing::info!(url = %outcome.result.url, "deployment completed successfully");
                Ok(outcome)
            }
            Err(err) => {
                tracing::error!(%err, "deployment failed");
                let suggestions = report::write_failure_report(
                    &self.project_dir,
                    &err,
                    self.options.platform,
                    self.options.environment,
                    log,
                );
                for suggestion in suggestions {
                    tracing::warn!(suggestion, "troubleshooting");
                }
                Err(err)
            }
        }
    }

    async fn run_stages(&self, log: &mut Vec<String>) -> Result<DeployOutcome, DeployError> {
        tracing::info!("step 1: pre-deployment validation");
        let package_json = validate::run(&self.project_dir, log)?;

        tracing::info!("step 2: setting up deployment environment");
        let project_name = package_json["name"]
            .as_str()
            .unwrap_or("clinic-site")
            .to_owned();
        env_setup::setup(
            &self.project_dir,
            self.options.platform,
            &project_name,
            self.options.domain.as_deref(),
        )?;

        tracing::info!("step 3: optimizing build");
        build::run(&self.project_dir).await?;

        tracing::info!("step 4: setting up git repository");
        git::setup(&self.project_dir, self.options.git_repo.as_deref()).await?;

        tracing::info!("step 5: deploying to platform");
        let result = platform::deploy(
            &self.project_dir,
            self.options.platform,
            self.options.environment,
        )
        .await?;

        tracing::info!("step 6: running post-deployment tests");
        let smoke_checks = SmokeTester::new(self.http.clone()).run(&result.url).await;

        if let Some(domain) = self.options.domain.as_deref() {
            tracing::info!("step 7: configuring custom domain");
            platform::configure_domain(&self.project_dir, self.options.platform, domain).await;
        }

        Ok(DeployOutcome {
            result,
            domain: self.options.domain.clone(),
            smoke_checks,
            validation_log: log.clone(),
        })
    }
}
