//! Pre-deployment validation.
//!
//! Six checks run in a fixed order; the first failure aborts the pipeline.
//! Each check appends a line to the validation log that ends up in the
//! deployment report.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{io_err, DeployError};

/// Files scanned for leftover template placeholders.
const CRITICAL_FILES: &[&str] = &[
    "app/layout.tsx",
    "components/Footer.tsx",
    "components/CTASection.tsx",
];

/// More than this many placeholder hits across the critical files means
/// the template was not properly customized.
const MAX_PLACEHOLDERS: usize = 3;

/// Placeholder strings the customization stage is expected to remove.
const PLACEHOLDERS: &[&str] = &[
    "Your Clinic Name",
    "[Your Location]",
    "your-clinic-domain.com",
    "info@leadballoon.co.uk",
];

const NEXT_CONFIG_FILES: &[&str] = &["next.config.js", "next.config.mjs", "next.config.ts"];
const ENV_FILES: &[&str] = &[".env", ".env.local", ".env.production"];
const CRITICAL_DEPS: &[&str] = &["next", "react", "react-dom"];

/// Runs all pre-deployment checks against `project_dir`, appending one
/// line per check to `log`. Lines accumulated before a failure survive
/// into the failure report.
///
/// # Errors
///
/// `DeployError::Validation` naming the first check that failed.
pub fn run(project_dir: &Path, log: &mut Vec<String>) -> Result<Value, DeployError> {
    check_project_directory(project_dir, log)?;
    let package_json = check_package_json(project_dir, log)?;
    check_dependencies(&package_json, log)?;
    check_environment_files(project_dir, log);
    check_build_configuration(project_dir, log)?;
    check_placeholders(project_dir, log)?;
    Ok(package_json)
}

fn fail(check: &str, reason: impl Into<String>) -> DeployError {
    DeployError::Validation {
        check: check.to_owned(),
        reason: reason.into(),
    }
}

fn check_project_directory(project_dir: &Path, log: &mut Vec<String>) -> Result<(), DeployError> {
    if !project_dir.is_dir() {
        return Err(fail(
            "Project directory exists",
            "project path is not a directory",
        ));
    }
    log.push("Project directory exists: passed".to_owned());
    Ok(())
}

fn check_package_json(project_dir: &Path, log: &mut Vec<String>) -> Result<Value, DeployError> {
    let path = project_dir.join("package.json");
    let content = fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    let manifest: Value = serde_json::from_str(&content).map_err(|e| DeployError::Json {
        path: path.clone(),
        source: e,
    })?;

    if manifest["scripts"]["build"].as_str().is_none() {
        return Err(fail(
            "Package.json exists",
            "no build script found in package.json",
        ));
    }
    if manifest["scripts"]["start"].as_str().is_none() {
        return Err(fail(
            "Package.json exists",
            "no start script found in package.json",
        ));
    }
    log.push("Package.json exists: passed".to_owned());
    Ok(manifest)
}

fn check_dependencies(package_json: &Value, log: &mut Vec<String>) -> Result<(), DeployError> {
    for dep in CRITICAL_DEPS {
        let present = package_json["dependencies"][dep].is_string()
            || package_json["devDependencies"][dep].is_string();
        if !present {
            return Err(fail(
                "Required dependencies",
                format!("critical dependency missing: {dep}"),
            ));
        }
    }
    log.push("Required dependencies: passed".to_owned());
    Ok(())
}

/// Env files are advisory. `.env.production` is generated later when
/// absent, so their absence never fails the stage.
fn check_environment_files(project_dir: &Path, log: &mut Vec<String>) {
    match ENV_FILES.iter().find(|f| project_dir.join(f).is_file()) {
        Some(found) => log.push(format!("Environment variables: found {found}")),
        None => {
            tracing::warn!("no environment files found, defaults will be generated");
            log.push("Environment variables: none found, using defaults".to_owned());
        }
    }
}

fn check_build_configuration(project_dir: &Path, log: &mut Vec<String>) -> Result<(), DeployError> {
    match NEXT_CONFIG_FILES
        .iter()
        .find(|f| project_dir.join(f).is_file())
    {
        Some(found) => {
            log.push(format!("Build configuration: found {found}"));
            Ok(())
        }
        None => Err(fail(
            "Build configuration",
            "no Next.js configuration file found",
        )),
    }
}

/// Scans the critical files for leftover placeholders. Unreadable files
/// are skipped; a handful of placeholders is tolerated here because the
/// quality gate reports them separately.
fn check_placeholders(project_dir: &Path, log: &mut Vec<String>) -> Result<(), DeployError> {
    let mut found = 0usize;
    for file in CRITICAL_FILES {
        let path = project_dir.join(file);
        let Ok(content) = fs::read_to_string(&path) else {
            log.push(format!("Content validation: could not read {file}"));
            continue;
        };
        for placeholder in PLACEHOLDERS {
            if content.contains(placeholder) {
                tracing::warn!(file, placeholder, "placeholder still present");
                found += 1;
            }
        }
    }

    if found > MAX_PLACEHOLDERS {
        return Err(fail(
            "Content validation",
            format!("too many placeholders found ({found}), template may not be properly customized"),
        ));
    }
    log.push(format!("Content validation: passed ({found} placeholders)"));
    Ok(())
}
