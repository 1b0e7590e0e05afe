//! Deployment options and outcome types.

use std::fmt;
use std::str::FromStr;

use clinicforge_core::{CheckStatus, DeploymentResult};
use serde::{Deserialize, Serialize};

use crate::error::DeployError;

/// Supported hosting platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Vercel,
    Netlify,
}

impl Platform {
    /// CLI program name on PATH.
    #[must_use]
    pub fn cli(self) -> &'static str {
        match self {
            Platform::Vercel => "vercel",
            Platform::Netlify => "netlify",
        }
    }

    #[must_use]
    pub fn install_hint(self) -> &'static str {
        match self {
            Platform::Vercel => "npm i -g vercel",
            Platform::Netlify => "npm i -g netlify-cli",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Vercel => write!(f, "vercel"),
            Platform::Netlify => write!(f, "netlify"),
        }
    }
}

impl FromStr for Platform {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vercel" => Ok(Platform::Vercel),
            "netlify" => Ok(Platform::Netlify),
            other => Err(DeployError::UnsupportedPlatform(other.to_owned())),
        }
    }
}

/// Deployment target environment. Staging uses the platform's preview
/// deploy command instead of the production one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Staging,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Staging => write!(f, "staging"),
        }
    }
}

/// How one deployment run is configured.
#[derive(Debug, Clone)]
pub struct DeployOptions {
    pub platform: Platform,
    pub environment: Environment,
    pub domain: Option<String>,
    pub git_repo: Option<String>,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            platform: Platform::Vercel,
            environment: Environment::Production,
            domain: None,
            git_repo: None,
        }
    }
}

/// One post-deployment smoke test result. Failures are `Warning`, never
/// `Fail`: smoke tests inform, the CLI step alone decides deploy success.
#[derive(Debug, Clone, Serialize)]
pub struct SmokeCheck {
    pub name: &'static str,
    pub status: CheckStatus,
    pub details: Option<String>,
}

/// What a successful deployment run produced.
#[derive(Debug, Serialize)]
pub struct DeployOutcome {
    pub result: DeploymentResult,
    pub domain: Option<String>,
    pub smoke_checks: Vec<SmokeCheck>,
    pub validation_log: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_parses_known_names() {
        assert_eq!("vercel".parse::<Platform>().ok(), Some(Platform::Vercel));
        assert_eq!("netlify".parse::<Platform>().ok(), Some(Platform::Netlify));
        assert!("heroku".parse::<Platform>().is_err());
    }

    #[test]
    fn environment_defaults_to_production() {
        assert_eq!(Environment::default(), Environment::Production);
    }
}
