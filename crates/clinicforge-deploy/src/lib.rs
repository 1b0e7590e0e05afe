//! Deployment pipeline for customized clinic sites.
//!
//! Validates a generated project, prepares platform configuration, builds
//! it, and ships it through the Vercel or Netlify CLI, finishing with
//! warning-only smoke tests and a written report.

pub mod build;
pub mod env_setup;
pub mod error;
pub mod fsutil;
pub mod pipeline;
pub mod platform;
pub mod report;
pub mod smoke;
pub mod types;
pub mod validate;

mod command;
mod git;

pub use error::DeployError;
pub use pipeline::Deployer;
pub use smoke::SmokeTester;
pub use types::{DeployOptions, DeployOutcome, Environment, Platform, SmokeCheck};
