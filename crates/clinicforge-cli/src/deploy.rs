//! `deploy` command: validation, build, hosting CLI deploy, smoke tests.

use clinicforge_core::CheckStatus;
use clinicforge_deploy::{DeployOptions, Deployer};

use crate::DeployArgs;

pub(crate) async fn run(args: DeployArgs) -> anyhow::Result<()> {
    let options = DeployOptions {
        platform: args.platform,
        environment: args.environment,
        domain: args.domain,
        git_repo: args.git_repo,
    };

    let deployer = Deployer::new(args.project_path, options)?;
    let outcome = deployer.deploy().await?;

    println!("Deployed to {}", outcome.result.url);
    if let Some(domain) = &outcome.domain {
        println!("Custom domain: https://{domain}");
    }

    let passed = outcome
        .smoke_checks
        .iter()
        .filter(|c| c.status == CheckStatus::Pass)
        .count();
    println!(
        "Post-deployment checks: {passed}/{} passed",
        outcome.smoke_checks.len()
    );
    for check in outcome
        .smoke_checks
        .iter()
        .filter(|c| c.status != CheckStatus::Pass)
    {
        match &check.details {
            Some(details) => println!("  ! {}: {details}", check.name),
            None => println!("  ! {}", check.name),
        }
    }

    Ok(())
}
