use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use clinicforge_deploy::{Environment, Platform};
use clinicforge_qa::ReportLevel;

mod customize;
mod deploy;
mod qa;

#[derive(Debug, Parser)]
#[command(name = "clinicforge")]
#[command(about = "White-label clinic site pipeline: extract, customize, deploy, audit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape a clinic website and customize the template with its data.
    Customize(CustomizeArgs),
    /// Validate, build, and deploy a customized site.
    Deploy(DeployArgs),
    /// Run the quality audit against a customized site.
    Qa(QaArgs),
}

#[derive(Debug, Args)]
struct CustomizeArgs {
    /// Clinic website URL to extract data from.
    #[arg(long)]
    url: String,

    /// Override the clinic name used for the output directory.
    #[arg(long)]
    name: Option<String>,

    /// Template directory (defaults to CLINICFORGE_TEMPLATE_PATH).
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output root directory (defaults to CLINICFORGE_OUTPUT_PATH).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Firecrawl API key (defaults to FIRECRAWL_API_KEY).
    #[arg(long)]
    firecrawl_key: Option<String>,
}

#[derive(Debug, Args)]
struct DeployArgs {
    /// Customized project directory to deploy.
    project_path: PathBuf,

    #[arg(long, default_value = "vercel")]
    platform: Platform,

    /// Custom domain to attach after deployment.
    #[arg(long)]
    domain: Option<String>,

    #[arg(long, default_value = "production", value_parser = parse_environment)]
    environment: Environment,

    /// Git remote to add as origin before deploying.
    #[arg(long)]
    git_repo: Option<String>,
}

#[derive(Debug, Args)]
struct QaArgs {
    /// Customized project directory to audit.
    project_path: PathBuf,

    #[arg(long, default_value = "detailed")]
    report_level: ReportLevel,
}

fn parse_environment(s: &str) -> Result<Environment, String> {
    match s {
        "production" => Ok(Environment::Production),
        "staging" => Ok(Environment::Staging),
        other => Err(format!("unknown environment '{other}', expected production or staging")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Customize(args) => customize::run(args).await,
        Commands::Deploy(args) => deploy::run(args).await,
        Commands::Qa(args) => qa::run(args).await,
    }
}
