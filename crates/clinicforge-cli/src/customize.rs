//! `customize` command: extract clinic data from a live site, then stamp
//! it into a copy of the template.

use anyhow::Context;

use clinicforge_customize::{CustomizationAgent, CustomizationReport};
use clinicforge_extract::{Extractor, FirecrawlClient};

use crate::CustomizeArgs;

pub(crate) async fn run(args: CustomizeArgs) -> anyhow::Result<()> {
    let config = clinicforge_core::load_app_config()?;

    let api_key = args
        .firecrawl_key
        .or(config.firecrawl_api_key)
        .context("no Firecrawl API key: pass --firecrawl-key or set FIRECRAWL_API_KEY")?;
    let template = args.template.unwrap_or(config.template_path);
    let output = args.output.unwrap_or(config.output_path);

    let client = FirecrawlClient::new(&api_key, config.http_timeout_secs, &config.user_agent)?;
    let outcome = Extractor::new(client).extract(&args.url).await?;

    println!(
        "Extracted clinic data from {} ({}% complete)",
        args.url,
        outcome.clinic_data.data_completeness()
    );

    let agent = CustomizationAgent::new(template, output);
    let result = agent.customize(&outcome.clinic_data, args.name.as_deref())?;

    let total_changes: usize = result.changes.iter().map(|c| c.changes).sum();
    println!(
        "Customized site written to {} ({} substitutions across {} files)",
        result.output_dir.display(),
        total_changes,
        result.changes.len()
    );

    let quality_checks = clinicforge_customize::verify(&result.output_dir);
    let report = CustomizationReport::new(
        &outcome.clinic_data,
        &result.changes,
        &result.manual_review,
        &quality_checks,
    );
    let report_dir = clinicforge_customize::write_reports(&result.output_dir, &report)?;
    println!("Reports written to {}", report_dir.display());

    if !result.manual_review.is_empty() {
        println!("\nManual review required:");
        for item in &result.manual_review {
            println!("  [{:?}] {}: {}", item.priority, item.field, item.message);
        }
    }

    Ok(())
}
