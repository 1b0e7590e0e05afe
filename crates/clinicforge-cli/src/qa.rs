//! `qa` command: run the quality audit and gate on the score.

use anyhow::bail;

use clinicforge_qa::report::{self, SCORE_EXCELLENT, SCORE_GOOD};
use clinicforge_qa::QualityAssurance;

use crate::QaArgs;

pub(crate) async fn run(args: QaArgs) -> anyhow::Result<()> {
    let audit = QualityAssurance::new(args.project_path, args.report_level)?;
    let outcome = audit.run().await;

    let report_dir = report::write_reports(audit.project_dir(), &outcome, args.report_level)?;

    println!(
        "Quality score: {}/100 ({}/{} checks passed)",
        outcome.score, outcome.passed_tests, outcome.total_tests
    );
    println!("Reports written to {}", report_dir.display());

    if outcome.score >= SCORE_EXCELLENT {
        println!("Site is ready for deployment");
    } else if outcome.score >= SCORE_GOOD {
        tracing::warn!(
            issues = outcome.issues.len(),
            "site passed the gate with issues, review before deploying"
        );
    } else {
        bail!(
            "quality score {} is below the deployment threshold of {SCORE_GOOD}",
            outcome.score
        );
    }

    Ok(())
}
