//! Quality gate report generation.
//!
//! Writes `qa-report.json` and `QA-REPORT.md` into `qa-reports/` under
//! the audited project. The markdown detail is governed by the
//! requested [`ReportLevel`].

use std::path::{Path, PathBuf};

use clinicforge_core::report as core_report;
use serde::Serialize;

use crate::error::QaError;
use crate::types::{QaOutcome, ReportLevel, Severity};

pub const REPORT_DIR: &str = "qa-reports";

/// A score at or above this means the site is ready to deploy.
pub const SCORE_EXCELLENT: u8 = 90;
/// A score at or above this passes the gate with review.
pub const SCORE_GOOD: u8 = 70;

#[derive(Serialize)]
struct QaReport<'a> {
    timestamp: String,
    report_level: ReportLevel,
    #[serde(flatten)]
    outcome: &'a QaOutcome,
}

/// Writes the report pair and returns the report directory.
///
/// # Errors
///
/// Returns `QaError::Report` when a report file cannot be written.
pub fn write_reports(
    project_dir: &Path,
    outcome: &QaOutcome,
    level: ReportLevel,
) -> Result<PathBuf, QaError> {
    let report_dir = project_dir.join(REPORT_DIR);
    let report = QaReport {
        timestamp: chrono::Utc::now().to_rfc3339(),
        report_level: level,
        outcome,
    };

    core_report::write_json(&report_dir, "qa-report.json", &report)?;
    core_report::write_markdown(&report_dir, "QA-REPORT.md", &render_markdown(&report))?;

    tracing::info!(dir = %report_dir.display(), "quality report saved");
    Ok(report_dir)
}

fn render_markdown(report: &QaReport<'_>) -> String {
    let outcome = report.outcome;
    let mut md = String::new();

    md.push_str("# Quality Assurance Report\n\n## Summary\n");
    md.push_str(&format!("- **Audit Date**: {}\n", report.timestamp));
    md.push_str(&format!("- **Overall Score**: {}/100\n", outcome.score));
    md.push_str(&format!(
        "- **Tests Passed**: {}/{}\n",
        outcome.passed_tests, outcome.total_tests
    ));
    md.push_str(&format!("- **Verdict**: {}\n", verdict(outcome.score)));

    if report.report_level != ReportLevel::Basic {
        md.push_str("\n## Category Breakdown\n");
        for category in &outcome.categories {
            let percent = if category.total == 0 {
                0
            } else {
                category.passed * 100 / category.total
            };
            md.push_str(&format!(
                "- **{}**: {}/{} passed ({percent}%)\n",
                category.category, category.passed, category.total
            ));
        }
    }

    md.push_str("\n## High Priority Issues\n");
    push_issues(&mut md, outcome, Severity::High);
    md.push_str("\n## Medium Priority Issues\n");
    push_issues(&mut md, outcome, Severity::Medium);

    if report.report_level == ReportLevel::Comprehensive {
        md.push_str("\n## Recommendations\n");
        if outcome.recommendations.is_empty() {
            md.push_str("None\n");
        } else {
            for (i, rec) in outcome.recommendations.iter().enumerate() {
                md.push_str(&format!(
                    "{}. **{} / {}**: {}\n",
                    i + 1,
                    rec.category,
                    rec.test,
                    rec.recommendation
                ));
            }
        }

        md.push_str("\n## Manual Testing Checklist\n");
        for item in MANUAL_CHECKLIST {
            md.push_str(&format!("- [ ] {item}\n"));
        }
    }

    md.push_str("\n## Next Steps\n");
    for step in next_steps(outcome.score) {
        md.push_str(&format!("- {step}\n"));
    }

    md
}

fn push_issues(md: &mut String, outcome: &QaOutcome, severity: Severity) {
    let mut any = false;
    for issue in outcome.issues.iter().filter(|i| i.severity == severity) {
        any = true;
        md.push_str(&format!(
            "- **{} / {}**: {}\n",
            issue.category, issue.test, issue.message
        ));
        for detail in &issue.details {
            md.push_str(&format!("  - {detail}\n"));
        }
    }
    if !any {
        md.push_str("None\n");
    }
}

fn verdict(score: u8) -> &'static str {
    if score >= SCORE_EXCELLENT {
        "Excellent"
    } else if score >= SCORE_GOOD {
        "Good"
    } else {
        "Needs Improvement"
    }
}

fn next_steps(score: u8) -> Vec<String> {
    if score >= SCORE_EXCELLENT {
        vec![
            "Site is ready for deployment".to_owned(),
            "Run the deployment pipeline".to_owned(),
            "Complete the manual testing checklist after launch".to_owned(),
        ]
    } else if score >= SCORE_GOOD {
        vec![
            "Address high priority issues before deployment".to_owned(),
            "Review medium priority issues".to_owned(),
            "Re-run the quality audit after fixes".to_owned(),
        ]
    } else {
        vec![
            "Site is not ready for deployment".to_owned(),
            "Fix all high priority issues".to_owned(),
            "Verify the customization completed correctly".to_owned(),
            "Re-run the quality audit after fixes".to_owned(),
        ]
    }
}

const MANUAL_CHECKLIST: &[&str] = &[
    "Test contact form submission end to end",
    "Verify booking link opens the clinic's booking page",
    "Check the site on a real mobile device",
    "Confirm phone number click-to-call works",
    "Review all images for placeholder content",
    "Verify Google Maps location is correct",
];
