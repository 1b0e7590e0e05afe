//! Runs all eight audit categories against a project and scores the result.

use std::path::{Path, PathBuf};

use clinicforge_core::CheckStatus;
use tracing::{info, warn};

use crate::checks;
use crate::error::QaError;
use crate::types::{CategoryResult, Issue, QaOutcome, Recommendation, ReportLevel, Severity};

pub struct QualityAssurance {
    project_dir: PathBuf,
    pub report_level: ReportLevel,
}

impl QualityAssurance {
    /// # Errors
    ///
    /// Fails when `project_dir` is not an existing directory.
    pub fn new(project_dir: impl Into<PathBuf>, report_level: ReportLevel) -> Result<Self, QaError> {
        let project_dir = project_dir.into();
        if !project_dir.is_dir() {
            return Err(QaError::ProjectNotFound(project_dir));
        }
        Ok(Self {
            project_dir,
            report_level,
        })
    }

    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Runs every category and aggregates the quality gate outcome. The
    /// score is the unweighted pass ratio across all checks.
    pub async fn run(&self) -> QaOutcome {
        info!(project = %self.project_dir.display(), "starting quality audit");
        let project = self.project_dir.as_path();

        let categories = vec![
            CategoryResult::new("Code Quality", checks::code_quality::checks(project).await),
            CategoryResult::new("Content Validation", checks::content::checks(project)),
            CategoryResult::new("Performance", checks::performance::checks(project).await),
            CategoryResult::new("SEO", checks::seo::checks(project)),
            CategoryResult::new("Accessibility", checks::accessibility::checks(project)),
            CategoryResult::new("Security", checks::security::checks(project).await),
            CategoryResult::new("Cross-Platform", checks::cross_platform::checks(project)),
            CategoryResult::new("Integration", checks::integration::checks(project)),
        ];

        let outcome = score(categories);
        info!(
            score = outcome.score,
            passed = outcome.passed_tests,
            total = outcome.total_tests,
            issues = outcome.issues.len(),
            "quality audit complete"
        );
        for issue in outcome.issues.iter().filter(|i| i.severity == Severity::High) {
            warn!(category = issue.category, test = issue.test, "{}", issue.message);
        }
        outcome
    }
}

/// Failed checks become high-severity issues, warnings medium. Checks
/// that errored out count against the score but are not issues, since
/// they say nothing about the site itself.
fn score(categories: Vec<CategoryResult>) -> QaOutcome {
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();
    let mut total_tests = 0usize;
    let mut passed_tests = 0usize;

    for category in &categories {
        total_tests += category.total;
        passed_tests += category.passed;
        for check in &category.tests {
            let severity = match check.outcome.status {
                CheckStatus::Fail => Some(Severity::High),
                CheckStatus::Warning => Some(Severity::Medium),
                CheckStatus::Pass | CheckStatus::Info | CheckStatus::Error => None,
            };
            if let Some(severity) = severity {
                issues.push(Issue {
                    category: category.category,
                    test: check.name,
                    severity,
                    message: check.outcome.message.clone(),
                    details: check.outcome.details.clone(),
                });
            }
            if let Some(recommendation) = &check.outcome.recommendation {
                recommendations.push(Recommendation {
                    category: category.category,
                    test: check.name,
                    recommendation: recommendation.clone(),
                });
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[allow(clippy::cast_precision_loss)]
    let score = if total_tests == 0 {
        0
    } else {
        (passed_tests as f64 / total_tests as f64 * 100.0).round() as u8
    };

    QaOutcome {
        score,
        total_tests,
        passed_tests,
        categories,
        issues,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CheckOutcome, NamedCheck};

    fn category(name: &'static str, checks: Vec<NamedCheck>) -> CategoryResult {
        CategoryResult::new(name, checks)
    }

    #[test]
    fn score_is_rounded_pass_ratio() {
        let outcome = score(vec![category(
            "Content Validation",
            vec![
                NamedCheck::new("a", CheckOutcome::pass("ok")),
                NamedCheck::new("b", CheckOutcome::pass("ok")),
                NamedCheck::new("c", CheckOutcome::warning("hmm")),
            ],
        )]);
        assert_eq!(outcome.score, 67);
        assert_eq!(outcome.passed_tests, 2);
        assert_eq!(outcome.total_tests, 3);
    }

    #[test]
    fn failures_become_high_issues_and_warnings_medium() {
        let outcome = score(vec![category(
            "Security",
            vec![
                NamedCheck::new("audit", CheckOutcome::fail("3 critical vulnerabilities found")),
                NamedCheck::new("headers", CheckOutcome::warning("No security headers configured")),
            ],
        )]);
        assert_eq!(outcome.issues.len(), 2);
        assert_eq!(outcome.issues[0].severity, Severity::High);
        assert_eq!(outcome.issues[1].severity, Severity::Medium);
    }

    #[test]
    fn errored_checks_lower_score_without_raising_issues() {
        let outcome = score(vec![category(
            "Performance",
            vec![
                NamedCheck::new("build", CheckOutcome::error("build did not run")),
                NamedCheck::new("assets", CheckOutcome::pass("ok")),
            ],
        )]);
        assert_eq!(outcome.score, 50);
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn recommendations_are_collected_across_categories() {
        let outcome = score(vec![
            category(
                "SEO",
                vec![NamedCheck::new(
                    "sitemap",
                    CheckOutcome::warning("placeholder domain").with_recommendation("Set the real domain"),
                )],
            ),
            category(
                "Integration",
                vec![NamedCheck::new(
                    "analytics",
                    CheckOutcome::info("none").with_recommendation("Add analytics"),
                )],
            ),
        ]);
        assert_eq!(outcome.recommendations.len(), 2);
        assert_eq!(outcome.recommendations[0].category, "SEO");
    }

    #[test]
    fn empty_run_scores_zero() {
        assert_eq!(score(Vec::new()).score, 0);
    }
}
