//! Quality gate result types.

use std::fmt;
use std::str::FromStr;

use clinicforge_core::CheckStatus;
use serde::Serialize;

use crate::error::QaError;

/// How much detail the markdown report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLevel {
    Basic,
    #[default]
    Detailed,
    Comprehensive,
}

impl FromStr for ReportLevel {
    type Err = QaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(ReportLevel::Basic),
            "detailed" => Ok(ReportLevel::Detailed),
            "comprehensive" => Ok(ReportLevel::Comprehensive),
            other => Err(QaError::UnknownReportLevel(other.to_owned())),
        }
    }
}

/// What a single check concluded, before it is attached to a name and
/// category.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub status: CheckStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl CheckOutcome {
    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Pass, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Warning, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Fail, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Info, message)
    }

    /// A check that could not run at all, usually an unreadable file.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Error, message)
    }

    fn new(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: Vec::new(),
            recommendation: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    #[must_use]
    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }
}

/// One named check with its outcome.
#[derive(Debug, Clone, Serialize)]
pub struct NamedCheck {
    pub name: &'static str,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

impl NamedCheck {
    #[must_use]
    pub fn new(name: &'static str, outcome: CheckOutcome) -> Self {
        Self { name, outcome }
    }
}

/// All checks from one category, with the pass tally the score uses.
#[derive(Debug, Serialize)]
pub struct CategoryResult {
    pub category: &'static str,
    pub tests: Vec<NamedCheck>,
    pub passed: usize,
    pub total: usize,
}

impl CategoryResult {
    #[must_use]
    pub fn new(category: &'static str, tests: Vec<NamedCheck>) -> Self {
        let passed = tests
            .iter()
            .filter(|t| t.outcome.status == CheckStatus::Pass)
            .count();
        let total = tests.len();
        Self {
            category,
            tests,
            passed,
            total,
        }
    }
}

/// Issue severity. `Fail` checks become high, `Warning` checks medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub category: &'static str,
    pub test: &'static str,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub category: &'static str,
    pub test: &'static str,
    pub recommendation: String,
}

/// What one full quality gate run produced.
#[derive(Debug, Serialize)]
pub struct QaOutcome {
    pub score: u8,
    pub total_tests: usize,
    pub passed_tests: usize,
    pub categories: Vec<CategoryResult>,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<Recommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_level_parses_known_names() {
        assert_eq!(
            "comprehensive".parse::<ReportLevel>().ok(),
            Some(ReportLevel::Comprehensive)
        );
        assert!("verbose".parse::<ReportLevel>().is_err());
    }

    #[test]
    fn category_result_counts_only_passes() {
        let result = CategoryResult::new(
            "Code Quality",
            vec![
                NamedCheck::new("a", CheckOutcome::pass("ok")),
                NamedCheck::new("b", CheckOutcome::warning("hmm")),
                NamedCheck::new("c", CheckOutcome::info("fyi")),
            ],
        );
        assert_eq!(result.passed, 1);
        assert_eq!(result.total, 3);
    }
}
