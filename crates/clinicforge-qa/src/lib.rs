//! Quality gate for customized clinic sites.
//!
//! Audits a generated project across eight categories, scores it by the
//! unweighted pass ratio, and writes a machine and human readable
//! report pair into `qa-reports/`.

pub mod checks;
pub mod error;
pub mod report;
pub mod runner;
pub mod types;

mod command;
mod fsutil;

pub use error::QaError;
pub use runner::QualityAssurance;
pub use types::{
    CategoryResult, CheckOutcome, Issue, NamedCheck, QaOutcome, Recommendation, ReportLevel,
    Severity,
};
