//! Template customization: copy, placeholder substitution, verification,
//! and report rendering.

pub mod agent;
pub mod error;
pub mod placeholders;
pub mod report;
pub mod verify;

pub use agent::{output_dir_name, review_items, CustomizationAgent, CustomizationOutcome};
pub use error::CustomizeError;
pub use report::{write_reports, CustomizationReport};
pub use verify::verify;
