pub mod app_config;
pub mod config;
pub mod report;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use report::ReportError;
pub use types::{
    BrandVoice, BrandingInfo, BusinessInfo, CheckStatus, ClinicData, ColorScheme, ContactInfo,
    Coordinates, CustomizationChange, DeploymentResult, LocationInfo, ManualReviewItem,
    PricingSummary, Priority, QualityCheck, ReviewSummary, ServiceInfo, SocialProof, TeamInfo,
    TeamMember, Testimonial, Tone, UrlConfidence,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
