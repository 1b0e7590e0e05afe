//! Shared record types for the extract → customize → validate/deploy pipeline.
//!
//! `ClinicData` is purely derived data: it is rebuilt from scratch on every
//! extraction run and never merged with a prior version. Absence of a field
//! means "not found on the source site", not an error — every field is an
//! `Option` or an empty collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Normalized extraction output and customization input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClinicData {
    pub business: BusinessInfo,
    pub contact: ContactInfo,
    pub location: LocationInfo,
    pub team: TeamInfo,
    pub services: ServiceInfo,
    pub branding: BrandingInfo,
    pub social_proof: SocialProof,
}

impl ClinicData {
    /// Percentage of the six required fields that were populated.
    ///
    /// The fixed checklist is: business name, phone, email, address, city,
    /// and at least one team member. Returns `round(100 * populated / 6)`.
    #[must_use]
    pub fn data_completeness(&self) -> u8 {
        let fields = [
            self.business.name.is_some(),
            self.contact.phone.is_some(),
            self.contact.email.is_some(),
            self.contact.address.is_some(),
            self.location.city.is_some(),
            !self.team.members.is_empty(),
        ];
        let populated = fields.iter().filter(|populated| **populated).count();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pct = (populated as f64 / fields.len() as f64 * 100.0).round() as u8;
        pct
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessInfo {
    pub name: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub years_established: Option<i32>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Digit string, `+44`- or `0`-prefixed, separators stripped.
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// UK postcode shape (e.g. `SW1A 1AA`).
    pub postcode: Option<String>,
    /// The source website URL the data was extracted from.
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationInfo {
    pub city: Option<String>,
    /// Derived from the postcode prefix via a fixed lookup table.
    pub region: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Fallback point used when an address cannot be geocoded.
    pub const LONDON: Coordinates = Coordinates {
        latitude: 51.5074,
        longitude: -0.1278,
    };
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamInfo {
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

/// A single practitioner. Entries without a name are dropped at extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub qualifications: Vec<String>,
    pub bio: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub treatments: Vec<String>,
    pub pricing: Option<PricingSummary>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

/// Summary over every `£<number>` match on the source pages.
///
/// The collection is global: a treatment price and an unrelated
/// currency-formatted number are indistinguishable here. That precision
/// limitation is inherited from the source format, not something the
/// extractor can fix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingSummary {
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub found: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandingInfo {
    pub logo_url: Option<String>,
    pub color_scheme: Option<ColorScheme>,
    pub brand_voice: Option<BrandVoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorScheme {
    pub primary: String,
    /// Up to five distinct hex/rgb values, in first-seen order.
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandVoice {
    pub tone: Tone,
    /// Keyword-occurrence count per tone.
    pub scores: BTreeMap<Tone, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Luxury,
    Friendly,
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tone::Professional => write!(f, "professional"),
            Tone::Luxury => write!(f, "luxury"),
            Tone::Friendly => write!(f, "friendly"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialProof {
    pub reviews: Option<ReviewSummary>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    /// Platform name → handle.
    #[serde(default)]
    pub social_media: BTreeMap<String, String>,
}

/// An ambiguous `N stars` / `N reviews` match is bucketed by magnitude:
/// values of at most 5 are ratings, larger values are review counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub rating: Option<f64>,
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub text: String,
    pub author: String,
}

/// One entry per template file touched during a customization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomizationChange {
    pub file: String,
    pub changes: usize,
    pub description: String,
}

/// A gap or low-confidence value a human must confirm before deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualReviewItem {
    pub kind: String,
    pub field: String,
    pub message: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// Outcome of one individual check. Only `Pass` counts toward the score;
/// `Fail` and `Warning` are tracked with different severities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
    Info,
    Error,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "pass"),
            CheckStatus::Warning => write!(f, "warning"),
            CheckStatus::Fail => write!(f, "fail"),
            CheckStatus::Info => write!(f, "info"),
            CheckStatus::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityCheck {
    pub kind: String,
    pub file: Option<String>,
    pub status: CheckStatus,
    pub message: String,
}

/// Outcome of a platform deploy. The URL is scraped from the hosting CLI's
/// human-readable stdout, so it is always tagged with its provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentResult {
    pub url: String,
    pub deployment_id: Option<String>,
    pub platform: String,
    pub url_confidence: UrlConfidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrlConfidence {
    /// Confirmed via a machine-readable platform response.
    Verified,
    /// First `https://` URL printed by the CLI; may be some other URL the
    /// tool happened to print.
    StdoutScrape,
}
