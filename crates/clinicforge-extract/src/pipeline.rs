//! Extraction pipeline: scrape, map, key pages, structured extract, fallback.
//!
//! The main-page scrape is the only hard dependency. Site mapping degrades
//! to an empty list, key-page scrapes are skipped on failure, and a failed
//! structured extract falls back to the pure regex extractors in
//! [`crate::fields`].

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use clinicforge_core::{ClinicData, Coordinates, TeamMember, Testimonial, Tone};

use crate::client::FirecrawlClient;
use crate::error::ExtractError;
use crate::types::{KeyPages, MediaAssets, ScrapedPage};
use crate::{fields, media};

/// Pause between successive key-page scrapes.
const INTER_REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Path keywords identifying each key page role, most specific first.
const KEY_PAGE_KEYWORDS: &[(&str, &[&str])] = &[
    ("about", &["about", "about-us", "our-story", "who-we-are"]),
    ("team", &["team", "staff", "doctors", "practitioners", "our-team"]),
    ("services", &["services", "treatments", "procedures", "what-we-do"]),
    ("contact", &["contact", "contact-us", "get-in-touch", "location"]),
    ("pricing", &["prices", "pricing", "costs", "fees"]),
];

/// Everything one extraction run produces.
#[derive(Debug)]
pub struct ExtractionOutcome {
    pub clinic_data: ClinicData,
    pub media: MediaAssets,
}

/// Drives one extraction run against a clinic website.
pub struct Extractor {
    client: FirecrawlClient,
    inter_request_delay: Duration,
}

impl Extractor {
    #[must_use]
    pub fn new(client: FirecrawlClient) -> Self {
        Self {
            client,
            inter_request_delay: INTER_REQUEST_DELAY,
        }
    }

    /// Overrides the inter-request delay (tests use zero).
    #[must_use]
    pub fn with_inter_request_delay(mut self, delay: Duration) -> Self {
        self.inter_request_delay = delay;
        self
    }

    /// Extracts a [`ClinicData`] record and media candidates from `url`.
    ///
    /// Missing fields are `None`, never errors; only the main-page scrape
    /// failing (network or API) aborts the run.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] if the main-page scrape fails.
    pub async fn extract(&self, url: &str) -> Result<ExtractionOutcome, ExtractError> {
        tracing::info!(url, "starting clinic data extraction");
        let main_page = self.client.scrape(url).await?;

        let site_map = match self.client.map_site(url).await {
            Ok(urls) => urls,
            Err(error) => {
                tracing::warn!(url, %error, "site mapping failed, continuing without key pages");
                Vec::new()
            }
        };

        let key_pages = self.scrape_key_pages(url, &site_map).await;

        let mut clinic_data = match self.structured_extract(url).await {
            Ok(value) if !value.is_null() => parse_structured(&value),
            Ok(_) => ClinicData::default(),
            Err(error) => {
                tracing::warn!(%error, "structured extraction failed, using pattern fallback");
                ClinicData::default()
            }
        };

        fill_from_patterns(&mut clinic_data, &main_page, &key_pages);
        apply_defaults(&mut clinic_data, url);

        let media = media::harvest(&main_page, &key_pages);
        tracing::info!(
            completeness = clinic_data.data_completeness(),
            "extraction finished"
        );

        Ok(ExtractionOutcome { clinic_data, media })
    }

    async fn scrape_key_pages(&self, base_url: &str, site_map: &[String]) -> KeyPages {
        let mut pages = KeyPages::default();
        for (role, keywords) in KEY_PAGE_KEYWORDS {
            let Some(target) = find_matching_url(site_map, keywords, base_url) else {
                continue;
            };
            tracing::debug!(role, url = %target, "scraping key page");
            match self.client.scrape(&target).await {
                Ok(page) => {
                    match *role {
                        "about" => pages.about = Some(page),
                        "team" => pages.team = Some(page),
                        "services" => pages.services = Some(page),
                        "contact" => pages.contact = Some(page),
                        _ => pages.pricing = Some(page),
                    }
                    tokio::time::sleep(self.inter_request_delay).await;
                }
                Err(error) => {
                    tracing::warn!(role, %error, "failed to scrape key page, skipping");
                }
            }
        }
        pages
    }

    async fn structured_extract(&self, url: &str) -> Result<serde_json::Value, ExtractError> {
        self.client
            .extract_structured(
                &[url.to_owned()],
                &extraction_schema(),
                "Extract comprehensive information about this aesthetic/cosmetic clinic \
                 including business details, contact information, location, team members, \
                 services, and social proof.",
            )
            .await
    }
}

/// First site-map URL whose path contains one of the keywords.
fn find_matching_url(site_map: &[String], keywords: &[&str], base_url: &str) -> Option<String> {
    for keyword in keywords {
        let found = site_map.iter().find(|url| {
            let path = url
                .strip_prefix(base_url)
                .unwrap_or(url)
                .to_lowercase();
            path.contains(keyword)
        });
        if let Some(url) = found {
            return Some(url.clone());
        }
    }
    None
}

/// JSON schema handed to the structured-extract endpoint. Mirrors the
/// sections of [`ClinicData`] that an LLM can reliably pull from prose.
fn extraction_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "business": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Business/clinic name" },
                    "tagline": { "type": "string", "description": "Business tagline or slogan" },
                    "description": { "type": "string", "description": "Business description" },
                    "yearsEstablished": { "type": "number", "description": "Year the business was established" },
                    "specialties": { "type": "array", "items": { "type": "string" } }
                }
            },
            "contact": {
                "type": "object",
                "properties": {
                    "phone": { "type": "string", "description": "Primary phone number" },
                    "email": { "type": "string", "description": "Primary email address" },
                    "address": { "type": "string", "description": "Full physical address" },
                    "postcode": { "type": "string", "description": "UK postcode" }
                }
            },
            "location": {
                "type": "object",
                "properties": {
                    "city": { "type": "string" },
                    "region": { "type": "string", "description": "County or region" },
                    "country": { "type": "string" }
                }
            },
            "team": {
                "type": "object",
                "properties": {
                    "members": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": { "type": "string" },
                                "title": { "type": "string" },
                                "qualifications": { "type": "array", "items": { "type": "string" } },
                                "bio": { "type": "string" }
                            }
                        }
                    }
                }
            },
            "services": {
                "type": "object",
                "properties": {
                    "treatments": { "type": "array", "items": { "type": "string" } }
                }
            },
            "socialProof": {
                "type": "object",
                "properties": {
                    "reviews": {
                        "type": "object",
                        "properties": {
                            "rating": { "type": "number", "description": "Average rating (1-5)" },
                            "count": { "type": "number", "description": "Number of reviews" }
                        }
                    },
                    "testimonials": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "text": { "type": "string" },
                                "author": { "type": "string" }
                            }
                        }
                    }
                }
            },
            "branding": {
                "type": "object",
                "properties": {
                    "brandVoice": { "type": "string", "description": "Brand tone (professional, luxury, friendly)" }
                }
            }
        }
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StructuredExtract {
    business: StructuredBusiness,
    contact: StructuredContact,
    location: StructuredLocation,
    team: StructuredTeam,
    services: StructuredServices,
    social_proof: StructuredSocialProof,
    branding: StructuredBranding,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StructuredBusiness {
    name: Option<String>,
    tagline: Option<String>,
    description: Option<String>,
    years_established: Option<i32>,
    specialties: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StructuredContact {
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    postcode: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StructuredLocation {
    city: Option<String>,
    region: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StructuredTeam {
    members: Vec<StructuredMember>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StructuredMember {
    name: Option<String>,
    title: Option<String>,
    qualifications: Vec<String>,
    bio: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StructuredServices {
    treatments: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StructuredSocialProof {
    reviews: Option<StructuredReviews>,
    testimonials: Vec<StructuredTestimonial>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StructuredReviews {
    rating: Option<f64>,
    count: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StructuredTestimonial {
    text: Option<String>,
    author: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StructuredBranding {
    brand_voice: Option<String>,
}

/// Converts a structured-extract payload into a partial [`ClinicData`].
/// Any shape mismatch degrades to an empty record rather than an error.
fn parse_structured(value: &serde_json::Value) -> ClinicData {
    let Ok(extract) = serde_json::from_value::<StructuredExtract>(value.clone()) else {
        tracing::warn!("structured extract payload had unexpected shape, ignoring");
        return ClinicData::default();
    };

    let mut data = ClinicData::default();
    data.business.name = extract.business.name;
    data.business.tagline = extract.business.tagline;
    data.business.description = extract.business.description;
    data.business.years_established = extract.business.years_established;
    data.business.specialties = extract.business.specialties;

    data.contact.phone = extract.contact.phone;
    data.contact.email = extract.contact.email;
    data.contact.address = extract.contact.address;
    data.contact.postcode = extract.contact.postcode;

    data.location.city = extract.location.city;
    data.location.region = extract.location.region;
    data.location.country = extract.location.country;

    // A member without a name is not retained.
    data.team.members = extract
        .team
        .members
        .into_iter()
        .filter_map(|m| {
            let name = m.name.filter(|n| !n.trim().is_empty())?;
            Some(TeamMember {
                name,
                title: m.title.unwrap_or_else(|| "Aesthetic Practitioner".to_owned()),
                qualifications: m.qualifications,
                bio: m.bio,
                image: None,
            })
        })
        .collect();

    data.services.treatments = extract.services.treatments;

    if let Some(reviews) = extract.social_proof.reviews {
        if reviews.rating.is_some() || reviews.count.is_some() {
            data.social_proof.reviews = Some(clinicforge_core::ReviewSummary {
                rating: reviews.rating,
                count: reviews.count,
            });
        }
    }
    data.social_proof.testimonials = extract
        .social_proof
        .testimonials
        .into_iter()
        .filter_map(|t| {
            let text = t.text.filter(|t| !t.trim().is_empty())?;
            Some(Testimonial {
                text,
                author: t.author.unwrap_or_else(|| "Patient".to_owned()),
            })
        })
        .collect();

    if let Some(tone) = extract.branding.brand_voice.as_deref().and_then(parse_tone) {
        data.branding.brand_voice = Some(clinicforge_core::BrandVoice {
            tone,
            scores: std::collections::BTreeMap::new(),
        });
    }

    data
}

fn parse_tone(s: &str) -> Option<Tone> {
    match s.trim().to_lowercase().as_str() {
        "professional" => Some(Tone::Professional),
        "luxury" => Some(Tone::Luxury),
        "friendly" => Some(Tone::Friendly),
        _ => None,
    }
}

/// Fills any field the structured extract left empty using the pattern
/// extractors over the combined page text. Branding, pricing, and social
/// handles always come from patterns since the extract schema omits them.
fn fill_from_patterns(data: &mut ClinicData, main_page: &ScrapedPage, key_pages: &KeyPages) {
    let combined = combined_text(main_page, key_pages);
    let content = combined.as_str();
    let title = main_page.metadata.as_ref().and_then(|m| m.title.as_deref());

    if data.business.name.is_none() {
        data.business.name = fields::business_name(content, title);
    }
    if data.business.description.is_none() {
        data.business.description = main_page
            .metadata
            .as_ref()
            .and_then(|m| m.description.clone())
            .or_else(|| fields::description(content));
    }
    if data.business.years_established.is_none() {
        data.business.years_established = fields::years_established(content);
    }
    if data.business.specialties.is_empty() {
        data.business.specialties = fields::specialties(content);
    }

    if data.contact.phone.is_none() {
        data.contact.phone = fields::phone(content);
    }
    if data.contact.email.is_none() {
        data.contact.email = fields::email(content);
    }
    if data.contact.address.is_none() {
        data.contact.address = fields::address(content);
    }
    if data.contact.postcode.is_none() {
        data.contact.postcode = fields::postcode(content);
    }

    if data.location.city.is_none() {
        data.location.city = fields::city(content);
    }

    if data.team.members.is_empty() {
        let team_text = key_pages
            .team
            .as_ref()
            .map_or(content, |page| page.text());
        data.team.members = fields::team_members(team_text);
    }

    if data.services.treatments.is_empty() {
        let services_text = key_pages
            .services
            .as_ref()
            .map_or(content, |page| page.text());
        data.services.treatments = fields::treatments(services_text);
    }
    if data.services.pricing.is_none() {
        data.services.pricing = fields::pricing(content);
    }
    if data.services.specialties.is_empty() {
        data.services.specialties = fields::specialties(content);
    }

    if data.branding.logo_url.is_none() {
        data.branding.logo_url = main_page.html.as_deref().and_then(fields::logo_url);
    }
    if data.branding.color_scheme.is_none() {
        data.branding.color_scheme = main_page.html.as_deref().and_then(fields::color_scheme);
    }
    if data.branding.brand_voice.is_none() {
        data.branding.brand_voice = Some(fields::brand_voice(content));
    }

    if data.social_proof.reviews.is_none() {
        data.social_proof.reviews = fields::reviews(content);
    }
    if data.social_proof.testimonials.is_empty() {
        data.social_proof.testimonials = fields::testimonials(content);
    }
    if data.social_proof.social_media.is_empty() {
        data.social_proof.social_media = fields::social_media(content);
    }
}

/// Fixed fallbacks: source URL, country, region from the postcode prefix,
/// and the London coordinate point when the address was not geocoded.
fn apply_defaults(data: &mut ClinicData, url: &str) {
    data.contact.website = Some(url.to_owned());
    if data.location.country.is_none() {
        data.location.country = Some("United Kingdom".to_owned());
    }
    if data.location.region.is_none() {
        if let Some(postcode) = data.contact.postcode.as_deref() {
            data.location.region = fields::region(postcode);
        }
    }
    if data.location.coordinates.is_none() {
        data.location.coordinates = Some(Coordinates::LONDON);
    }
}

fn combined_text(main_page: &ScrapedPage, key_pages: &KeyPages) -> String {
    let mut parts = vec![main_page.text().to_owned()];
    parts.extend(key_pages.iter().map(|p| p.text().to_owned()));
    parts.retain(|p| !p.is_empty());
    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_structured_drops_nameless_members() {
        let value = json!({
            "team": { "members": [
                { "name": "Dr Jane Smith", "title": "Director" },
                { "title": "Nurse" },
                { "name": "  " }
            ]}
        });
        let data = parse_structured(&value);
        assert_eq!(data.team.members.len(), 1);
        assert_eq!(data.team.members[0].name, "Dr Jane Smith");
    }

    #[test]
    fn parse_structured_tolerates_unexpected_shape() {
        let data = parse_structured(&json!({ "business": "not an object" }));
        assert!(data.business.name.is_none());
    }

    #[test]
    fn parse_structured_reads_brand_voice_string() {
        let data = parse_structured(&json!({ "branding": { "brandVoice": "Luxury" } }));
        assert_eq!(
            data.branding.brand_voice.map(|v| v.tone),
            Some(Tone::Luxury)
        );
    }

    #[test]
    fn apply_defaults_sets_country_region_and_coordinates() {
        let mut data = ClinicData::default();
        data.contact.postcode = Some("SW1A 1AA".to_owned());
        apply_defaults(&mut data, "https://acmeclinic.co.uk");
        assert_eq!(data.location.country.as_deref(), Some("United Kingdom"));
        assert_eq!(data.location.region.as_deref(), Some("London"));
        assert_eq!(data.location.coordinates, Some(Coordinates::LONDON));
        assert_eq!(
            data.contact.website.as_deref(),
            Some("https://acmeclinic.co.uk")
        );
    }

    #[test]
    fn apply_defaults_keeps_existing_values() {
        let mut data = ClinicData::default();
        data.location.country = Some("Ireland".to_owned());
        data.location.coordinates = Some(Coordinates {
            latitude: 53.35,
            longitude: -6.26,
        });
        apply_defaults(&mut data, "https://example.ie");
        assert_eq!(data.location.country.as_deref(), Some("Ireland"));
        assert!((data.location.coordinates.expect("coords").latitude - 53.35).abs() < f64::EPSILON);
    }

    #[test]
    fn find_matching_url_checks_keywords_in_priority_order() {
        let site_map = vec![
            "https://x.co.uk/our-team".to_owned(),
            "https://x.co.uk/about".to_owned(),
        ];
        assert_eq!(
            find_matching_url(&site_map, &["about", "about-us"], "https://x.co.uk"),
            Some("https://x.co.uk/about".to_owned())
        );
        assert_eq!(
            find_matching_url(&site_map, &["prices", "fees"], "https://x.co.uk"),
            None
        );
    }

    #[test]
    fn fill_from_patterns_populates_contact_from_text() {
        let main_page = ScrapedPage {
            markdown: Some(
                "Call us: +44 7911 123456\nEmail info@acmeclinic.co.uk\n\
                 Address: 1 High Street, London, SW1A 1AA"
                    .to_owned(),
            ),
            html: None,
            metadata: None,
        };
        let mut data = ClinicData::default();
        fill_from_patterns(&mut data, &main_page, &KeyPages::default());
        assert_eq!(data.contact.phone.as_deref(), Some("+447911123456"));
        assert_eq!(data.contact.email.as_deref(), Some("info@acmeclinic.co.uk"));
        assert_eq!(data.location.city.as_deref(), Some("London"));
    }

    #[test]
    fn fill_from_patterns_keeps_structured_values() {
        let main_page = ScrapedPage {
            markdown: Some("Call us: +44 7911 123456".to_owned()),
            html: None,
            metadata: None,
        };
        let mut data = ClinicData::default();
        data.contact.phone = Some("+447000000000".to_owned());
        fill_from_patterns(&mut data, &main_page, &KeyPages::default());
        assert_eq!(data.contact.phone.as_deref(), Some("+447000000000"));
    }
}
