//! Wire types for the Firecrawl API and intermediate scrape artifacts.

use serde::Deserialize;

/// One scraped page as returned by the `/scrape` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapedPage {
    pub markdown: Option<String>,
    pub html: Option<String>,
    pub metadata: Option<PageMetadata>,
}

impl ScrapedPage {
    /// The best available text content for regex extraction: markdown when
    /// present, raw HTML otherwise.
    #[must_use]
    pub fn text(&self) -> &str {
        self.markdown
            .as_deref()
            .or(self.html.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Secondary pages discovered via the site map, keyed by role.
#[derive(Debug, Clone, Default)]
pub struct KeyPages {
    pub about: Option<ScrapedPage>,
    pub team: Option<ScrapedPage>,
    pub services: Option<ScrapedPage>,
    pub contact: Option<ScrapedPage>,
    pub pricing: Option<ScrapedPage>,
}

impl KeyPages {
    /// All scraped key pages in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = &ScrapedPage> {
        [
            self.about.as_ref(),
            self.team.as_ref(),
            self.services.as_ref(),
            self.contact.as_ref(),
            self.pricing.as_ref(),
        ]
        .into_iter()
        .flatten()
    }
}

/// Image URLs harvested from page HTML, bucketed by likely role.
#[derive(Debug, Clone, Default)]
pub struct MediaAssets {
    pub logos: Vec<String>,
    pub team_photos: Vec<String>,
    pub facility_images: Vec<String>,
    pub treatment_images: Vec<String>,
}

/// Common Firecrawl response envelope: `{"success": bool, "data": ..., "error": ...}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}
