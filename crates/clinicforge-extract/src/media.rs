//! Image harvesting from scraped page HTML.
//!
//! Best-effort keyword matching on `<img>` attributes; an irrelevant image
//! that happens to carry a matching class name will be collected. Results
//! feed the manual-review checklist, not automated substitution.

use regex::Regex;

use crate::types::{KeyPages, MediaAssets, ScrapedPage};

/// Collects candidate images from the main page and key pages, bucketed by
/// likely role (logo, team photo, facility, treatment).
#[must_use]
pub fn harvest(main_page: &ScrapedPage, key_pages: &KeyPages) -> MediaAssets {
    let mut assets = MediaAssets::default();

    if let Some(html) = main_page.html.as_deref() {
        extend_unique(&mut assets.logos, images_by_keywords(html, LOGO_KEYWORDS));
        extend_unique(
            &mut assets.facility_images,
            images_by_keywords(html, FACILITY_KEYWORDS),
        );
    }
    if let Some(html) = key_pages.team.as_ref().and_then(|p| p.html.as_deref()) {
        extend_unique(&mut assets.team_photos, images_by_keywords(html, TEAM_KEYWORDS));
    }
    if let Some(html) = key_pages.services.as_ref().and_then(|p| p.html.as_deref()) {
        extend_unique(
            &mut assets.treatment_images,
            images_by_keywords(html, TREATMENT_KEYWORDS),
        );
    }

    assets
}

const LOGO_KEYWORDS: &[&str] = &["logo"];
const TEAM_KEYWORDS: &[&str] = &["team", "staff", "doctor", "practitioner"];
const FACILITY_KEYWORDS: &[&str] = &["clinic", "facility", "office", "reception", "treatment-room"];
const TREATMENT_KEYWORDS: &[&str] = &["treatment", "procedure", "before", "after", "result"];

/// `src` values of `<img>` tags whose alt/class/id attributes mention one of
/// the keywords before the `src` attribute.
fn images_by_keywords(html: &str, keywords: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    for keyword in keywords {
        let pattern = format!(
            r#"(?i)<img[^>]*(?:alt|class|id)[^>]*{}[^>]*src=["']([^"']+)["']"#,
            regex::escape(keyword)
        );
        let re = Regex::new(&pattern).expect("valid image keyword regex");
        for caps in re.captures_iter(html) {
            out.push(caps[1].to_owned());
        }
    }
    out
}

fn extend_unique(target: &mut Vec<String>, candidates: Vec<String>) {
    for candidate in candidates {
        if !target.contains(&candidate) {
            target.push(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> ScrapedPage {
        ScrapedPage {
            markdown: None,
            html: Some(html.to_owned()),
            metadata: None,
        }
    }

    #[test]
    fn harvest_buckets_logo_from_main_page() {
        let main = page(r#"<img class="site-logo" src="/img/logo.png">"#);
        let assets = harvest(&main, &KeyPages::default());
        assert_eq!(assets.logos, vec!["/img/logo.png".to_owned()]);
        assert!(assets.team_photos.is_empty());
    }

    #[test]
    fn harvest_buckets_team_photos_from_team_page() {
        let key_pages = KeyPages {
            team: Some(page(
                r#"<img alt="Our team of doctors" src="/img/team.jpg"><img class="staff-photo" src="/img/staff.jpg">"#,
            )),
            ..KeyPages::default()
        };
        let assets = harvest(&ScrapedPage::default(), &key_pages);
        assert_eq!(assets.team_photos.len(), 2);
    }

    #[test]
    fn harvest_dedupes_repeated_sources() {
        let key_pages = KeyPages {
            services: Some(page(
                r#"<img alt="laser treatment" src="/t.jpg"><img class="procedure" src="/t.jpg">"#,
            )),
            ..KeyPages::default()
        };
        let assets = harvest(&ScrapedPage::default(), &key_pages);
        assert_eq!(assets.treatment_images, vec!["/t.jpg".to_owned()]);
    }

    #[test]
    fn harvest_ignores_unrelated_images() {
        let main = page(r#"<img alt="hero banner" src="/hero.jpg">"#);
        let assets = harvest(&main, &KeyPages::default());
        assert!(assets.logos.is_empty());
        assert!(assets.facility_images.is_empty());
    }
}
