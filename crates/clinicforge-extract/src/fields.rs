//! Pure field extractors over scraped page text.
//!
//! Every function here is `&str -> Option<T>` (or an empty collection on no
//! match) with no I/O: patterns are tried in priority order with the most
//! reliable first, and a miss is never an error. Whether a missing field
//! matters is a policy decision made downstream, not here, so the patterns
//! can be unit-tested in isolation.

use std::collections::BTreeMap;

use regex::Regex;

use clinicforge_core::{BrandVoice, ColorScheme, PricingSummary, ReviewSummary, TeamMember, Testimonial, Tone};

/// Business name: page title before any `|` separator, then heading and
/// clinic-suffix patterns over the body text.
#[must_use]
pub fn business_name(content: &str, title: Option<&str>) -> Option<String> {
    if let Some(title) = title {
        let re = Regex::new(r"^([^|]+)").expect("valid title regex");
        if let Some(caps) = re.captures(title) {
            let name = caps[1].trim();
            if !name.is_empty() {
                return Some(name.to_owned());
            }
        }
    }

    let patterns = [
        r"(?:Dr\.?\s+)?([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\s*(?:Clinic|Aesthetics|Beauty|Skin|Medical)",
        r"(?m)^#\s*([^|\n]+)",
        r"(?i)(?:welcome to|about)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)",
    ];
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid business name regex");
        if let Some(caps) = re.captures(content) {
            return Some(caps[1].trim().to_owned());
        }
    }
    None
}

/// First substantial paragraph: over 50 characters, not a heading or list
/// item, and not boilerplate (copyright lines, cookie banners).
#[must_use]
pub fn description(content: &str) -> Option<String> {
    content
        .lines()
        .find(|line| {
            line.len() > 50
                && !line.starts_with('#')
                && !line.starts_with('*')
                && !line.contains('©')
                && !line.contains("cookie")
        })
        .map(str::to_owned)
}

/// UK phone number, normalized to a `+44`- or `0`-prefixed digit string
/// with spaces and hyphens stripped.
#[must_use]
pub fn phone(content: &str) -> Option<String> {
    let re = Regex::new(
        r"(?i)(?:tel:|phone:|call\s+us:?|contact\s+us:?)?\s*((?:\+44|0)[\s-]?[1-9](?:[\s-]?\d){8,10})",
    )
    .expect("valid phone regex");
    re.captures(content)
        .map(|caps| caps[1].replace([' ', '-'], ""))
}

#[must_use]
pub fn email(content: &str) -> Option<String> {
    let re = Regex::new(r"([a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})")
        .expect("valid email regex");
    re.captures(content).map(|caps| caps[1].to_owned())
}

/// Street address: labelled `address:`/`location:` lines first, then a bare
/// `<number> ..., ..., <postcode>` shape.
#[must_use]
pub fn address(content: &str) -> Option<String> {
    let patterns = [
        r"(?i)(?:address|location|find us|visit us):?\s*([^,\n]+,[^,\n]+,[^,\n]+)",
        r"(\d+[^,\n]+,[^,\n]+,[A-Z]{1,2}\d[A-Z\d]?\s*\d[A-Z]{2})",
    ];
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid address regex");
        if let Some(caps) = re.captures(content) {
            return Some(caps[1].trim().to_owned());
        }
    }
    None
}

#[must_use]
pub fn postcode(content: &str) -> Option<String> {
    let re = Regex::new(r"([A-Z]{1,2}\d[A-Z\d]?\s*\d[A-Z]{2})").expect("valid postcode regex");
    re.captures(content).map(|caps| caps[1].to_owned())
}

/// City: second-to-last comma-separated component of the extracted address
/// (the last component being the postcode).
#[must_use]
pub fn city(content: &str) -> Option<String> {
    let address = address(content)?;
    let parts: Vec<&str> = address.split(',').map(str::trim).collect();
    if parts.len() >= 2 {
        Some(parts[parts.len() - 2].to_owned())
    } else {
        None
    }
}

/// Region inferred from the first two characters of a UK postcode.
///
/// A fixed lookup table with no fallback: unknown prefixes yield `None`.
#[must_use]
pub fn region(postcode: &str) -> Option<String> {
    let prefix: String = postcode.chars().take(2).collect::<String>().to_uppercase();
    let region = match prefix.as_str() {
        "SW" | "SE" | "NW" | "N1" | "E1" | "W1" | "WC" | "EC" => "London",
        "M1" | "M2" | "M3" => "Manchester",
        "B1" | "B2" => "Birmingham",
        "LS" => "Leeds",
        "S1" => "Sheffield",
        "NG" => "Nottingham",
        _ => return None,
    };
    Some(region.to_owned())
}

/// Specialties: fixed keyword census over the lowercased content.
#[must_use]
pub fn specialties(content: &str) -> Vec<String> {
    const KEYWORDS: &[&str] = &[
        "anti-aging",
        "anti-ageing",
        "aesthetic",
        "cosmetic",
        "dermatology",
        "botox",
        "fillers",
        "laser",
        "microneedling",
        "chemical peel",
        "facial",
        "skin rejuvenation",
        "wrinkle treatment",
        "acne treatment",
        "pigmentation",
        "scar treatment",
        "thread lift",
        "plasma pen",
        "hydrafacial",
        "dermaplaning",
        "radiofrequency",
    ];
    let lower = content.to_lowercase();
    KEYWORDS
        .iter()
        .filter(|k| lower.contains(**k))
        .map(|k| (*k).to_owned())
        .collect()
}

/// Treatment names from headings and list items mentioning
/// treatment/therapy/procedure, length-bounded to drop prose fragments.
#[must_use]
pub fn treatments(content: &str) -> Vec<String> {
    let patterns = [
        r"(?im)^##?\s*([^#\n]+(?:treatment|therapy|procedure|service)[^#\n]*)",
        r"(?im)^\*\s*([^*\n]+(?:treatment|therapy|procedure)[^*\n]*)",
        r"(?im)^-\s*([^\n]+(?:treatment|therapy|procedure)[^\n]*)",
    ];
    let mut seen = Vec::new();
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid treatment regex");
        for caps in re.captures_iter(content) {
            let treatment = caps[1].trim().to_owned();
            if treatment.len() > 3 && treatment.len() < 100 && !seen.contains(&treatment) {
                seen.push(treatment);
            }
        }
    }
    seen
}

/// Summary over every `£<number>` match in the content.
///
/// Globally collected: a treatment price and any other currency-formatted
/// number are indistinguishable, which is a documented precision limit.
#[must_use]
pub fn pricing(content: &str) -> Option<PricingSummary> {
    let re = Regex::new(r"£(\d+(?:,\d{3})*(?:\.\d{2})?)").expect("valid price regex");
    let prices: Vec<f64> = re
        .captures_iter(content)
        .filter_map(|caps| caps[1].replace(',', "").parse::<f64>().ok())
        .collect();
    if prices.is_empty() {
        return None;
    }
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    #[allow(clippy::cast_precision_loss)]
    let average = prices.iter().sum::<f64>() / prices.len() as f64;
    Some(PricingSummary {
        min,
        max,
        average,
        found: prices,
    })
}

/// Logo URL from `<img>` tags whose class/id/alt/src mention "logo".
#[must_use]
pub fn logo_url(html: &str) -> Option<String> {
    let patterns = [
        r#"(?i)<img[^>]+(?:class|id)[^>]*logo[^>]+src=["']([^"']+)"#,
        r#"(?i)<img[^>]+src=["']([^"']*logo[^"']*)"#,
        r#"(?i)<img[^>]+alt=["'][^"']*logo[^"']*["'][^>]+src=["']([^"']+)"#,
    ];
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid logo regex");
        if let Some(caps) = re.captures(html) {
            return Some(caps[1].to_owned());
        }
    }
    None
}

/// Up to five distinct CSS color values, first-seen wins the primary slot.
#[must_use]
pub fn color_scheme(content: &str) -> Option<ColorScheme> {
    let re = Regex::new(r"(?:color|background-color):\s*(#[0-9a-fA-F]{6}|rgb\([^)]+\))")
        .expect("valid color regex");
    let mut colors: Vec<String> = Vec::new();
    for caps in re.captures_iter(content) {
        let color = caps[1].to_owned();
        if !colors.contains(&color) {
            colors.push(color);
        }
        if colors.len() == 5 {
            break;
        }
    }
    let primary = colors.first()?.clone();
    Some(ColorScheme { primary, colors })
}

/// Dominant brand tone by keyword-occurrence count.
///
/// Evaluation order is fixed (professional, luxury, friendly) and the first
/// maximum wins, so ties resolve deterministically.
#[must_use]
pub fn brand_voice(content: &str) -> BrandVoice {
    const INDICATORS: &[(Tone, &[&str])] = &[
        (
            Tone::Professional,
            &["professional", "expert", "certified", "qualified", "experienced"],
        ),
        (
            Tone::Luxury,
            &["luxury", "premium", "exclusive", "bespoke", "elite"],
        ),
        (
            Tone::Friendly,
            &["friendly", "caring", "personal", "welcoming", "comfortable"],
        ),
    ];

    let lower = content.to_lowercase();
    let mut scores = BTreeMap::new();
    let mut best = Tone::Professional;
    let mut best_score = 0usize;
    for (tone, words) in INDICATORS {
        let score: usize = words.iter().map(|w| lower.matches(w).count()).sum();
        scores.insert(*tone, score);
        if score > best_score {
            best = *tone;
            best_score = score;
        }
    }
    BrandVoice { tone: best, scores }
}

/// Star rating or review count. An ambiguous numeric match is bucketed by
/// magnitude: at most 5 is a rating, above 5 is a count.
#[must_use]
pub fn reviews(content: &str) -> Option<ReviewSummary> {
    let patterns = [
        r"(?i)(\d+(?:\.\d+)?)\s*(?:star|rating|out of 5)",
        r"(?i)(\d+)\s*(?:reviews?|testimonials?)",
        r"(?i)rated\s*(\d+(?:\.\d+)?)",
        r"(?i)(\d+(?:\.\d+)?)\s*/\s*5",
    ];
    let mut summary = ReviewSummary::default();
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid review regex");
        if let Some(caps) = re.captures(content) {
            if let Ok(value) = caps[1].parse::<f64>() {
                if value <= 5.0 {
                    summary.rating.get_or_insert(value);
                } else {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    summary.count.get_or_insert(value as u32);
                }
            }
        }
    }
    if summary.rating.is_none() && summary.count.is_none() {
        None
    } else {
        Some(summary)
    }
}

/// Quoted passages of testimonial length. Authors are rarely adjacent to
/// the quote in scraped markdown, so they default to "Patient".
#[must_use]
pub fn testimonials(content: &str) -> Vec<Testimonial> {
    let patterns = [
        r#""([^"]{50,300})""#,
        r"(?is)<blockquote[^>]*>([^<]{20,})<",
    ];
    let mut out = Vec::new();
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid testimonial regex");
        for caps in re.captures_iter(content) {
            out.push(Testimonial {
                text: caps[1].trim().to_owned(),
                author: "Patient".to_owned(),
            });
        }
    }
    out
}

/// Social media handles keyed by platform.
#[must_use]
pub fn social_media(content: &str) -> BTreeMap<String, String> {
    let platforms = [
        ("facebook", r#"(?i)facebook\.com/([^/\s"']+)"#),
        ("instagram", r#"(?i)instagram\.com/([^/\s"']+)"#),
        ("twitter", r#"(?i)twitter\.com/([^/\s"']+)"#),
        ("linkedin", r#"(?i)linkedin\.com/(?:company|in)/([^/\s"']+)"#),
    ];
    let mut out = BTreeMap::new();
    for (platform, pattern) in platforms {
        let re = Regex::new(pattern).expect("valid social media regex");
        if let Some(caps) = re.captures(content) {
            out.insert(platform.to_owned(), caps[1].to_owned());
        }
    }
    out
}

#[must_use]
pub fn years_established(content: &str) -> Option<i32> {
    let re = Regex::new(r"(?i)(?:established|founded|since)\s*(?:in\s*)?(\d{4})")
        .expect("valid year regex");
    re.captures(content).and_then(|caps| caps[1].parse().ok())
}

/// Team members parsed from markdown heading sections.
///
/// Sections start at `#`/`##` headings shaped like a person's name
/// (optionally `Dr.`-prefixed); entries without a name are dropped.
#[must_use]
pub fn team_members(content: &str) -> Vec<TeamMember> {
    let heading = Regex::new(r"(?m)^##?\s*((?:Dr\.?\s*)?[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)\s*$")
        .expect("valid team heading regex");

    let starts: Vec<(usize, String)> = heading
        .captures_iter(content)
        .filter_map(|caps| {
            let m = caps.get(0)?;
            Some((m.start(), caps[1].trim().to_owned()))
        })
        .collect();

    let mut members = Vec::new();
    for (i, (start, name)) in starts.iter().enumerate() {
        let end = starts.get(i + 1).map_or(content.len(), |(s, _)| *s);
        let section = &content[*start..end];

        let qualifications = section_qualifications(section);
        members.push(TeamMember {
            name: name.clone(),
            title: section_title(section)
                .unwrap_or_else(|| "Aesthetic Practitioner".to_owned()),
            qualifications: if qualifications.is_empty() {
                vec!["Certified Aesthetic Practitioner".to_owned()]
            } else {
                qualifications
            },
            bio: section_bio(section),
            image: None,
        });
    }
    members
}

fn section_title(section: &str) -> Option<String> {
    let patterns = [
        r"(?i)(?:title|position|role):\s*([^\n]+)",
        r"(?i)\*\*([^*]*(?:doctor|dr|practitioner|specialist|consultant)[^*]*)\*\*",
        r"(?im)^([^#\n]*(?:doctor|practitioner|specialist|consultant)[^\n]*)$",
    ];
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid team title regex");
        if let Some(caps) = re.captures(section) {
            let title = caps[1].trim();
            if !title.is_empty() {
                return Some(title.to_owned());
            }
        }
    }
    None
}

fn section_qualifications(section: &str) -> Vec<String> {
    let patterns = [
        r"(?i)(?:qualification|qualifications|education|training|certification)s?:\s*([^\n]+)",
        r"((?:BSc|MSc|PhD|MD|MBBS|BDS|FRCGP|GMC)[^\n,]*)",
        r"(?i)(?:qualified|certified|trained) in ([^\n,.]+)",
    ];
    let mut out: Vec<String> = Vec::new();
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid qualification regex");
        for caps in re.captures_iter(section) {
            let qual = caps[1].trim().to_owned();
            if !qual.is_empty() && !out.contains(&qual) {
                out.push(qual);
            }
        }
    }
    out
}

fn section_bio(section: &str) -> Option<String> {
    let label = Regex::new(r"(?i)^(?:qualification|education|training)").expect("valid bio regex");
    section
        .lines()
        .find(|line| line.len() > 50 && !line.starts_with('#') && !label.is_match(line))
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_normalizes_call_us_line() {
        assert_eq!(
            phone("Call us: +44 7911 123456"),
            Some("+447911123456".to_owned())
        );
    }

    #[test]
    fn phone_accepts_zero_prefixed_number() {
        assert_eq!(phone("Phone: 020 7946 0958"), Some("02079460958".to_owned()));
    }

    #[test]
    fn phone_misses_non_uk_shapes() {
        assert_eq!(phone("Call +1 555 0100 now"), None);
    }

    #[test]
    fn email_extracts_first_address() {
        assert_eq!(
            email("Email info@acmeclinic.co.uk for bookings"),
            Some("info@acmeclinic.co.uk".to_owned())
        );
    }

    #[test]
    fn postcode_matches_uk_shape() {
        assert_eq!(postcode("Visit us in SW1A 1AA today"), Some("SW1A 1AA".to_owned()));
        assert_eq!(postcode("no postcode here"), None);
    }

    #[test]
    fn city_is_second_to_last_address_part() {
        let content = "Address: 123 Harley Street, London, SW1A 1AA";
        assert_eq!(city(content), Some("London".to_owned()));
    }

    #[test]
    fn region_lookup_covers_known_prefixes() {
        assert_eq!(region("SW1A 1AA"), Some("London".to_owned()));
        assert_eq!(region("M1 2AB"), Some("Manchester".to_owned()));
        assert_eq!(region("B1 1AA"), Some("Birmingham".to_owned()));
        assert_eq!(region("LS1 4DY"), Some("Leeds".to_owned()));
        assert_eq!(region("S1 2BJ"), Some("Sheffield".to_owned()));
        assert_eq!(region("NG1 5FS"), Some("Nottingham".to_owned()));
    }

    #[test]
    fn region_unknown_prefix_is_none() {
        assert_eq!(region("ZZ9 9ZZ"), None);
    }

    #[test]
    fn business_name_prefers_page_title() {
        let name = business_name("irrelevant body", Some("Acme Clinic | CO2 Laser London"));
        assert_eq!(name, Some("Acme Clinic".to_owned()));
    }

    #[test]
    fn business_name_falls_back_to_clinic_suffix() {
        let name = business_name("Welcome to Radiant Skin Clinic in Mayfair", None);
        assert_eq!(name, Some("Radiant Skin".to_owned()));
    }

    #[test]
    fn pricing_summarizes_all_pound_amounts() {
        let p = pricing("CO2 laser from £1,200. Consultation £50. Peel £300.50.").expect("pricing");
        assert!((p.min - 50.0).abs() < f64::EPSILON);
        assert!((p.max - 1200.0).abs() < f64::EPSILON);
        assert_eq!(p.found.len(), 3);
        assert!((p.average - (1200.0 + 50.0 + 300.5) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn pricing_none_without_pound_amounts() {
        assert!(pricing("prices on consultation").is_none());
    }

    #[test]
    fn reviews_buckets_small_values_as_rating() {
        let r = reviews("Rated 4.9 stars by our patients").expect("reviews");
        assert_eq!(r.rating, Some(4.9));
    }

    #[test]
    fn reviews_buckets_large_values_as_count() {
        let r = reviews("over 320 reviews on Google").expect("reviews");
        assert_eq!(r.count, Some(320));
        assert_eq!(r.rating, None);
    }

    #[test]
    fn brand_voice_highest_count_wins() {
        let v = brand_voice("luxury premium exclusive bespoke spa, also friendly");
        assert_eq!(v.tone, Tone::Luxury);
        assert_eq!(v.scores[&Tone::Luxury], 4);
        assert_eq!(v.scores[&Tone::Friendly], 1);
    }

    #[test]
    fn brand_voice_tie_resolves_by_fixed_order() {
        // 1 professional keyword, 1 luxury keyword: professional is evaluated
        // first and keeps the win.
        let v = brand_voice("an expert in luxury care");
        assert_eq!(v.tone, Tone::Professional);
    }

    #[test]
    fn years_established_parses_founded_year() {
        assert_eq!(years_established("Founded in 2009 by Dr Smith"), Some(2009));
        assert_eq!(years_established("established 1998"), Some(1998));
    }

    #[test]
    fn social_media_extracts_handles() {
        let content = "instagram.com/acmeclinic and facebook.com/acmeclinicuk";
        let social = social_media(content);
        assert_eq!(social.get("instagram").map(String::as_str), Some("acmeclinic"));
        assert_eq!(social.get("facebook").map(String::as_str), Some("acmeclinicuk"));
    }

    #[test]
    fn color_scheme_dedupes_and_caps_at_five() {
        let css = "color: #112233; background-color: #112233; color: #445566; \
                   color: #778899; color: #aabbcc; color: #ddeeff; color: #000000;";
        let scheme = color_scheme(css).expect("scheme");
        assert_eq!(scheme.primary, "#112233");
        assert_eq!(scheme.colors.len(), 5);
    }

    #[test]
    fn team_members_parsed_from_heading_sections() {
        let content = "\
## Dr Jane Smith\n\
Title: Medical Director\n\
Qualifications: MBBS, MSc Aesthetic Medicine\n\
Dr Smith has led the clinic's laser programme for over a decade, treating thousands of patients.\n\
\n\
## Tom Brown\n\
Senior practitioner with advanced laser training and a background in dermatology nursing care.\n";
        let members = team_members(content);
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name, "Dr Jane Smith");
        assert_eq!(members[0].title, "Medical Director");
        assert!(members[0]
            .qualifications
            .iter()
            .any(|q| q.contains("MBBS")));
        assert!(members[0].bio.is_some());
        assert_eq!(members[1].name, "Tom Brown");
        assert_eq!(
            members[1].qualifications,
            vec!["Certified Aesthetic Practitioner".to_owned()]
        );
    }

    #[test]
    fn team_members_empty_without_name_headings() {
        assert!(team_members("## Treatments\nlaser treatment\n").is_empty());
    }

    #[test]
    fn testimonials_collects_long_quotes() {
        let content = r#"Patients love us. "The CO2 laser treatment completely transformed my skin texture within weeks.""#;
        let t = testimonials(content);
        assert_eq!(t.len(), 1);
        assert_eq!(t[0].author, "Patient");
    }

    #[test]
    fn treatments_length_bounded() {
        let content = "## CO2 Laser Treatment\n* Microneedling therapy\n- a\n";
        let found = treatments(content);
        assert!(found.iter().any(|t| t.contains("CO2 Laser Treatment")));
        assert!(found.iter().any(|t| t.contains("Microneedling therapy")));
        assert_eq!(found.len(), 2);
    }
}
