//! Category 2: content validation.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::fsutil;
use crate::types::{CheckOutcome, NamedCheck};

/// Placeholders the customization stage must have replaced.
const PLACEHOLDERS: &[&str] = &[
    "Your Clinic Name",
    "[Your Location]",
    "your-clinic-domain.com",
    "info@leadballoon.co.uk",
    "[Your Street Address]",
    "[Your City]",
    "[Your Postal Code]",
];

const CRITICAL_FILES: &[&str] = &[
    "app/layout.tsx",
    "components/Footer.tsx",
    "components/CTASection.tsx",
    "components/TeamSection.tsx",
];

const MAX_IMAGE_BYTES: u64 = 500_000;
const MAX_DETAIL_LINES: usize = 5;

pub fn checks(project: &Path) -> Vec<NamedCheck> {
    vec![
        NamedCheck::new("Placeholder removal", placeholder_removal(project)),
        NamedCheck::new("Contact information", contact_information(project)),
        NamedCheck::new("Business information", business_information(project)),
        NamedCheck::new("Content consistency", content_consistency(project)),
        NamedCheck::new("Image validation", image_validation(project)),
        NamedCheck::new("Link validation", link_validation(project)),
    ]
}

/// Zero leftover placeholders pass; up to three are a warning; four or
/// more fail the check.
fn placeholder_removal(project: &Path) -> CheckOutcome {
    let mut found = Vec::new();
    for file in CRITICAL_FILES {
        let Ok(content) = fs::read_to_string(project.join(file)) else {
            continue;
        };
        for placeholder in PLACEHOLDERS {
            if content.contains(placeholder) {
                found.push(format!("{file}: {placeholder}"));
            }
        }
    }
    placeholder_outcome(&found)
}

fn placeholder_outcome(found: &[String]) -> CheckOutcome {
    match found.len() {
        0 => CheckOutcome::pass("All placeholders have been replaced"),
        count @ 1..=3 => CheckOutcome::warning(format!("{count} placeholders remaining"))
            .with_details(found.to_vec()),
        count => {
            let mut details = found.to_vec();
            details.truncate(MAX_DETAIL_LINES);
            CheckOutcome::fail(format!(
                "{count} placeholders found - template not properly customized"
            ))
            .with_details(details)
        }
    }
}

fn contact_information(project: &Path) -> CheckOutcome {
    let layout = fs::read_to_string(project.join("app/layout.tsx"));
    let footer = fs::read_to_string(project.join("components/Footer.tsx"));
    let (Ok(layout), Ok(footer)) = (layout, footer) else {
        return CheckOutcome::error("Could not validate contact information");
    };

    let phone_re = Regex::new(r"\+44\d{10,11}|\+44\s*\d{4}\s*\d{3}\s*\d{3,4}")
        .expect("valid phone regex");
    let email_re = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
        .expect("valid email regex");
    let postcode_re =
        Regex::new(r"[A-Z]{1,2}\d[A-Z\d]?\s*\d[A-Z]{2}").expect("valid postcode regex");

    let mut issues = Vec::new();
    if !phone_re.is_match(&layout) && !phone_re.is_match(&footer) {
        issues.push("Valid UK phone number not found".to_owned());
    }
    if !email_re.is_match(&layout) && !email_re.is_match(&footer) {
        issues.push("Valid email address not found".to_owned());
    }
    if !postcode_re.is_match(&layout) {
        issues.push("UK postal code not found in schema markup".to_owned());
    }

    if issues.is_empty() {
        CheckOutcome::pass("Contact information is properly formatted")
    } else {
        CheckOutcome::warning("Contact information issues found").with_details(issues)
    }
}

fn business_information(project: &Path) -> CheckOutcome {
    let Ok(content) = fs::read_to_string(project.join("app/layout.tsx")) else {
        return CheckOutcome::error("Could not validate business information");
    };

    let mut issues = Vec::new();
    if !content.contains("\"name\":") || content.contains("\"name\": \"Your Clinic Name\"") {
        issues.push("Business name not properly set in schema markup".to_owned());
    }
    if !content.contains("\"description\":")
        || content.contains("Transform your skin with Lumenis UltraPulse")
    {
        issues.push("Business description not customized".to_owned());
    }
    if content.contains("\"latitude\": 0.0000") {
        issues.push("Geographic coordinates not set".to_owned());
    }
    if !content.contains("openingHoursSpecification") {
        issues.push("Opening hours not specified".to_owned());
    }

    if issues.is_empty() {
        CheckOutcome::pass("Business information is complete")
    } else {
        CheckOutcome::warning("Business information incomplete").with_details(issues)
    }
}

/// Business names and phone numbers must agree across the files a reader
/// sees together.
fn content_consistency(project: &Path) -> CheckOutcome {
    let files = ["app/layout.tsx", "components/Footer.tsx", "components/CTASection.tsx"];
    let mut contents = Vec::new();
    for file in files {
        match fs::read_to_string(project.join(file)) {
            Ok(content) => contents.push(content),
            Err(_) => return CheckOutcome::error("Could not validate content consistency"),
        }
    }

    let name_re = Regex::new(r#""([^"]*(?:Clinic|Aesthetics|Beauty|Skin)[^"]*)""#)
        .expect("valid business name regex");
    let phone_re = Regex::new(r"\+44[\d\s]+").expect("valid phone regex");

    let mut names = std::collections::BTreeSet::new();
    let mut phones = std::collections::BTreeSet::new();
    for content in &contents {
        for caps in name_re.captures_iter(content) {
            names.insert(caps[1].to_owned());
        }
        for m in phone_re.find_iter(content) {
            phones.insert(m.as_str().replace(char::is_whitespace, ""));
        }
    }

    let mut issues = Vec::new();
    if names.len() > 1 {
        issues.push(format!(
            "Inconsistent business names found: {}",
            names.into_iter().collect::<Vec<_>>().join(", ")
        ));
    }
    if phones.len() > 1 {
        issues.push(format!(
            "Inconsistent phone numbers found: {}",
            phones.into_iter().collect::<Vec<_>>().join(", ")
        ));
    }

    if issues.is_empty() {
        CheckOutcome::pass("Content is consistent across files")
    } else {
        CheckOutcome::warning("Content inconsistencies found").with_details(issues)
    }
}

fn image_validation(project: &Path) -> CheckOutcome {
    let images_dir = project.join("public").join("images");
    if !images_dir.is_dir() {
        return CheckOutcome::warning("Could not validate images directory");
    }

    let images = fsutil::image_files(&images_dir);
    let mut issues = Vec::new();
    for image in &images {
        let file = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Ok(meta) = fs::metadata(image) {
            if meta.len() > MAX_IMAGE_BYTES {
                issues.push(format!(
                    "{file}: Large file size ({})",
                    fsutil::format_bytes(meta.len())
                ));
            }
        }
        if file.contains("placeholder") || file.contains("demo") {
            issues.push(format!("{file}: Placeholder image should be replaced"));
        }
    }

    if issues.is_empty() {
        CheckOutcome::pass(format!(
            "All {} images are optimized and customized",
            images.len()
        ))
    } else {
        let count = issues.len();
        issues.truncate(MAX_DETAIL_LINES);
        CheckOutcome::warning(format!("{count} image issues found")).with_details(issues)
    }
}

/// A census only. Internal-link resolution needs a running site, so
/// external links are counted and left to manual verification.
fn link_validation(project: &Path) -> CheckOutcome {
    let href_re = Regex::new(r#"href=["']([^"']+)["']"#).expect("valid href regex");
    let mut external = 0usize;

    for file in fsutil::html_files(project) {
        let Ok(content) = fs::read_to_string(&file) else {
            continue;
        };
        for caps in href_re.captures_iter(&content) {
            if caps[1].starts_with("http") {
                external += 1;
            }
        }
    }

    CheckOutcome::pass(format!("Found {external} external links to validate"))
        .with_recommendation("Manually verify external links are working")
}
