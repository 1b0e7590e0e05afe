//! Category 4: SEO compliance.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::fsutil;
use crate::types::{CheckOutcome, NamedCheck};

const REQUIRED_SCHEMA_PROPERTIES: &[&str] = &[
    "@context",
    "@type",
    "name",
    "description",
    "address",
    "telephone",
    "openingHoursSpecification",
];

const MIN_WORD_COUNT: usize = 300;
const MAX_DETAIL_LINES: usize = 5;

pub fn checks(project: &Path) -> Vec<NamedCheck> {
    vec![
        NamedCheck::new("Meta tags validation", meta_tags(project)),
        NamedCheck::new("Schema markup", schema_markup(project)),
        NamedCheck::new("Sitemap generation", sitemap(project)),
        NamedCheck::new("Robots.txt", robots_txt(project)),
        NamedCheck::new("URL structure", url_structure(project)),
        NamedCheck::new("Content optimization", content_optimization(project)),
    ]
}

fn meta_tags(project: &Path) -> CheckOutcome {
    let Ok(content) = fs::read_to_string(project.join("app/layout.tsx")) else {
        return CheckOutcome::error("Could not validate meta tags");
    };

    let mut issues = Vec::new();
    if !content.contains("title:") || content.contains("Your Clinic Name") {
        issues.push("Title tag not properly customized".to_owned());
    }
    if !content.contains("description:") {
        issues.push("Meta description missing".to_owned());
    }
    if !content.contains("keywords:") {
        issues.push("Meta keywords missing".to_owned());
    }
    if !content.contains("openGraph:") {
        issues.push("Open Graph metadata missing".to_owned());
    }
    if !content.contains("twitter:") {
        issues.push("Twitter Card metadata missing".to_owned());
    }

    if issues.is_empty() {
        CheckOutcome::pass("All essential meta tags are present")
    } else {
        CheckOutcome::warning(format!("{} SEO meta tag issues found", issues.len()))
            .with_details(issues)
    }
}

fn schema_markup(project: &Path) -> CheckOutcome {
    let Ok(content) = fs::read_to_string(project.join("app/layout.tsx")) else {
        return CheckOutcome::error("Could not validate schema markup");
    };

    let mut issues = Vec::new();
    if !content.contains("application/ld+json") {
        issues.push("JSON-LD schema markup missing".to_owned());
    }
    for property in REQUIRED_SCHEMA_PROPERTIES {
        if !content.contains(&format!("\"{property}\"")) {
            issues.push(format!("Schema property missing: {property}"));
        }
    }

    if issues.is_empty() {
        CheckOutcome::pass("Schema markup is complete and valid")
    } else {
        let count = issues.len();
        issues.truncate(MAX_DETAIL_LINES);
        CheckOutcome::warning(format!("{count} schema markup issues found")).with_details(issues)
    }
}

fn sitemap(project: &Path) -> CheckOutcome {
    let Ok(content) = fs::read_to_string(project.join("app/sitemap.ts")) else {
        return CheckOutcome::warning("Sitemap file not found")
            .with_recommendation("Create app/sitemap.ts for better SEO");
    };
    if content.contains("your-clinic-domain.com") {
        CheckOutcome::warning("Sitemap contains placeholder domain")
            .with_recommendation("Update sitemap.ts with actual domain")
    } else {
        CheckOutcome::pass("Sitemap configuration is present")
    }
}

fn robots_txt(project: &Path) -> CheckOutcome {
    if project.join("public/robots.txt").is_file() {
        CheckOutcome::pass("Robots.txt file is present")
    } else {
        CheckOutcome::warning("Robots.txt file missing")
            .with_recommendation("Create public/robots.txt for search engine guidance")
    }
}

fn url_structure(project: &Path) -> CheckOutcome {
    let Ok(content) = fs::read_to_string(project.join("next.config.js")) else {
        return CheckOutcome::warning("Could not analyze URL structure");
    };
    if content.contains("trailingSlash") {
        CheckOutcome::pass("URL structure configuration found")
    } else {
        CheckOutcome::info("Using default URL structure")
            .with_recommendation("Consider configuring trailingSlash for consistency")
    }
}

/// Heading hierarchy and a rough word count over the content files.
fn content_optimization(project: &Path) -> CheckOutcome {
    let tag_re = Regex::new(r"<[^>]*>").expect("valid tag regex");
    let mut h1 = 0usize;
    let mut h2 = 0usize;
    let mut words = 0usize;

    for file in fsutil::content_files(project) {
        let Ok(content) = fs::read_to_string(&file) else {
            continue;
        };
        h1 += content.matches("<h1").count();
        h2 += content.matches("<h2").count();
        let text = tag_re.replace_all(&content, " ");
        words += text.split_whitespace().count();
    }

    let mut issues = Vec::new();
    match h1 {
        0 => issues.push("No H1 headings found".to_owned()),
        1 => {}
        n => issues.push(format!("Multiple H1 headings found ({n})")),
    }
    if h2 < 2 {
        issues.push("Consider adding more H2 headings for better structure".to_owned());
    }
    if words < MIN_WORD_COUNT {
        issues.push("Content may be too short for good SEO".to_owned());
    }

    if issues.is_empty() {
        CheckOutcome::pass(format!(
            "Content structure is good ({words} words, proper heading hierarchy)"
        ))
    } else {
        CheckOutcome::warning("Content optimization opportunities found").with_details(issues)
    }
}
