//! Category 7: cross-platform readiness.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::fsutil;
use crate::types::{CheckOutcome, NamedCheck};

/// Breakpoint usages below this are treated as token responsive coverage.
const MIN_RESPONSIVE_PATTERNS: usize = 10;

const MOBILE_MARKERS: &[&str] = &["viewport", "apple-touch-icon", "manifest", "theme-color"];

pub fn checks(project: &Path) -> Vec<NamedCheck> {
    vec![
        NamedCheck::new("Responsive design", responsive_design(project)),
        NamedCheck::new("Browser compatibility", browser_compatibility(project)),
        NamedCheck::new("Mobile optimization", mobile_optimization(project)),
        NamedCheck::new("Print styles", print_styles(project)),
    ]
}

fn responsive_design(project: &Path) -> CheckOutcome {
    let breakpoint_re = Regex::new(r"sm:|md:|lg:|xl:|@media").expect("valid breakpoint regex");

    let mut patterns = 0usize;
    let files = fsutil::style_files(project)
        .into_iter()
        .chain(fsutil::component_files(project));
    for file in files {
        if let Ok(content) = fs::read_to_string(&file) {
            patterns += breakpoint_re.find_iter(&content).count();
        }
    }

    if patterns > MIN_RESPONSIVE_PATTERNS {
        CheckOutcome::pass(format!("{patterns} responsive design patterns found"))
    } else if patterns > 0 {
        CheckOutcome::warning("Limited responsive design patterns detected")
            .with_recommendation("Review responsive breakpoint coverage")
    } else {
        CheckOutcome::fail("No responsive design patterns found")
    }
}

fn browser_compatibility(project: &Path) -> CheckOutcome {
    let Ok(content) = fs::read_to_string(project.join("next.config.js")) else {
        return CheckOutcome::info("Using Next.js default browser support");
    };
    if content.contains("browserslist") || content.contains("target") {
        CheckOutcome::pass("Browser compatibility is explicitly configured")
    } else {
        CheckOutcome::info("Relying on Next.js default browser targets")
    }
}

fn mobile_optimization(project: &Path) -> CheckOutcome {
    let Ok(content) = fs::read_to_string(project.join("app/layout.tsx")) else {
        return CheckOutcome::error("Could not read app/layout.tsx for mobile checks");
    };

    let found: Vec<&str> = MOBILE_MARKERS
        .iter()
        .copied()
        .filter(|marker| content.contains(marker))
        .collect();

    if found.len() >= 3 {
        CheckOutcome::pass(format!("{}/{} mobile markers present", found.len(), MOBILE_MARKERS.len()))
    } else if found.is_empty() {
        CheckOutcome::fail("No mobile optimization markers found in layout")
    } else {
        CheckOutcome::warning(format!(
            "Only {}/{} mobile markers present",
            found.len(),
            MOBILE_MARKERS.len()
        ))
        .with_recommendation("Add viewport, manifest and touch icon metadata to the root layout")
    }
}

fn print_styles(project: &Path) -> CheckOutcome {
    let print_re = Regex::new(r"@media print|print:").expect("valid print regex");
    let has_print = fsutil::style_files(project).into_iter().any(|file| {
        fs::read_to_string(&file)
            .map(|content| print_re.is_match(&content))
            .unwrap_or(false)
    });

    if has_print {
        CheckOutcome::pass("Print styles are defined")
    } else {
        CheckOutcome::info("No print styles defined")
    }
}
