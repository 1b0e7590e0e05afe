//! Category 5: accessibility.
//!
//! Static heuristics only. Because they cannot prove a violation the way
//! a browser audit can, uncertain findings downgrade to warning or info
//! rather than fail.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::fsutil;
use crate::types::{CheckOutcome, NamedCheck};

const MAX_DETAIL_LINES: usize = 3;

pub fn checks(project: &Path) -> Vec<NamedCheck> {
    vec![
        NamedCheck::new("Alt text validation", alt_text(project)),
        NamedCheck::new("ARIA attributes", aria_attributes(project)),
        NamedCheck::new("Color contrast", color_contrast(project)),
        NamedCheck::new("Keyboard navigation", keyboard_navigation(project)),
        NamedCheck::new("Semantic HTML", semantic_html(project)),
        NamedCheck::new("Form accessibility", form_accessibility(project)),
    ]
}

fn alt_text(project: &Path) -> CheckOutcome {
    let img_re = Regex::new(r"<img[^>]*>").expect("valid img regex");
    let mut issues = Vec::new();

    for file in fsutil::html_files(project) {
        let Ok(content) = fs::read_to_string(&file) else {
            continue;
        };
        let name = file_name(&file);
        for tag in img_re.find_iter(&content) {
            if !tag.as_str().contains("alt=") {
                issues.push(format!("{name}: Image missing alt attribute"));
            }
        }
    }

    if issues.is_empty() {
        CheckOutcome::pass("All images have appropriate alt text")
    } else {
        let count = issues.len();
        issues.truncate(MAX_DETAIL_LINES);
        CheckOutcome::warning(format!("{count} images missing alt text")).with_details(issues)
    }
}

fn aria_attributes(project: &Path) -> CheckOutcome {
    let mut aria = 0usize;
    let mut interactive = 0usize;

    for file in fsutil::html_files(project) {
        let Ok(content) = fs::read_to_string(&file) else {
            continue;
        };
        aria += content.matches("aria-").count();
        interactive += content.matches("<button").count();
        interactive += content.matches("<a ").count();
    }

    if aria > 0 {
        CheckOutcome::pass(format!("Good ARIA usage: {aria} attributes found"))
    } else if interactive > 0 {
        CheckOutcome::warning("Consider adding ARIA attributes for better accessibility")
            .with_recommendation(
                "Add aria-label, aria-describedby, or role attributes where appropriate",
            )
    } else {
        CheckOutcome::info("No interactive elements found to evaluate")
    }
}

/// Contrast ratios cannot be computed from class names alone, so a
/// custom palette only earns an advisory.
fn color_contrast(project: &Path) -> CheckOutcome {
    let Ok(content) = fs::read_to_string(project.join("tailwind.config.js")) else {
        return CheckOutcome::warning("Could not analyze color configuration");
    };
    if content.contains("primary") && content.contains("colors") {
        CheckOutcome::info("Custom color scheme detected").with_recommendation(
            "Manually verify color contrast meets WCAG 2.1 AA standards (4.5:1 ratio)",
        )
    } else {
        CheckOutcome::pass("Using default Tailwind colors (generally accessible)")
    }
}

fn keyboard_navigation(project: &Path) -> CheckOutcome {
    let focusable_re = Regex::new(r"<button[^>]*>|<a\s[^>]*href|<input[^>]*>|<select[^>]*>|<textarea[^>]*>")
        .expect("valid focusable regex");
    let mut issues = Vec::new();

    for file in fsutil::html_files(project) {
        let Ok(content) = fs::read_to_string(&file) else {
            continue;
        };
        let focusable = focusable_re.find_iter(&content).count();
        let tab_index = content.matches("tabindex=").count();
        if focusable > 0 && tab_index == 0 {
            issues.push(format!(
                "{}: Consider adding tabindex for better keyboard navigation",
                file_name(&file)
            ));
        }
    }

    if issues.is_empty() {
        CheckOutcome::pass("Keyboard navigation appears to be handled well")
    } else {
        issues.truncate(MAX_DETAIL_LINES);
        CheckOutcome::info("Keyboard navigation could be enhanced")
            .with_details(issues)
            .with_recommendation("Test keyboard navigation manually")
    }
}

fn semantic_html(project: &Path) -> CheckOutcome {
    const SEMANTIC_ELEMENTS: &[&str] = &[
        "header", "nav", "main", "section", "article", "aside", "footer", "h1", "h2", "h3",
        "h4", "h5", "h6",
    ];
    let element_re = Regex::new(r"<[a-zA-Z][^>]*>").expect("valid element regex");

    let mut semantic = 0usize;
    let mut total = 0usize;
    for file in fsutil::html_files(project) {
        let Ok(content) = fs::read_to_string(&file) else {
            continue;
        };
        for element in SEMANTIC_ELEMENTS {
            semantic += content.matches(&format!("<{element}")).count();
        }
        total += element_re.find_iter(&content).count();
    }

    #[allow(clippy::cast_precision_loss)]
    let ratio = if total > 0 {
        semantic as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    if ratio > 30.0 {
        CheckOutcome::pass(format!("Good semantic HTML usage: {ratio:.1}%"))
    } else if ratio > 15.0 {
        CheckOutcome::warning(format!("Moderate semantic HTML usage: {ratio:.1}%"))
            .with_recommendation("Consider using more semantic HTML elements")
    } else {
        CheckOutcome::warning(format!("Low semantic HTML usage: {ratio:.1}%"))
            .with_recommendation(
                "Replace div/span elements with semantic alternatives where appropriate",
            )
    }
}

fn form_accessibility(project: &Path) -> CheckOutcome {
    let input_re = Regex::new(r"<input[^>]*>").expect("valid input regex");
    let mut issues = Vec::new();

    for file in fsutil::html_files(project) {
        let Ok(content) = fs::read_to_string(&file) else {
            continue;
        };
        let name = file_name(&file);
        let inputs: Vec<&str> = input_re.find_iter(&content).map(|m| m.as_str()).collect();

        for input in &inputs {
            if !input.contains("aria-label") && !input.contains("id=") {
                issues.push(format!("{name}: Input missing label or aria-label"));
            }
        }
        if !inputs.is_empty() && !content.contains("<label") {
            issues.push(format!("{name}: Form inputs found but no labels"));
        }
    }

    if issues.is_empty() {
        CheckOutcome::pass("Form accessibility is properly implemented")
    } else {
        let count = issues.len();
        issues.truncate(MAX_DETAIL_LINES);
        CheckOutcome::warning(format!("{count} form accessibility issues found"))
            .with_details(issues)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinicforge_core::CheckStatus;
    use tempfile::tempdir;

    fn write_component(dir: &Path, name: &str, content: &str) {
        fs::create_dir_all(dir.join("components")).expect("mkdir");
        fs::write(dir.join("components").join(name), content).expect("write");
    }

    #[test]
    fn alt_text_flags_images_without_alt() {
        let dir = tempdir().expect("tempdir");
        write_component(
            dir.path(),
            "Hero.tsx",
            "<img src=\"a.jpg\" /><img src=\"b.jpg\" alt=\"clinic\" />",
        );
        let outcome = alt_text(dir.path());
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert!(outcome.message.contains("1 images missing alt text"));
    }

    #[test]
    fn aria_info_when_no_interactive_elements() {
        let dir = tempdir().expect("tempdir");
        write_component(dir.path(), "Text.tsx", "<p>hello</p>");
        assert_eq!(aria_attributes(dir.path()).status, CheckStatus::Info);
    }

    #[test]
    fn aria_warns_on_unlabelled_buttons() {
        let dir = tempdir().expect("tempdir");
        write_component(dir.path(), "CTA.tsx", "<button>Book</button>");
        assert_eq!(aria_attributes(dir.path()).status, CheckStatus::Warning);
    }

    #[test]
    fn semantic_html_never_fails_outright() {
        let dir = tempdir().expect("tempdir");
        write_component(dir.path(), "Soup.tsx", "<div><span>x</span></div>");
        let outcome = semantic_html(dir.path());
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert!(outcome.message.contains("Low semantic HTML usage"));
    }

    #[test]
    fn form_accessibility_flags_missing_labels() {
        let dir = tempdir().expect("tempdir");
        write_component(dir.path(), "Contact.tsx", "<input type=\"text\" />");
        let outcome = form_accessibility(dir.path());
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert_eq!(outcome.details.len(), 2);
    }
}
