//! Category 8: third-party integration readiness.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::fsutil;
use crate::types::{CheckOutcome, NamedCheck};

/// Distinct social-network mentions above this count as deliberate coverage.
const MIN_SOCIAL_MENTIONS: usize = 5;

pub fn checks(project: &Path) -> Vec<NamedCheck> {
    vec![
        NamedCheck::new("Contact form integration", contact_form(project)),
        NamedCheck::new("Booking system", booking_system(project)),
        NamedCheck::new("Analytics integration", analytics(project)),
        NamedCheck::new("Social media links", social_media(project)),
    ]
}

fn contact_form(project: &Path) -> CheckOutcome {
    let form_re = Regex::new(r"<form|onSubmit").expect("valid form regex");
    let handler_re = Regex::new(r"action=|fetch\(|axios").expect("valid handler regex");

    let mut has_form = false;
    let mut has_handler = false;
    for file in fsutil::component_files(project) {
        let Ok(content) = fs::read_to_string(&file) else {
            continue;
        };
        has_form = has_form || form_re.is_match(&content);
        has_handler = has_handler || handler_re.is_match(&content);
    }

    if has_form && has_handler {
        CheckOutcome::pass("Contact form with submission handling found")
    } else if has_form {
        CheckOutcome::warning("Contact form found but no submission handler detected")
            .with_recommendation("Wire the contact form to an API route or form service")
    } else {
        CheckOutcome::info("No contact form components found")
    }
}

fn booking_system(project: &Path) -> CheckOutcome {
    let Ok(content) = fs::read_to_string(project.join("config/booking.ts")) else {
        return CheckOutcome::warning("Booking configuration file not found")
            .with_recommendation("Add config/booking.ts with the clinic booking link");
    };

    if content.contains("link.leadballoon.co.uk") {
        CheckOutcome::warning("Booking link still points at the placeholder URL")
            .with_recommendation("Replace the placeholder booking URL with the clinic's own link")
    } else if content.contains("http") {
        CheckOutcome::pass("Booking link is configured")
    } else {
        CheckOutcome::warning("Booking configuration is incomplete")
            .with_recommendation("Set a booking URL in config/booking.ts")
    }
}

fn analytics(project: &Path) -> CheckOutcome {
    let analytics_re = Regex::new(r"gtag|analytics|GA_").expect("valid analytics regex");
    let configured = fsutil::all_files(project).into_iter().any(|file| {
        fs::read_to_string(&file)
            .map(|content| analytics_re.is_match(&content))
            .unwrap_or(false)
    });

    if configured {
        CheckOutcome::pass("Analytics integration detected")
    } else {
        CheckOutcome::info("No analytics integration found")
            .with_recommendation("Consider adding Google Analytics before launch")
    }
}

fn social_media(project: &Path) -> CheckOutcome {
    let social_re =
        Regex::new(r"(?i)facebook|instagram|twitter|linkedin|whatsapp").expect("valid social regex");

    let mut mentions = 0usize;
    for file in fsutil::all_files(project) {
        if let Ok(content) = fs::read_to_string(&file) {
            mentions += social_re.find_iter(&content).count();
        }
    }

    if mentions > MIN_SOCIAL_MENTIONS {
        CheckOutcome::pass(format!("{mentions} social media references found"))
    } else if mentions > 0 {
        CheckOutcome::info(format!("{mentions} social media references found"))
    } else {
        CheckOutcome::info("No social media links found")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinicforge_core::CheckStatus;
    use tempfile::tempdir;

    #[test]
    fn contact_form_warns_without_handler() {
        let dir = tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("components")).expect("mkdir");
        fs::write(
            dir.path().join("components/Contact.tsx"),
            "<form><input /></form>",
        )
        .expect("write");
        assert_eq!(contact_form(dir.path()).status, CheckStatus::Warning);
    }

    #[test]
    fn contact_form_passes_with_fetch_handler() {
        let dir = tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("components")).expect("mkdir");
        fs::write(
            dir.path().join("components/Contact.tsx"),
            "<form onSubmit={submit}>..</form> fetch('/api/contact')",
        )
        .expect("write");
        assert_eq!(contact_form(dir.path()).status, CheckStatus::Pass);
    }

    #[test]
    fn booking_system_flags_placeholder_url() {
        let dir = tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("config")).expect("mkdir");
        fs::write(
            dir.path().join("config/booking.ts"),
            "export const bookingUrl = 'https://link.leadballoon.co.uk/widget/form';",
        )
        .expect("write");
        let outcome = booking_system(dir.path());
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert!(outcome.message.contains("placeholder"));
    }

    #[test]
    fn booking_system_passes_real_url() {
        let dir = tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("config")).expect("mkdir");
        fs::write(
            dir.path().join("config/booking.ts"),
            "export const bookingUrl = 'https://bookings.acmeclinic.co.uk';",
        )
        .expect("write");
        assert_eq!(booking_system(dir.path()).status, CheckStatus::Pass);
    }

    #[test]
    fn social_media_counts_mentions_across_files() {
        let dir = tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("components")).expect("mkdir");
        fs::write(
            dir.path().join("components/Footer.tsx"),
            "Facebook Instagram Twitter LinkedIn WhatsApp Facebook",
        )
        .expect("write");
        let outcome = social_media(dir.path());
        assert_eq!(outcome.status, CheckStatus::Pass);
        assert!(outcome.message.contains("6 social media references"));
    }
}
