//! Post-customization verification: file integrity, residual placeholders,
//! and shallow component syntax checks.

use std::fs;
use std::path::Path;

use clinicforge_core::{CheckStatus, QualityCheck};

use crate::placeholders::RESIDUAL_PLACEHOLDERS;

const REQUIRED_FILES: &[&str] = &[
    "package.json",
    "app/layout.tsx",
    "components/Footer.tsx",
    "components/CTASection.tsx",
    "components/TeamSection.tsx",
];

const PLACEHOLDER_SCAN_FILES: &[&str] = &[
    "app/layout.tsx",
    "components/Footer.tsx",
    "components/CTASection.tsx",
];

const COMPONENT_FILES: &[&str] = &[
    "components/Footer.tsx",
    "components/CTASection.tsx",
    "components/TeamSection.tsx",
];

/// Runs all verification checks over a customized output directory.
#[must_use]
pub fn verify(output_dir: &Path) -> Vec<QualityCheck> {
    let mut checks = Vec::new();
    check_required_files(output_dir, &mut checks);
    check_residual_placeholders(output_dir, &mut checks);
    check_component_syntax(output_dir, &mut checks);
    checks
}

fn check_required_files(output_dir: &Path, checks: &mut Vec<QualityCheck>) {
    for file in REQUIRED_FILES {
        let status = if output_dir.join(file).is_file() {
            (CheckStatus::Pass, "File exists and accessible")
        } else {
            (CheckStatus::Fail, "Required file missing or inaccessible")
        };
        checks.push(QualityCheck {
            kind: "file_check".to_owned(),
            file: Some((*file).to_owned()),
            status: status.0,
            message: status.1.to_owned(),
        });
    }
}

/// Each placeholder still present in a scanned file is a warning. A stuck
/// placeholder means the extractor had no value for that field; the
/// substitution layer deliberately leaves the literal text for this scan
/// to find.
fn check_residual_placeholders(output_dir: &Path, checks: &mut Vec<QualityCheck>) {
    for file in PLACEHOLDER_SCAN_FILES {
        let Ok(content) = fs::read_to_string(output_dir.join(file)) else {
            continue; // absence already reported by the file check
        };
        for placeholder in RESIDUAL_PLACEHOLDERS {
            if content.contains(placeholder) {
                checks.push(QualityCheck {
                    kind: "placeholder_check".to_owned(),
                    file: Some((*file).to_owned()),
                    status: CheckStatus::Warning,
                    message: format!("Placeholder \"{placeholder}\" still present"),
                });
            }
        }
    }
}

/// Brace and parenthesis balance. A blunt proxy for syntax validity, but it
/// catches truncated writes without needing a TypeScript toolchain here.
fn check_component_syntax(output_dir: &Path, checks: &mut Vec<QualityCheck>) {
    for file in COMPONENT_FILES {
        let Ok(content) = fs::read_to_string(output_dir.join(file)) else {
            continue;
        };
        let braces_balanced =
            content.matches('{').count() == content.matches('}').count();
        let parens_balanced =
            content.matches('(').count() == content.matches(')').count();

        let (status, message) = if !braces_balanced {
            (CheckStatus::Fail, "Mismatched braces detected")
        } else if !parens_balanced {
            (CheckStatus::Fail, "Mismatched parentheses detected")
        } else {
            (CheckStatus::Pass, "Basic syntax validation passed")
        };
        checks.push(QualityCheck {
            kind: "syntax_check".to_owned(),
            file: Some((*file).to_owned()),
            status,
            message: message.to_owned(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, content).expect("write");
    }

    fn scaffold(dir: &Path) {
        write(dir, "package.json", "{}");
        write(dir, "app/layout.tsx", "export default function Layout() {}");
        write(dir, "components/Footer.tsx", "export function Footer() {}");
        write(dir, "components/CTASection.tsx", "export function CTA() {}");
        write(dir, "components/TeamSection.tsx", "export function Team() {}");
    }

    #[test]
    fn verify_passes_clean_output() {
        let tmp = tempdir().expect("tempdir");
        scaffold(tmp.path());
        let checks = verify(tmp.path());
        assert!(checks.iter().all(|c| c.status == CheckStatus::Pass));
    }

    #[test]
    fn verify_fails_missing_required_file() {
        let tmp = tempdir().expect("tempdir");
        scaffold(tmp.path());
        fs::remove_file(tmp.path().join("components/Footer.tsx")).expect("rm");
        let checks = verify(tmp.path());
        assert!(checks.iter().any(|c| c.status == CheckStatus::Fail
            && c.file.as_deref() == Some("components/Footer.tsx")));
    }

    #[test]
    fn verify_warns_on_residual_placeholder() {
        let tmp = tempdir().expect("tempdir");
        scaffold(tmp.path());
        write(
            tmp.path(),
            "components/Footer.tsx",
            "export function Footer() { return 'Your Clinic Name' }",
        );
        let checks = verify(tmp.path());
        assert!(checks.iter().any(|c| c.kind == "placeholder_check"
            && c.status == CheckStatus::Warning
            && c.message.contains("Your Clinic Name")));
    }

    #[test]
    fn verify_fails_unbalanced_braces() {
        let tmp = tempdir().expect("tempdir");
        scaffold(tmp.path());
        write(tmp.path(), "components/CTASection.tsx", "function CTA() {");
        let checks = verify(tmp.path());
        assert!(checks.iter().any(|c| c.kind == "syntax_check"
            && c.status == CheckStatus::Fail
            && c.message.contains("braces")));
    }
}
