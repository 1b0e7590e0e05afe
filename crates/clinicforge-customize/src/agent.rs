//! Template customization: copy, substitute, and record what happened.

use std::fs;
use std::path::{Path, PathBuf};

use clinicforge_core::{ClinicData, CustomizationChange, ManualReviewItem, Priority};

use crate::error::{io_err, CustomizeError};
use crate::placeholders::{self, Substitution};

/// Target files under the output directory.
const LAYOUT_FILE: &str = "app/layout.tsx";
const FOOTER_FILE: &str = "components/Footer.tsx";
const CTA_FILE: &str = "components/CTASection.tsx";
const TEAM_FILE: &str = "components/TeamSection.tsx";
const HERO_FILE: &str = "components/HeroSection.tsx";
const BOOKING_FILE: &str = "config/booking.ts";
const PACKAGE_FILE: &str = "package.json";

/// What one customization run produced.
#[derive(Debug)]
pub struct CustomizationOutcome {
    pub output_dir: PathBuf,
    pub changes: Vec<CustomizationChange>,
    pub manual_review: Vec<ManualReviewItem>,
}

/// Copies the template and rewrites the fixed target-file list.
pub struct CustomizationAgent {
    template_path: PathBuf,
    output_root: PathBuf,
}

impl CustomizationAgent {
    #[must_use]
    pub fn new(template_path: PathBuf, output_root: PathBuf) -> Self {
        Self {
            template_path,
            output_root,
        }
    }

    /// Runs customization for `data`, optionally overriding the clinic name
    /// used for the output directory.
    ///
    /// A failure partway through leaves the partially customized directory
    /// on disk for inspection; nothing is rolled back.
    ///
    /// # Errors
    ///
    /// Returns `CustomizeError` when the template is missing, a required
    /// target file is absent, or a file operation fails. Optional target
    /// files (hero section, booking config) are skipped with a notice.
    pub fn customize(
        &self,
        data: &ClinicData,
        name_override: Option<&str>,
    ) -> Result<CustomizationOutcome, CustomizeError> {
        if !self.template_path.is_dir() {
            return Err(CustomizeError::TemplateNotFound(self.template_path.clone()));
        }

        let clinic_name = name_override
            .map(str::to_owned)
            .or_else(|| data.business.name.clone())
            .unwrap_or_else(|| "New Clinic".to_owned());
        let output_dir = self.output_root.join(output_dir_name(&clinic_name));

        tracing::info!(output_dir = %output_dir.display(), "copying template");
        copy_directory(&self.template_path, &output_dir)?;

        let mut changes = Vec::new();
        let mut manual_review = review_items(data);

        self.substitute_required(
            &output_dir,
            LAYOUT_FILE,
            &placeholders::layout_substitutions(data),
            "Updated metadata, schema markup, and contact information",
            &mut changes,
        )?;
        self.substitute_required(
            &output_dir,
            FOOTER_FILE,
            &placeholders::footer_substitutions(data),
            "Updated footer contact information and clinic name",
            &mut changes,
        )?;
        self.substitute_required(
            &output_dir,
            CTA_FILE,
            &placeholders::cta_substitutions(data),
            "Updated CTA section contact information",
            &mut changes,
        )?;

        let team_subs = placeholders::team_substitutions(data);
        if team_subs.is_empty() {
            manual_review.push(ManualReviewItem {
                kind: "customization_needed".to_owned(),
                field: "Team Section".to_owned(),
                message: format!(
                    "No team member data found - requires manual update of {TEAM_FILE}"
                ),
                priority: Priority::Medium,
            });
        } else {
            self.substitute_required(
                &output_dir,
                TEAM_FILE,
                &team_subs,
                "Updated team member information with clinic data",
                &mut changes,
            )?;
        }

        self.customize_hero(&output_dir, data, &mut changes)?;
        self.note_booking_config(&output_dir, &mut changes, &mut manual_review);
        customize_package_json(&output_dir, &clinic_name, &mut changes)?;

        tracing::info!(
            files = changes.len(),
            review_items = manual_review.len(),
            "template customization completed"
        );

        Ok(CustomizationOutcome {
            output_dir,
            changes,
            manual_review,
        })
    }

    fn substitute_required(
        &self,
        output_dir: &Path,
        relative: &str,
        substitutions: &[Substitution],
        description: &str,
        changes: &mut Vec<CustomizationChange>,
    ) -> Result<(), CustomizeError> {
        let path = output_dir.join(relative);
        if !path.is_file() {
            return Err(CustomizeError::RequiredFileMissing(path));
        }
        let content = fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        let (rewritten, changed) = placeholders::apply(&content, substitutions);
        fs::write(&path, rewritten).map_err(|e| io_err(&path, e))?;
        changes.push(CustomizationChange {
            file: relative.to_owned(),
            changes: changed,
            description: description.to_owned(),
        });
        Ok(())
    }

    /// Hero section is optional across template variants: absence is a
    /// logged skip, not an error.
    fn customize_hero(
        &self,
        output_dir: &Path,
        data: &ClinicData,
        changes: &mut Vec<CustomizationChange>,
    ) -> Result<(), CustomizeError> {
        let path = output_dir.join(HERO_FILE);
        if !path.is_file() {
            tracing::info!(file = HERO_FILE, "not found in template, skipping");
            return Ok(());
        }
        let Some(city) = data.location.city.as_deref() else {
            return Ok(());
        };
        let content = fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        let subs = [
            ("London", city.to_owned()),
            ("Marylebone", city.to_owned()),
        ];
        let mut rewritten = content;
        let mut changed = 0;
        for (key, value) in &subs {
            if rewritten.contains(key) && value != key {
                rewritten = rewritten.replace(key, value);
                changed += 1;
            }
        }
        fs::write(&path, rewritten).map_err(|e| io_err(&path, e))?;
        changes.push(CustomizationChange {
            file: HERO_FILE.to_owned(),
            changes: changed,
            description: "Updated location references in hero section".to_owned(),
        });
        Ok(())
    }

    /// The booking URL cannot be scraped; it always goes to manual review.
    fn note_booking_config(
        &self,
        output_dir: &Path,
        changes: &mut Vec<CustomizationChange>,
        manual_review: &mut Vec<ManualReviewItem>,
    ) {
        let path = output_dir.join(BOOKING_FILE);
        if !path.is_file() {
            tracing::info!(file = BOOKING_FILE, "not found in template, skipping");
            return;
        }
        manual_review.push(ManualReviewItem {
            kind: "configuration_needed".to_owned(),
            field: "Booking Configuration".to_owned(),
            message: format!(
                "Update GHL_BOOKING_URL in {BOOKING_FILE} with client's booking system URL"
            ),
            priority: Priority::High,
        });
        changes.push(CustomizationChange {
            file: BOOKING_FILE.to_owned(),
            changes: 0,
            description: "Booking configuration requires manual URL update".to_owned(),
        });
    }
}

/// `<sanitized-name>-co2-laser-site`: non-alphanumerics become `-`,
/// lowercased.
#[must_use]
pub fn output_dir_name(clinic_name: &str) -> String {
    let sanitized: String = clinic_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("{}-co2-laser-site", sanitized.to_lowercase())
}

/// Required-field and format policy over extracted data. Pattern misses
/// become review items here, not errors anywhere else.
#[must_use]
pub fn review_items(data: &ClinicData) -> Vec<ManualReviewItem> {
    let mut items = Vec::new();

    let required: [(&str, bool); 4] = [
        ("Business Name", data.business.name.is_some()),
        ("Phone Number", data.contact.phone.is_some()),
        ("Email Address", data.contact.email.is_some()),
        (
            "Location",
            data.contact.address.is_some() || data.location.city.is_some(),
        ),
    ];
    for (field, present) in required {
        if !present {
            items.push(ManualReviewItem {
                kind: "missing_required".to_owned(),
                field: field.to_owned(),
                message: format!("{field} not found - requires manual input"),
                priority: Priority::High,
            });
        }
    }

    if let Some(phone) = data.contact.phone.as_deref() {
        if !(phone.starts_with("+44") || phone.starts_with("44")) {
            items.push(ManualReviewItem {
                kind: "validation_warning".to_owned(),
                field: "Phone Number".to_owned(),
                message: "Phone number may not be UK format".to_owned(),
                priority: Priority::Medium,
            });
        }
    }
    if let Some(email) = data.contact.email.as_deref() {
        if !email.contains('@') {
            items.push(ManualReviewItem {
                kind: "validation_error".to_owned(),
                field: "Email Address".to_owned(),
                message: "Invalid email format detected".to_owned(),
                priority: Priority::High,
            });
        }
    }

    items
}

/// Structural edit of `package.json` via `serde_json`: project name and
/// description only, everything else preserved.
fn customize_package_json(
    output_dir: &Path,
    clinic_name: &str,
    changes: &mut Vec<CustomizationChange>,
) -> Result<(), CustomizeError> {
    let path = output_dir.join(PACKAGE_FILE);
    if !path.is_file() {
        return Err(CustomizeError::RequiredFileMissing(path));
    }
    let content = fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    let mut manifest: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| CustomizeError::Json {
            path: path.clone(),
            source: e,
        })?;

    manifest["name"] = serde_json::Value::String(output_dir_name(clinic_name));
    manifest["description"] = serde_json::Value::String(format!(
        "CO2 Laser treatment website for {clinic_name}"
    ));

    let rendered =
        serde_json::to_string_pretty(&manifest).map_err(|e| CustomizeError::Json {
            path: path.clone(),
            source: e,
        })?;
    fs::write(&path, rendered).map_err(|e| io_err(&path, e))?;

    changes.push(CustomizationChange {
        file: PACKAGE_FILE.to_owned(),
        changes: 2,
        description: "Updated project name and description".to_owned(),
    });
    Ok(())
}

/// Recursive copy; existing destination files are overwritten.
fn copy_directory(src: &Path, dest: &Path) -> Result<(), CustomizeError> {
    fs::create_dir_all(dest).map_err(|e| io_err(dest, e))?;
    let entries = fs::read_dir(src).map_err(|e| io_err(src, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(src, e))?;
        let target = dest.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| io_err(&entry.path(), e))?;
        if file_type.is_dir() {
            copy_directory(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| io_err(&target, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dir_name_sanitizes_and_lowercases() {
        assert_eq!(output_dir_name("Acme Clinic"), "acme-clinic-co2-laser-site");
        assert_eq!(
            output_dir_name("Dr. Jane's Skin & Laser"),
            "dr--jane-s-skin---laser-co2-laser-site"
        );
    }

    #[test]
    fn review_items_flags_all_missing_required_fields() {
        let items = review_items(&ClinicData::default());
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|i| i.kind == "missing_required"));
        assert!(items.iter().all(|i| i.priority == Priority::High));
    }

    #[test]
    fn review_items_flags_non_uk_phone_as_medium() {
        let mut data = ClinicData::default();
        data.contact.phone = Some("+15550100200".to_owned());
        let items = review_items(&data);
        assert!(items
            .iter()
            .any(|i| i.kind == "validation_warning" && i.priority == Priority::Medium));
    }

    #[test]
    fn review_items_accepts_uk_phone() {
        let mut data = ClinicData::default();
        data.contact.phone = Some("+447911123456".to_owned());
        let items = review_items(&data);
        assert!(!items.iter().any(|i| i.kind == "validation_warning"));
    }

    #[test]
    fn review_items_location_satisfied_by_city_alone() {
        let mut data = ClinicData::default();
        data.location.city = Some("Leeds".to_owned());
        let items = review_items(&data);
        assert!(!items.iter().any(|i| i.field == "Location"));
    }
}
