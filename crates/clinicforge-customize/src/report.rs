//! Customization report artifacts.
//!
//! One machine-readable JSON report plus four Markdown documents, all under
//! `customization-reports/` inside the output directory. Content between the
//! JSON and Markdown pair is the same data re-rendered as prose.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use clinicforge_core::{
    report, CheckStatus, ClinicData, CustomizationChange, ManualReviewItem, Priority, QualityCheck,
};

use crate::error::CustomizeError;

const REPORT_DIR: &str = "customization-reports";

#[derive(Debug, Serialize)]
pub struct CustomizationReport<'a> {
    pub timestamp: DateTime<Utc>,
    pub extracted_data: &'a ClinicData,
    pub customizations: &'a [CustomizationChange],
    pub manual_review: &'a [ManualReviewItem],
    pub quality_checks: &'a [QualityCheck],
    pub summary: ReportSummary,
}

#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub total_files: usize,
    pub total_changes: usize,
    pub data_completeness: u8,
}

impl<'a> CustomizationReport<'a> {
    #[must_use]
    pub fn new(
        extracted_data: &'a ClinicData,
        customizations: &'a [CustomizationChange],
        manual_review: &'a [ManualReviewItem],
        quality_checks: &'a [QualityCheck],
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            extracted_data,
            customizations,
            manual_review,
            quality_checks,
            summary: ReportSummary {
                total_files: customizations.len(),
                total_changes: customizations.iter().map(|c| c.changes).sum(),
                data_completeness: extracted_data.data_completeness(),
            },
        }
    }
}

/// Writes the full report set and returns the report directory.
///
/// # Errors
///
/// Returns `CustomizeError::Report` if any artifact cannot be written.
pub fn write_reports(
    output_dir: &Path,
    report_data: &CustomizationReport<'_>,
) -> Result<PathBuf, CustomizeError> {
    let dir = output_dir.join(REPORT_DIR);
    report::write_json(&dir, "customization-report.json", report_data)?;
    report::write_markdown(&dir, "CUSTOMIZATION-REPORT.md", &render_report(report_data))?;
    report::write_markdown(
        &dir,
        "MANUAL-REVIEW-CHECKLIST.md",
        &render_checklist(report_data.manual_review),
    )?;
    report::write_markdown(&dir, "DEPLOYMENT-GUIDE.md", DEPLOYMENT_GUIDE)?;
    report::write_markdown(
        &dir,
        "QUALITY-REPORT.md",
        &render_quality(report_data.quality_checks),
    )?;
    Ok(dir)
}

fn or_not_found(value: Option<&str>) -> &str {
    value.unwrap_or("Not found")
}

fn render_report(report: &CustomizationReport<'_>) -> String {
    let data = report.extracted_data;
    let mut md = String::new();
    let _ = writeln!(md, "# CO2 Laser Template Customization Report\n");
    let _ = writeln!(md, "## Summary");
    let _ = writeln!(
        md,
        "- **Customization Date**: {}",
        report.timestamp.format("%Y-%m-%d")
    );
    let _ = writeln!(md, "- **Files Modified**: {}", report.summary.total_files);
    let _ = writeln!(md, "- **Total Changes**: {}", report.summary.total_changes);
    let _ = writeln!(
        md,
        "- **Data Completeness**: {}%\n",
        report.summary.data_completeness
    );

    let _ = writeln!(md, "## Extracted Data\n");
    let _ = writeln!(md, "### Business Information");
    let _ = writeln!(md, "- **Name**: {}", or_not_found(data.business.name.as_deref()));
    let _ = writeln!(
        md,
        "- **Tagline**: {}",
        or_not_found(data.business.tagline.as_deref())
    );
    let _ = writeln!(
        md,
        "- **Description**: {}",
        or_not_found(data.business.description.as_deref())
    );
    let _ = writeln!(
        md,
        "- **Years Established**: {}\n",
        data.business
            .years_established
            .map_or_else(|| "Not found".to_owned(), |y| y.to_string())
    );

    let _ = writeln!(md, "### Contact Information");
    let _ = writeln!(md, "- **Phone**: {}", or_not_found(data.contact.phone.as_deref()));
    let _ = writeln!(md, "- **Email**: {}", or_not_found(data.contact.email.as_deref()));
    let _ = writeln!(
        md,
        "- **Address**: {}",
        or_not_found(data.contact.address.as_deref())
    );
    let _ = writeln!(
        md,
        "- **Postcode**: {}",
        or_not_found(data.contact.postcode.as_deref())
    );
    let _ = writeln!(
        md,
        "- **Website**: {}\n",
        or_not_found(data.contact.website.as_deref())
    );

    let _ = writeln!(md, "### Location");
    let _ = writeln!(md, "- **City**: {}", or_not_found(data.location.city.as_deref()));
    let _ = writeln!(
        md,
        "- **Region**: {}",
        or_not_found(data.location.region.as_deref())
    );
    let _ = writeln!(
        md,
        "- **Country**: {}\n",
        or_not_found(data.location.country.as_deref())
    );

    let _ = writeln!(md, "### Team Information");
    let _ = writeln!(
        md,
        "- **Team Members Found**: {}",
        data.team.members.len()
    );
    if data.team.members.is_empty() {
        let _ = writeln!(md, "  - None found");
    } else {
        for member in &data.team.members {
            let _ = writeln!(md, "  - {} - {}", member.name, member.title);
        }
    }
    let _ = writeln!(md);

    let _ = writeln!(md, "### Services & Treatments");
    let _ = writeln!(
        md,
        "- **Treatments Found**: {}",
        data.services.treatments.len()
    );
    if data.services.treatments.is_empty() {
        let _ = writeln!(md, "  - None found");
    } else {
        for treatment in &data.services.treatments {
            let _ = writeln!(md, "  - {treatment}");
        }
    }
    let _ = writeln!(md);

    let _ = writeln!(md, "### Branding");
    let _ = writeln!(
        md,
        "- **Logo URL**: {}",
        or_not_found(data.branding.logo_url.as_deref())
    );
    let _ = writeln!(
        md,
        "- **Brand Voice**: {}\n",
        data.branding
            .brand_voice
            .as_ref()
            .map_or_else(|| "Not analyzed".to_owned(), |v| v.tone.to_string())
    );

    let _ = writeln!(md, "### Social Proof");
    let reviews = data.social_proof.reviews.as_ref();
    let _ = writeln!(
        md,
        "- **Reviews Rating**: {}",
        reviews
            .and_then(|r| r.rating)
            .map_or_else(|| "Not found".to_owned(), |r| r.to_string())
    );
    let _ = writeln!(
        md,
        "- **Reviews Count**: {}",
        reviews
            .and_then(|r| r.count)
            .map_or_else(|| "Not found".to_owned(), |c| c.to_string())
    );
    let _ = writeln!(
        md,
        "- **Testimonials Found**: {}\n",
        data.social_proof.testimonials.len()
    );

    let _ = writeln!(md, "## File Modifications\n");
    for change in report.customizations {
        let _ = writeln!(md, "### {}", change.file);
        let _ = writeln!(md, "- **Changes Made**: {}", change.changes);
        let _ = writeln!(md, "- **Description**: {}\n", change.description);
    }

    let _ = writeln!(md, "## Manual Review Required");
    if report.manual_review.is_empty() {
        let _ = writeln!(md, "- No manual review items");
    } else {
        for item in report.manual_review {
            let _ = writeln!(md, "- **{}** ({}): {}", item.field, item.priority, item.message);
        }
    }

    let _ = writeln!(md, "\n## Next Steps");
    let _ = writeln!(md, "1. Review all manual review items listed above");
    let _ = writeln!(md, "2. Test the customized website locally");
    let _ = writeln!(
        md,
        "3. Update booking configuration with client's actual booking URL"
    );
    let _ = writeln!(md, "4. Review and replace placeholder images");
    let _ = writeln!(md, "5. Test all contact forms and CTAs");
    let _ = writeln!(md, "6. Deploy to staging environment for client review");
    md
}

fn render_checklist(items: &[ManualReviewItem]) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# Manual Review Checklist\n");
    for (heading, priority) in [
        ("High Priority Items", Priority::High),
        ("Medium Priority Items", Priority::Medium),
        ("Low Priority Items", Priority::Low),
    ] {
        let _ = writeln!(md, "## {heading}");
        let mut any = false;
        for item in items.iter().filter(|i| i.priority == priority) {
            let _ = writeln!(md, "- [ ] **{}**: {}", item.field, item.message);
            any = true;
        }
        if !any {
            let _ = writeln!(md, "- No {} priority items", priority);
        }
        let _ = writeln!(md);
    }

    md.push_str(
        "## Additional Manual Tasks\n\
         - [ ] Update booking configuration in `config/booking.ts`\n\
         - [ ] Replace placeholder images in `public/images/`\n\
         - [ ] Update social media links if available\n\
         - [ ] Review and customize treatment pricing\n\
         - [ ] Test contact forms and booking integration\n\
         - [ ] Review SEO metadata for accuracy\n\
         - [ ] Test responsive design on mobile devices\n\
         - [ ] Update privacy policy with clinic details\n\
         - [ ] Set up analytics tracking\n\
         - [ ] Configure domain and hosting\n",
    );
    md
}

fn render_quality(checks: &[QualityCheck]) -> String {
    let passed = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Pass)
        .count();
    let total = checks.len();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = if total == 0 {
        100
    } else {
        (passed as f64 / total as f64 * 100.0).round() as u32
    };

    let mut md = String::new();
    let _ = writeln!(md, "# Quality Assurance Report\n");
    let _ = writeln!(
        md,
        "## Overall Score: {score}% ({passed}/{total} checks passed)\n"
    );
    let _ = writeln!(md, "## Quality Checks\n");
    for check in checks {
        let _ = writeln!(
            md,
            "### {}",
            check.file.as_deref().unwrap_or(&check.kind)
        );
        let _ = writeln!(md, "- **Status**: {}", check.status.to_string().to_uppercase());
        let _ = writeln!(md, "- **Message**: {}\n", check.message);
    }

    let _ = writeln!(md, "## Recommendations");
    let recommendation = if score >= 90 {
        "Excellent quality - ready for deployment"
    } else if score >= 70 {
        "Good quality - address warnings before deployment"
    } else {
        "Poor quality - requires fixes before deployment"
    };
    let _ = writeln!(md, "{recommendation}");
    md
}

const DEPLOYMENT_GUIDE: &str = "# Deployment Guide\n\n\
## Prerequisites\n\
- Node.js 18+ installed\n\
- Git repository set up\n\
- Hosting platform account (Vercel, Netlify, etc.)\n\n\
## Local Setup\n\
1. Navigate to the customized template directory\n\
2. Install dependencies: `npm install`\n\
3. Start development server: `npm run dev`\n\
4. Open http://localhost:3000 to preview\n\n\
## Pre-Deployment Checklist\n\
- [ ] Complete all manual review items\n\
- [ ] Update booking configuration\n\
- [ ] Replace placeholder images\n\
- [ ] Test all contact forms\n\
- [ ] Review mobile responsiveness\n\
- [ ] Update privacy policy\n\
- [ ] Set up domain and SSL\n\n\
## Vercel Deployment\n\
1. Connect Git repository to Vercel\n\
2. Configure build settings: build command `npm run build`, output `.next`\n\
3. Set environment variables if needed\n\
4. Deploy and test\n\n\
## Domain Configuration\n\
1. Add custom domain in hosting platform\n\
2. Update DNS records (A record to hosting IP, CNAME for www)\n\
3. Enable SSL certificate\n\
4. Test domain propagation\n\n\
## Post-Deployment\n\
- [ ] Test all functionality on live site\n\
- [ ] Submit sitemap to Google Search Console\n\
- [ ] Test booking integration\n\
- [ ] Monitor site performance\n";
