//! Category 3: performance.
//!
//! The production build runs once and feeds both the bundle-size and
//! build-time checks.

use std::path::Path;
use std::time::{Duration, Instant};

use crate::command;
use crate::fsutil;
use crate::types::{CheckOutcome, NamedCheck};

const MAX_BUNDLE_BYTES: u64 = 2_000_000;
const MAX_IMAGE_BYTES: u64 = 500_000;
const MAX_PUBLIC_BYTES: u64 = 10_000_000;
const MAX_BUILD_TIME: Duration = Duration::from_secs(60);

pub async fn checks(project: &Path) -> Vec<NamedCheck> {
    let build = run_build(project).await;
    vec![
        NamedCheck::new("Bundle size analysis", bundle_size(project, &build)),
        NamedCheck::new("Image optimization", image_optimization(project)),
        NamedCheck::new("Code splitting", code_splitting(project)),
        NamedCheck::new("Static asset optimization", static_assets(project)),
        NamedCheck::new("Build performance", build_performance(&build)),
    ]
}

struct BuildRun {
    succeeded: bool,
    elapsed: Duration,
}

async fn run_build(project: &Path) -> BuildRun {
    let start = Instant::now();
    let succeeded = match command::run("npm", &["run", "build"], project).await {
        Ok(out) => out.success,
        Err(err) => {
            tracing::warn!(%err, "could not spawn npm run build");
            false
        }
    };
    BuildRun {
        succeeded,
        elapsed: start.elapsed(),
    }
}

fn bundle_size(project: &Path, build: &BuildRun) -> CheckOutcome {
    if !build.succeeded {
        return CheckOutcome::error("Could not analyze bundle size");
    }
    let size = fsutil::dir_size(&project.join(".next"));
    if size > MAX_BUNDLE_BYTES {
        CheckOutcome::warning(format!(
            "Bundle size is large: {}",
            fsutil::format_bytes(size)
        ))
        .with_recommendation("Consider code splitting and tree shaking optimizations")
    } else {
        CheckOutcome::pass(format!(
            "Bundle size is optimal: {}",
            fsutil::format_bytes(size)
        ))
    }
}

fn image_optimization(project: &Path) -> CheckOutcome {
    let images_dir = project.join("public").join("images");
    if !images_dir.is_dir() {
        return CheckOutcome::warning("Could not analyze image optimization");
    }

    let images = fsutil::image_files(&images_dir);
    if images.is_empty() {
        return CheckOutcome::warning("Could not analyze image optimization");
    }

    let mut total: u64 = 0;
    let mut unoptimized = 0usize;
    for image in &images {
        let size = std::fs::metadata(image).map_or(0, |m| m.len());
        total += size;
        if size > MAX_IMAGE_BYTES {
            unoptimized += 1;
        }
    }

    if unoptimized == 0 {
        let average = total / images.len() as u64;
        CheckOutcome::pass(format!(
            "All {} images are optimized (avg: {})",
            images.len(),
            fsutil::format_bytes(average)
        ))
    } else {
        CheckOutcome::warning(format!(
            "{unoptimized}/{} images need optimization",
            images.len()
        ))
        .with_recommendation("Compress large images or convert to WebP format")
    }
}

fn code_splitting(project: &Path) -> CheckOutcome {
    let Ok(content) = std::fs::read_to_string(project.join("next.config.js")) else {
        return CheckOutcome::warning("Could not analyze code splitting configuration");
    };
    if content.contains("splitChunks") || content.contains("experimental") {
        CheckOutcome::pass("Code splitting is configured")
    } else {
        CheckOutcome::info("Default code splitting in use")
            .with_recommendation("Consider advanced code splitting for large applications")
    }
}

fn static_assets(project: &Path) -> CheckOutcome {
    let public_dir = project.join("public");
    if !public_dir.is_dir() {
        return CheckOutcome::warning("Could not analyze static assets");
    }
    let size = fsutil::dir_size(&public_dir);
    if size > MAX_PUBLIC_BYTES {
        CheckOutcome::warning(format!(
            "Static assets are large: {}",
            fsutil::format_bytes(size)
        ))
        .with_recommendation("Consider CDN for large static assets")
    } else {
        CheckOutcome::pass(format!(
            "Static assets size is reasonable: {}",
            fsutil::format_bytes(size)
        ))
    }
}

fn build_performance(build: &BuildRun) -> CheckOutcome {
    if !build.succeeded {
        return CheckOutcome::error("Build performance test failed");
    }
    let seconds = build.elapsed.as_secs_f64();
    if build.elapsed > MAX_BUILD_TIME {
        CheckOutcome::warning(format!("Build time is slow: {seconds:.1}s"))
            .with_recommendation("Optimize build configuration for faster builds")
    } else {
        CheckOutcome::pass(format!("Build time is good: {seconds:.1}s"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinicforge_core::CheckStatus;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn bundle_size_warns_above_threshold() {
        let dir = tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join(".next")).expect("mkdir");
        fs::write(dir.path().join(".next/chunk.js"), vec![0u8; 3_000_000]).expect("write");
        let build = BuildRun {
            succeeded: true,
            elapsed: Duration::from_secs(5),
        };
        let outcome = bundle_size(dir.path(), &build);
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert!(outcome.message.contains("Bundle size is large"));
    }

    #[test]
    fn bundle_size_errors_when_build_failed() {
        let dir = tempdir().expect("tempdir");
        let build = BuildRun {
            succeeded: false,
            elapsed: Duration::ZERO,
        };
        assert_eq!(bundle_size(dir.path(), &build).status, CheckStatus::Error);
    }

    #[test]
    fn image_optimization_warns_on_large_images() {
        let dir = tempdir().expect("tempdir");
        let images = dir.path().join("public/images");
        fs::create_dir_all(&images).expect("mkdir");
        fs::write(images.join("big.jpg"), vec![0u8; 600_000]).expect("write");
        fs::write(images.join("small.jpg"), vec![0u8; 1_000]).expect("write");

        let outcome = image_optimization(dir.path());
        assert_eq!(outcome.status, CheckStatus::Warning);
        assert!(outcome.message.contains("1/2 images need optimization"));
    }

    #[test]
    fn code_splitting_info_on_default_config() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("next.config.js"), "module.exports = {}").expect("write");
        assert_eq!(code_splitting(dir.path()).status, CheckStatus::Info);
    }

    #[test]
    fn build_performance_flags_slow_builds() {
        let build = BuildRun {
            succeeded: true,
            elapsed: Duration::from_secs(90),
        };
        assert_eq!(build_performance(&build).status, CheckStatus::Warning);
    }
}
