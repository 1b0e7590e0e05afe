//! Production build stage.

use std::fs;
use std::path::Path;

use crate::command;
use crate::error::DeployError;
use crate::fsutil;

/// Images above this size get a pre-deploy advisory.
const LARGE_IMAGE_BYTES: u64 = 500_000;

/// Installs dependencies when `node_modules` is missing, then runs the
/// production build. Bundle size and large-image scans are advisory only.
///
/// # Errors
///
/// Propagates subprocess failures from `npm install` and `npm run build`.
pub async fn run(project_dir: &Path) -> Result<(), DeployError> {
    if !project_dir.join("node_modules").is_dir() {
        tracing::info!("node_modules missing, installing dependencies");
        command::run("npm", &["install"], project_dir).await?;
    }

    command::run("npm", &["run", "build"], project_dir).await?;
    tracing::info!("production build completed");

    note_build_size(project_dir);
    note_large_images(project_dir);
    Ok(())
}

fn note_build_size(project_dir: &Path) {
    let build_dir = project_dir.join(".next");
    if let Ok(size) = fsutil::dir_size(&build_dir) {
        tracing::info!(size = %fsutil::format_bytes(size), "build output size");
    }
}

fn note_large_images(project_dir: &Path) {
    let images_dir = project_dir.join("public").join("images");
    if !images_dir.is_dir() {
        return;
    }
    for image in fsutil::image_files(&images_dir) {
        if let Ok(meta) = fs::metadata(&image) {
            if meta.len() > LARGE_IMAGE_BYTES {
                tracing::warn!(
                    file = %image.display(),
                    size = %fsutil::format_bytes(meta.len()),
                    "large image detected"
                );
            }
        }
    }
}
