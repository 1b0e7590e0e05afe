//! File discovery helpers for the check categories.
//!
//! All traversal skips `.git`, `node_modules`, and `.next`; unreadable
//! entries are silently skipped since checks degrade rather than abort.

use std::fs;
use std::path::{Path, PathBuf};

const EXCLUDED_DIRS: &[&str] = &[".git", "node_modules", ".next"];

/// Every file under `project_dir` outside the excluded directories.
#[must_use]
pub fn all_files(project_dir: &Path) -> Vec<PathBuf> {
    files_with_extensions(project_dir, &[])
}

/// Markup sources: `.tsx` and `.html`.
#[must_use]
pub fn html_files(project_dir: &Path) -> Vec<PathBuf> {
    files_with_extensions(project_dir, &["tsx", "html"])
}

/// `.tsx` files under `components/` only.
#[must_use]
pub fn component_files(project_dir: &Path) -> Vec<PathBuf> {
    files_with_extensions(&project_dir.join("components"), &["tsx"])
}

/// Stylesheets: `.css` and `.scss`.
#[must_use]
pub fn style_files(project_dir: &Path) -> Vec<PathBuf> {
    files_with_extensions(project_dir, &["css", "scss"])
}

/// Files that carry visible content: `.tsx` and `.md`.
#[must_use]
pub fn content_files(project_dir: &Path) -> Vec<PathBuf> {
    files_with_extensions(project_dir, &["tsx", "md"])
}

/// Image files under `dir`, non-recursive variants are not needed here.
#[must_use]
pub fn image_files(dir: &Path) -> Vec<PathBuf> {
    files_with_extensions(dir, &["jpg", "jpeg", "png", "gif", "webp", "svg"])
}

fn files_with_extensions(dir: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(dir, extensions, &mut files);
    files
}

fn walk(dir: &Path, extensions: &[&str], out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let excluded = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| EXCLUDED_DIRS.contains(&n));
            if !excluded {
                walk(&path, extensions, out);
            }
        } else if extensions.is_empty() || matches_extension(&path, extensions) {
            out.push(path);
        }
    }
}

fn matches_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.contains(&e.to_ascii_lowercase().as_str()))
}

/// Total size in bytes of every file under `dir`. Inaccessible entries
/// count as zero.
#[must_use]
pub fn dir_size(dir: &Path) -> u64 {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .map(|entry| {
            let path = entry.path();
            if path.is_dir() {
                dir_size(&path)
            } else {
                entry.metadata().map_or(0, |m| m.len())
            }
        })
        .sum()
}

/// Human-readable byte count on the `Bytes`/`KB`/`MB`/`GB` scale.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{} {}", (value * 100.0).round() / 100.0, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn walk_skips_excluded_directories() {
        let dir = tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("components")).expect("mkdir");
        fs::create_dir_all(dir.path().join("node_modules/react")).expect("mkdir");
        fs::write(dir.path().join("components/Footer.tsx"), "x").expect("write");
        fs::write(dir.path().join("node_modules/react/index.tsx"), "x").expect("write");

        let files = html_files(dir.path());
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("components/Footer.tsx"));
    }

    #[test]
    fn component_files_scoped_to_components_dir() {
        let dir = tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("components")).expect("mkdir");
        fs::create_dir_all(dir.path().join("app")).expect("mkdir");
        fs::write(dir.path().join("components/CTA.tsx"), "x").expect("write");
        fs::write(dir.path().join("app/layout.tsx"), "x").expect("write");

        assert_eq!(component_files(dir.path()).len(), 1);
    }

    #[test]
    fn dir_size_tolerates_missing_dir() {
        assert_eq!(dir_size(Path::new("/nonexistent-qa-path")), 0);
    }

    #[test]
    fn format_bytes_matches_report_scale() {
        assert_eq!(format_bytes(2048), "2 KB");
        assert_eq!(format_bytes(2_097_152), "2 MB");
    }
}
