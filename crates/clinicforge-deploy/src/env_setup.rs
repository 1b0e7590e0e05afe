//! Platform configuration and production env file generation.
//!
//! Existing files are left untouched; generation only fills gaps so a
//! hand-tuned `vercel.json` or `.env.production` survives redeployment.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::error::{io_err, DeployError};
use crate::types::Platform;

/// Writes the platform config file and `.env.production` when absent.
///
/// # Errors
///
/// Returns `DeployError::Io` when a file cannot be written.
pub fn setup(
    project_dir: &Path,
    platform: Platform,
    project_name: &str,
    domain: Option<&str>,
) -> Result<(), DeployError> {
    match platform {
        Platform::Vercel => write_vercel_config(project_dir, project_name, domain)?,
        Platform::Netlify => write_netlify_config(project_dir, domain)?,
    }
    write_production_env(project_dir, domain)?;
    tracing::info!(%platform, "deployment environment configured");
    Ok(())
}

fn write_vercel_config(
    project_dir: &Path,
    project_name: &str,
    domain: Option<&str>,
) -> Result<(), DeployError> {
    let path = project_dir.join("vercel.json");
    if path.is_file() {
        tracing::debug!("vercel.json already exists, keeping it");
        return Ok(());
    }

    let mut config = json!({
        "version": 2,
        "name": project_name,
        "builds": [
            { "src": "package.json", "use": "@vercel/next" }
        ],
        "functions": {
            "app/api/**": { "maxDuration": 30 }
        }
    });
    if let Some(domain) = domain {
        config["env"] = json!({ "NEXT_PUBLIC_SITE_URL": format!("https://{domain}") });
    }

    let rendered = serde_json::to_string_pretty(&config).map_err(|e| DeployError::Json {
        path: path.clone(),
        source: e,
    })?;
    fs::write(&path, rendered).map_err(|e| io_err(&path, e))
}

fn write_netlify_config(project_dir: &Path, domain: Option<&str>) -> Result<(), DeployError> {
    let path = project_dir.join("netlify.toml");
    if path.is_file() {
        tracing::debug!("netlify.toml already exists, keeping it");
        return Ok(());
    }

    let mut content = String::from(
        "[build]\n\
         command = \"npm run build\"\n\
         publish = \"out\"\n\n",
    );
    if let Some(domain) = domain {
        content.push_str(&format!(
            "[build.environment]\nNEXT_PUBLIC_SITE_URL = \"https://{domain}\"\n\n"
        ));
    }
    content.push_str(
        "[functions]\n\
         directory = \"netlify/functions\"\n\n\
         [[headers]]\n\
         for = \"/*\"\n\
         [headers.values]\n\
         X-Frame-Options = \"DENY\"\n\
         X-XSS-Protection = \"1; mode=block\"\n\
         X-Content-Type-Options = \"nosniff\"\n\
         Referrer-Policy = \"strict-origin-when-cross-origin\"\n",
    );

    fs::write(&path, content).map_err(|e| io_err(&path, e))
}

fn write_production_env(project_dir: &Path, domain: Option<&str>) -> Result<(), DeployError> {
    let path = project_dir.join(".env.production");
    if path.is_file() {
        tracing::debug!(".env.production already exists, keeping it");
        return Ok(());
    }

    let site_url = domain.map_or_else(
        || "https://your-domain.com".to_owned(),
        |d| format!("https://{d}"),
    );
    let content = format!(
        "# Production Environment Variables\n\
         # Generated automatically by deployment automation\n\n\
         NEXT_PUBLIC_SITE_URL={site_url}\n\
         NODE_ENV=production\n\n\
         # Add your production-specific variables below:\n\
         # GOOGLE_ANALYTICS_ID=\n\
         # FACEBOOK_PIXEL_ID=\n\
         # CALENDLY_URL=\n"
    );
    fs::write(&path, content).map_err(|e| io_err(&path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn setup_writes_vercel_config_and_env() {
        let dir = tempdir().expect("tempdir");
        setup(dir.path(), Platform::Vercel, "acme-site", Some("acme.co.uk")).expect("setup");

        let config: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("vercel.json")).expect("read"),
        )
        .expect("valid json");
        assert_eq!(config["name"].as_str(), Some("acme-site"));
        assert_eq!(
            config["env"]["NEXT_PUBLIC_SITE_URL"].as_str(),
            Some("https://acme.co.uk")
        );

        let env = fs::read_to_string(dir.path().join(".env.production")).expect("read env");
        assert!(env.contains("NEXT_PUBLIC_SITE_URL=https://acme.co.uk"));
        assert!(env.contains("NODE_ENV=production"));
    }

    #[test]
    fn setup_writes_netlify_toml_with_security_headers() {
        let dir = tempdir().expect("tempdir");
        setup(dir.path(), Platform::Netlify, "acme-site", None).expect("setup");

        let toml = fs::read_to_string(dir.path().join("netlify.toml")).expect("read");
        assert!(toml.contains("command = \"npm run build\""));
        assert!(toml.contains("X-Frame-Options = \"DENY\""));
        assert!(!toml.contains("NEXT_PUBLIC_SITE_URL"));
    }

    #[test]
    fn setup_keeps_existing_files() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("vercel.json"), "{\"custom\": true}").expect("write");
        fs::write(dir.path().join(".env.production"), "CUSTOM=1\n").expect("write");

        setup(dir.path(), Platform::Vercel, "acme-site", None).expect("setup");

        assert_eq!(
            fs::read_to_string(dir.path().join("vercel.json")).expect("read"),
            "{\"custom\": true}"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join(".env.production")).expect("read"),
            "CUSTOM=1\n"
        );
    }

    #[test]
    fn env_defaults_site_url_without_domain() {
        let dir = tempdir().expect("tempdir");
        setup(dir.path(), Platform::Vercel, "acme-site", None).expect("setup");
        let env = fs::read_to_string(dir.path().join(".env.production")).expect("read");
        assert!(env.contains("NEXT_PUBLIC_SITE_URL=https://your-domain.com"));
    }
}
