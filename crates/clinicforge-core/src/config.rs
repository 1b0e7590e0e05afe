use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if env var values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if env var values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // Only needed for live Firecrawl extraction; customize/deploy/qa runs
    // work without it, so its absence is surfaced at the call site instead.
    let firecrawl_api_key = lookup("FIRECRAWL_API_KEY").ok();

    let template_path = PathBuf::from(or_default("CLINICFORGE_TEMPLATE_PATH", "./template"));
    let output_path = PathBuf::from(or_default("CLINICFORGE_OUTPUT_PATH", "./generated-sites"));

    let http_timeout_secs = parse_u64("CLINICFORGE_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(
        "CLINICFORGE_USER_AGENT",
        "clinicforge/0.1 (site-automation)",
    );
    let max_retries = parse_u32("CLINICFORGE_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("CLINICFORGE_RETRY_BACKOFF_BASE_MS", "1000")?;

    Ok(AppConfig {
        firecrawl_api_key,
        template_path,
        output_path,
        http_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;
    use std::path::Path;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert!(cfg.firecrawl_api_key.is_none());
        assert_eq!(cfg.template_path, Path::new("./template"));
        assert_eq!(cfg.output_path, Path::new("./generated-sites"));
        assert_eq!(cfg.http_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "clinicforge/0.1 (site-automation)");
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.retry_backoff_base_ms, 1000);
    }

    #[test]
    fn build_app_config_picks_up_api_key() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("FIRECRAWL_API_KEY", "fc-test-key");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.firecrawl_api_key.as_deref(), Some("fc-test-key"));
    }

    #[test]
    fn build_app_config_overrides_paths() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CLINICFORGE_TEMPLATE_PATH", "/srv/template");
        map.insert("CLINICFORGE_OUTPUT_PATH", "/srv/out");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.template_path, Path::new("/srv/template"));
        assert_eq!(cfg.output_path, Path::new("/srv/out"));
    }

    #[test]
    fn build_app_config_http_timeout_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CLINICFORGE_HTTP_TIMEOUT_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.http_timeout_secs, 60);
    }

    #[test]
    fn build_app_config_http_timeout_invalid() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CLINICFORGE_HTTP_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CLINICFORGE_HTTP_TIMEOUT_SECS"),
            "expected InvalidEnvVar(CLINICFORGE_HTTP_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_max_retries_invalid() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CLINICFORGE_MAX_RETRIES", "-1");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CLINICFORGE_MAX_RETRIES"),
            "expected InvalidEnvVar(CLINICFORGE_MAX_RETRIES), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_retry_backoff_override() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CLINICFORGE_RETRY_BACKOFF_BASE_MS", "250");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.retry_backoff_base_ms, 250);
    }

    #[test]
    fn app_config_debug_redacts_api_key() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("FIRECRAWL_API_KEY", "fc-super-secret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("fc-super-secret"));
        assert!(debug.contains("[redacted]"));
    }
}
