//! HTTP client for the Firecrawl scraping API.
//!
//! Wraps `reqwest` with bearer-token auth, typed response deserialization,
//! and retry on transient failures. All endpoints check the `"success"`
//! field in the JSON envelope and surface API-level failures as
//! [`ExtractError::ApiError`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::json;

use crate::error::ExtractError;
use crate::retry::retry_with_backoff;
use crate::types::{ApiEnvelope, ScrapedPage};

const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev/v0";

/// Wait this long for client-side rendering before Firecrawl captures the page.
const SCRAPE_WAIT_MS: u64 = 3_000;

/// Page cap for the `/map` endpoint.
const MAP_PAGE_LIMIT: u32 = 50;

/// Client for the Firecrawl REST API.
///
/// Manages the HTTP client, API key, base URL, and retry policy. Use
/// [`FirecrawlClient::new`] for production or
/// [`FirecrawlClient::with_base_url`] to point at a mock server in tests.
pub struct FirecrawlClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl FirecrawlClient {
    /// Creates a new client pointed at the production Firecrawl API.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ExtractError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ExtractError::ApiError`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends endpoints instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ExtractError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 3,
            backoff_base_ms: 1_000,
        })
    }

    /// Overrides the default retry policy (3 retries, 1 s base back-off).
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Scrapes a single page, returning markdown, HTML, and page metadata.
    ///
    /// Requests main content only and allows the page 3 s to render before
    /// capture.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::ApiError`] if the API reports `"success": false`.
    /// - [`ExtractError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ExtractError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn scrape(&self, url: &str) -> Result<ScrapedPage, ExtractError> {
        let body = json!({
            "url": url,
            "formats": ["markdown", "html"],
            "onlyMainContent": true,
            "waitFor": SCRAPE_WAIT_MS,
        });
        let response = self.post_json("scrape", &body).await?;
        let envelope: ApiEnvelope<ScrapedPage> =
            serde_json::from_value(response).map_err(|e| ExtractError::Deserialize {
                context: format!("scrape({url})"),
                source: e,
            })?;
        Self::unwrap_envelope(envelope, "scraping")
    }

    /// Maps a website, returning up to 50 discovered page URLs on the same
    /// domain.
    ///
    /// # Errors
    ///
    /// Same error surface as [`FirecrawlClient::scrape`].
    pub async fn map_site(&self, url: &str) -> Result<Vec<String>, ExtractError> {
        let body = json!({
            "url": url,
            "limit": MAP_PAGE_LIMIT,
            "includeSubdomains": false,
        });
        let response = self.post_json("map", &body).await?;
        let envelope: ApiEnvelope<Vec<String>> =
            serde_json::from_value(response).map_err(|e| ExtractError::Deserialize {
                context: format!("map({url})"),
                source: e,
            })?;
        Self::unwrap_envelope(envelope, "mapping")
    }

    /// Runs Firecrawl's schema-guided structured extraction over the given
    /// URLs and returns the first extraction result as raw JSON.
    ///
    /// The caller merges the result into its own data model; unknown shapes
    /// degrade to `Value::Null` rather than an error.
    ///
    /// # Errors
    ///
    /// Same error surface as [`FirecrawlClient::scrape`].
    pub async fn extract_structured(
        &self,
        urls: &[String],
        schema: &serde_json::Value,
        prompt: &str,
    ) -> Result<serde_json::Value, ExtractError> {
        let body = json!({
            "urls": urls,
            "schema": schema,
            "prompt": prompt,
        });
        let response = self.post_json("extract", &body).await?;
        let envelope: ApiEnvelope<Vec<serde_json::Value>> =
            serde_json::from_value(response).map_err(|e| ExtractError::Deserialize {
                context: "extract".to_owned(),
                source: e,
            })?;
        let results = Self::unwrap_envelope(envelope, "extraction")?;
        Ok(results
            .into_iter()
            .next()
            .and_then(|mut v| v.get_mut("extract").map(serde_json::Value::take))
            .unwrap_or(serde_json::Value::Null))
    }

    /// Sends a bearer-authenticated POST with a JSON body, asserts a 2xx
    /// status, and parses the response body as JSON. Transient failures are
    /// retried per the client's retry policy.
    async fn post_json(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, ExtractError> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|e| ExtractError::ApiError(format!("invalid endpoint '{endpoint}': {e}")))?;

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async {
            let response = self
                .client
                .post(url.clone())
                .bearer_auth(&self.api_key)
                .json(body)
                .send()
                .await?;
            let response = response.error_for_status()?;
            let text = response.text().await?;
            serde_json::from_str(&text).map_err(|e| ExtractError::Deserialize {
                context: url.to_string(),
                source: e,
            })
        })
        .await
    }

    fn unwrap_envelope<T>(envelope: ApiEnvelope<T>, verb: &str) -> Result<T, ExtractError>
    where
        T: Default,
    {
        if !envelope.success {
            let msg = envelope.error.unwrap_or_else(|| "unknown error".to_owned());
            return Err(ExtractError::ApiError(format!("{verb} failed: {msg}")));
        }
        Ok(envelope.data.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> FirecrawlClient {
        FirecrawlClient::with_base_url("test-key", 30, "clinicforge/0.1 (test)", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn base_url_join_appends_endpoint() {
        let client = test_client("https://api.firecrawl.dev/v0");
        let url = client.base_url.join("scrape").expect("join");
        assert_eq!(url.as_str(), "https://api.firecrawl.dev/v0/scrape");
    }

    #[test]
    fn base_url_trailing_slash_is_normalised() {
        let client = test_client("https://api.firecrawl.dev/v0/");
        let url = client.base_url.join("map").expect("join");
        assert_eq!(url.as_str(), "https://api.firecrawl.dev/v0/map");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result =
            FirecrawlClient::with_base_url("k", 30, "ua", "not a url");
        assert!(matches!(result, Err(ExtractError::ApiError(_))));
    }

    #[test]
    fn envelope_failure_surfaces_api_error() {
        let envelope: ApiEnvelope<Vec<String>> = ApiEnvelope {
            success: false,
            data: None,
            error: Some("rate limited".to_owned()),
        };
        let result = FirecrawlClient::unwrap_envelope(envelope, "mapping");
        assert!(
            matches!(result, Err(ExtractError::ApiError(ref m)) if m == "mapping failed: rate limited")
        );
    }

    #[test]
    fn envelope_missing_data_defaults() {
        let envelope: ApiEnvelope<Vec<String>> = ApiEnvelope {
            success: true,
            data: None,
            error: None,
        };
        let result = FirecrawlClient::unwrap_envelope(envelope, "mapping").expect("ok");
        assert!(result.is_empty());
    }
}
