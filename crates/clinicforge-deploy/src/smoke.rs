//! Post-deployment smoke tests.
//!
//! Six checks run against the live URL. Every failure is recorded as a
//! warning; the CLI deploy step alone decides whether the deployment
//! succeeded.

use std::time::{Duration, Instant};

use clinicforge_core::CheckStatus;
use reqwest::Client;

use crate::types::SmokeCheck;

const CRITICAL_PATHS: &[&str] = &["/", "/privacy"];
const MAX_LOAD_TIME: Duration = Duration::from_secs(5);
const MAX_CONTENT_LENGTH: u64 = 2_000_000;

/// Runs the full smoke suite against `url`, collecting one entry per
/// check. Network failures become warnings like any other failure.
pub struct SmokeTester {
    client: Client,
}

impl SmokeTester {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn run(&self, url: &str) -> Vec<SmokeCheck> {
        let mut checks = Vec::with_capacity(6);

        checks.push(outcome("Site accessibility", self.test_reachability(url).await));
        checks.push(outcome("Critical pages load", self.test_critical_pages(url).await));

        // The remaining checks inspect the homepage body; fetch it once.
        let (html, load_time, content_length) = match self.fetch_homepage(url).await {
            Ok(page) => page,
            Err(reason) => {
                for name in [
                    "Contact forms work",
                    "Mobile responsiveness",
                    "SEO basics",
                    "Performance check",
                ] {
                    checks.push(outcome(name, Err(reason.clone())));
                }
                return checks;
            }
        };

        checks.push(outcome("Contact forms work", test_contact_forms(&html)));
        checks.push(outcome("Mobile responsiveness", test_viewport(&html)));
        checks.push(outcome("SEO basics", test_seo_basics(&html)));
        checks.push(outcome(
            "Performance check",
            test_performance(load_time, content_length),
        ));

        let passed = checks
            .iter()
            .filter(|c| c.status == CheckStatus::Pass)
            .count();
        tracing::info!(passed, total = checks.len(), "post-deployment tests completed");
        checks
    }

    async fn test_reachability(&self, url: &str) -> Result<(), String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(format!("site returned {status}"))
        }
    }

    async fn test_critical_pages(&self, url: &str) -> Result<(), String> {
        let base = url.trim_end_matches('/');
        for path in CRITICAL_PATHS {
            let page_url = format!("{base}{path}");
            let response = self
                .client
                .get(&page_url)
                .send()
                .await
                .map_err(|e| format!("failed to load {path}: {e}"))?;
            if !response.status().is_success() {
                return Err(format!("{path} returned {}", response.status()));
            }
        }
        Ok(())
    }

    async fn fetch_homepage(&self, url: &str) -> Result<(String, Duration, Option<u64>), String> {
        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let load_time = start.elapsed();
        let content_length = response.content_length();
        let html = response.text().await.map_err(|e| e.to_string())?;
        Ok((html, load_time, content_length))
    }
}

fn outcome(name: &'static str, result: Result<(), String>) -> SmokeCheck {
    match result {
        Ok(()) => SmokeCheck {
            name,
            status: CheckStatus::Pass,
            details: None,
        },
        Err(details) => {
            tracing::warn!(check = name, details, "smoke test failed");
            SmokeCheck {
                name,
                status: CheckStatus::Warning,
                details: Some(details),
            }
        }
    }
}

fn test_contact_forms(html: &str) -> Result<(), String> {
    if html.contains("<form") || html.contains("booking") {
        Ok(())
    } else {
        Err("no contact forms or booking elements found".to_owned())
    }
}

fn test_viewport(html: &str) -> Result<(), String> {
    if html.contains("viewport") {
        Ok(())
    } else {
        Err("mobile viewport meta tag not found".to_owned())
    }
}

fn test_seo_basics(html: &str) -> Result<(), String> {
    let required = [
        ("<title>", "title tag"),
        ("description", "meta description"),
        ("<h1", "h1 heading"),
    ];
    for (needle, name) in required {
        if !html.contains(needle) {
            return Err(format!("{name} missing"));
        }
    }
    Ok(())
}

fn test_performance(load_time: Duration, content_length: Option<u64>) -> Result<(), String> {
    if load_time > MAX_LOAD_TIME {
        return Err(format!("slow load time: {}ms", load_time.as_millis()));
    }
    if let Some(length) = content_length {
        if length > MAX_CONTENT_LENGTH {
            return Err(format!("large page size: {} bytes", length));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_forms_accept_booking_markup() {
        assert!(test_contact_forms("<a href=\"/booking\">Book</a>").is_ok());
        assert!(test_contact_forms("<form action=\"/contact\">").is_ok());
        assert!(test_contact_forms("<p>hello</p>").is_err());
    }

    #[test]
    fn seo_basics_require_all_three_tags() {
        let full = "<title>Acme</title><meta name=\"description\"><h1>Welcome</h1>";
        assert!(test_seo_basics(full).is_ok());
        assert_eq!(
            test_seo_basics("<title>Acme</title><meta name=\"description\">"),
            Err("h1 heading missing".to_owned())
        );
    }

    #[test]
    fn performance_flags_slow_load_and_large_body() {
        assert!(test_performance(Duration::from_millis(100), Some(1_000)).is_ok());
        assert!(test_performance(Duration::from_secs(6), None).is_err());
        assert!(test_performance(Duration::from_millis(100), Some(3_000_000)).is_err());
    }
}
