//! Integration tests for `FirecrawlClient` and the extraction pipeline
//! using wiremock HTTP mocks.

use std::time::Duration;

use clinicforge_extract::{ExtractError, Extractor, FirecrawlClient};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> FirecrawlClient {
    FirecrawlClient::with_base_url("test-key", 30, "clinicforge/0.1 (test)", base_url)
        .expect("client construction should not fail")
        .with_retry_policy(0, 0)
}

#[tokio::test]
async fn scrape_returns_page_content() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "success": true,
        "data": {
            "markdown": "# Acme Clinic\nCall us: +44 7911 123456",
            "html": "<h1>Acme Clinic</h1>",
            "metadata": {
                "title": "Acme Clinic | CO2 Laser London",
                "description": "Advanced laser skin resurfacing"
            }
        }
    });

    Mock::given(method("POST"))
        .and(path("/scrape"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "url": "https://acmeclinic.co.uk",
            "formats": ["markdown", "html"],
            "onlyMainContent": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .scrape("https://acmeclinic.co.uk")
        .await
        .expect("should parse scraped page");

    assert_eq!(
        page.markdown.as_deref(),
        Some("# Acme Clinic\nCall us: +44 7911 123456")
    );
    assert_eq!(
        page.metadata.and_then(|m| m.title).as_deref(),
        Some("Acme Clinic | CO2 Laser London")
    );
}

#[tokio::test]
async fn scrape_surfaces_api_failure() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "success": false,
        "error": "URL is blocked"
    });

    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.scrape("https://blocked.example").await;

    assert!(
        matches!(result, Err(ExtractError::ApiError(ref m)) if m.contains("URL is blocked")),
        "expected ApiError, got: {result:?}"
    );
}

#[tokio::test]
async fn scrape_surfaces_http_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.scrape("https://acmeclinic.co.uk").await;

    assert!(matches!(result, Err(ExtractError::Http(_))));
}

#[tokio::test]
async fn map_site_returns_discovered_urls() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "success": true,
        "data": [
            "https://acmeclinic.co.uk/",
            "https://acmeclinic.co.uk/about",
            "https://acmeclinic.co.uk/treatments"
        ]
    });

    Mock::given(method("POST"))
        .and(path("/map"))
        .and(body_partial_json(serde_json::json!({
            "limit": 50,
            "includeSubdomains": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let urls = client
        .map_site("https://acmeclinic.co.uk")
        .await
        .expect("should parse site map");

    assert_eq!(urls.len(), 3);
    assert_eq!(urls[1], "https://acmeclinic.co.uk/about");
}

#[tokio::test]
async fn extract_structured_unwraps_first_result() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "success": true,
        "data": [
            { "extract": { "business": { "name": "Acme Clinic" } } }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/extract"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let value = client
        .extract_structured(
            &["https://acmeclinic.co.uk".to_owned()],
            &serde_json::json!({ "type": "object" }),
            "extract clinic info",
        )
        .await
        .expect("should parse extract result");

    assert_eq!(
        value.pointer("/business/name").and_then(|v| v.as_str()),
        Some("Acme Clinic")
    );
}

#[tokio::test]
async fn pipeline_degrades_when_map_and_extract_fail() {
    let server = MockServer::start().await;

    let scrape_body = serde_json::json!({
        "success": true,
        "data": {
            "markdown": "# Acme Clinic\nCall us: +44 7911 123456\n\
                         Email info@acmeclinic.co.uk\n\
                         Address: 1 High Street, London, SW1A 1AA",
            "metadata": { "title": "Acme Clinic | London" }
        }
    });

    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&scrape_body))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/map"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/extract"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let extractor = Extractor::new(test_client(&server.uri()))
        .with_inter_request_delay(Duration::ZERO);
    let outcome = extractor
        .extract("https://acmeclinic.co.uk")
        .await
        .expect("pipeline should degrade, not fail");

    let data = &outcome.clinic_data;
    assert_eq!(data.business.name.as_deref(), Some("Acme Clinic"));
    assert_eq!(data.contact.phone.as_deref(), Some("+447911123456"));
    assert_eq!(data.contact.email.as_deref(), Some("info@acmeclinic.co.uk"));
    assert_eq!(data.location.city.as_deref(), Some("London"));
    assert_eq!(data.location.country.as_deref(), Some("United Kingdom"));
    assert_eq!(data.location.region.as_deref(), Some("London"));
}

#[tokio::test]
async fn pipeline_scrapes_key_pages_from_site_map() {
    let server = MockServer::start().await;

    let main_body = serde_json::json!({
        "success": true,
        "data": { "markdown": "# Acme Clinic" }
    });
    let team_body = serde_json::json!({
        "success": true,
        "data": { "markdown": "## Dr Jane Smith\nTitle: Medical Director\n" }
    });
    let map_body = serde_json::json!({
        "success": true,
        "data": ["https://acmeclinic.co.uk/our-team"]
    });

    Mock::given(method("POST"))
        .and(path("/scrape"))
        .and(body_partial_json(serde_json::json!({
            "url": "https://acmeclinic.co.uk/our-team"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&team_body))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&main_body))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/map"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&map_body))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/extract"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let extractor = Extractor::new(test_client(&server.uri()))
        .with_inter_request_delay(Duration::ZERO);
    let outcome = extractor
        .extract("https://acmeclinic.co.uk")
        .await
        .expect("pipeline should succeed");

    let members = &outcome.clinic_data.team.members;
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].name, "Dr Jane Smith");
    assert_eq!(members[0].title, "Medical Director");
}
