//! End-to-end crawls through the real fetchers
//!
//! The direct HTTP fetcher crawls a wiremock-served site; the service
//! fetcher talks to a wiremock stand-in for the remote renderer.

use crate::support::{archive_entries, config_for};
use serde_json::json;
use site_harvest::crawler::{AnyFetcher, HttpPageFetcher, ServiceFetcher};
use site_harvest::{run_crawl, CrawlState};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, body
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .and(header("cache-control", "no-cache"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_http_crawl_end_to_end() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html(
            "Home",
            r#"<h1>Welcome</h1>
               <a href="/about">About</a>
               <a href="/missing">Broken</a>
               <a href="https://other.com/">Elsewhere</a>
               <div class="cookie-banner">Accept cookies</div>"#,
        ),
    )
    .await;
    mount_page(
        &server,
        "/about",
        html("About Us", r#"<p>We make things.</p><a href="/">Home</a>"#),
    )
    .await;
    let root = TempDir::new().unwrap();
    let config = config_for(root.path(), 10);
    let fetcher = AnyFetcher::from_config(&config.fetcher).unwrap();
    assert!(matches!(fetcher, AnyFetcher::Http(_)));

    let report = run_crawl(&server.uri(), &config, fetcher).await.unwrap();

    assert_eq!(report.state, CrawlState::Done);
    assert_eq!(report.pages_visited, 3);
    assert_eq!(report.pages_saved, 2);
    assert_eq!(report.pages_failed, 1);

    let entries = archive_entries(&report.archive_path);
    let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["about_us_about.md", "home.md"]);

    let home = &entries[1].1;
    assert!(home.contains("Welcome"));
    assert!(!home.contains("Accept cookies"));
}

#[tokio::test]
async fn test_http_crawl_skips_non_html() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        html("Home", r#"<a href="/feed">Feed</a>"#),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<rss/>", "application/rss+xml"))
        .mount(&server)
        .await;

    let root = TempDir::new().unwrap();
    let config = config_for(root.path(), 10);
    let fetcher = HttpPageFetcher::new(&config.fetcher).unwrap();

    let report = run_crawl(&server.uri(), &config, fetcher)
        .await
        .unwrap();

    assert_eq!(report.pages_visited, 2);
    assert_eq!(report.pages_saved, 1);
    assert_eq!(report.pages_failed, 1);
}

#[tokio::test]
async fn test_service_crawl_end_to_end() {
    let service = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .and(body_partial_json(json!({"url": "https://docs.example.com/"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "metadata": {"title": "Docs Home"},
            "markdown": "# Docs",
            "links": {
                "internal": [
                    "https://docs.example.com/guide",
                    {"href": "/faq", "text": "FAQ"},
                    {"text": "no target"},
                    "https://docs.example.com/#top"
                ]
            }
        })))
        .mount(&service)
        .await;

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .and(body_partial_json(json!({"url": "https://docs.example.com/guide"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "metadata": {"title": "Guide"},
            "markdown": "# Guide",
            "links": {"internal": ["https://docs.example.com/"]}
        })))
        .mount(&service)
        .await;

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .and(body_partial_json(json!({"url": "https://docs.example.com/faq"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error_message": "render timeout"
        })))
        .mount(&service)
        .await;

    let root = TempDir::new().unwrap();
    let mut config = config_for(root.path(), 10);
    config.fetcher.service_url = Some(format!("{}/crawl", service.uri()));

    let fetcher = AnyFetcher::from_config(&config.fetcher).unwrap();
    assert!(matches!(fetcher, AnyFetcher::Service(_)));

    let report = run_crawl("https://docs.example.com/", &config, fetcher)
        .await
        .unwrap();

    // Home, guide, faq and `top`: a fragment names a page of its own
    assert_eq!(report.pages_visited, 4);
    assert_eq!(report.pages_saved, 2);
    assert_eq!(report.pages_failed, 2);

    let entries = archive_entries(&report.archive_path);
    assert_eq!(
        entries,
        vec![
            ("docs_home.md".to_string(), "# Docs".to_string()),
            ("guide_guide.md".to_string(), "# Guide".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_service_unreachable_pages_fail_individually() {
    let service = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&service)
        .await;

    let root = TempDir::new().unwrap();
    let config = config_for(root.path(), 10);
    let endpoint = Url::parse(&format!("{}/crawl", service.uri())).unwrap();
    let fetcher = ServiceFetcher::new(endpoint, &config.fetcher).unwrap();

    let report = run_crawl("https://example.com", &config, fetcher)
        .await
        .unwrap();

    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.pages_saved, 0);
    assert!(archive_entries(&report.archive_path).is_empty());
}
