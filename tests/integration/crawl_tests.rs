//! Integration tests for the crawler
//!
//! These tests drive complete crawls (frontier, writer and archiver) against
//! an in-memory site and inspect the archive that comes out.

use crate::support::{archive_entries, config_for, dir_entries, FakeSite};
use site_harvest::crawler::{Coordinator, CrawlJob};
use site_harvest::{run_crawl, CrawlState, HarvestError};
use tempfile::TempDir;

#[tokio::test]
async fn test_single_page_limit() {
    let root = TempDir::new().unwrap();
    let site = FakeSite::new().page(
        "https://example.com/",
        "Example Domain",
        &["/about", "/contact"],
    );

    let report = run_crawl("https://example.com", &config_for(root.path(), 1), site)
        .await
        .unwrap();

    assert_eq!(report.state, CrawlState::Done);
    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.pages_saved, 1);

    let entries = archive_entries(&report.archive_path);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, "example_domain.md");
    assert!(entries[0].1.starts_with("# Example Domain"));

    // Only the archive is left behind
    assert_eq!(
        dir_entries(root.path()),
        vec![format!("crawl_{}.zip", report.job_id)]
    );
}

#[tokio::test]
async fn test_unsuccessful_page_counts_as_visited() {
    let root = TempDir::new().unwrap();
    let site = FakeSite::new()
        .page("https://example.com/", "Home", &["/a", "/b", "/c"])
        .unsuccessful("https://example.com/a")
        .page("https://example.com/b", "B", &[])
        .page("https://example.com/c", "C", &["/a"]);

    let report = run_crawl("https://example.com", &config_for(root.path(), 4), site)
        .await
        .unwrap();

    assert_eq!(report.pages_visited, 4);
    assert_eq!(report.pages_saved, 3);
    assert_eq!(report.pages_failed, 1);

    let mut names: Vec<String> = archive_entries(&report.archive_path)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["b_b.md", "c_c.md", "home.md"]);
}

#[tokio::test]
async fn test_title_and_path_build_filename() {
    let root = TempDir::new().unwrap();
    let site = FakeSite::new()
        .page("https://example.com/", "Home", &["/About_Us"])
        .page("https://example.com/about_us", "Hello, World!", &[]);

    let report = run_crawl("https://example.com", &config_for(root.path(), 10), site)
        .await
        .unwrap();

    let names: Vec<String> = archive_entries(&report.archive_path)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(names, vec!["hello_world_about_us.md", "home.md"]);
}

#[tokio::test]
async fn test_cyclic_site_terminates() {
    let root = TempDir::new().unwrap();
    let site = FakeSite::new()
        .page("https://example.com/", "Home", &["/a", "/b"])
        .page("https://example.com/a", "A", &["/b", "/", "https://example.com"])
        .page("https://example.com/b", "B", &["/a", "./a", "/b/"]);

    let job = CrawlJob::new("https://example.com", 100, root.path()).unwrap();
    let mut coordinator = Coordinator::new(job, site);
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.pages_visited, 3);
    assert_eq!(coordinator.frontier().pending_len(), 0);
}

#[tokio::test]
async fn test_off_site_links_never_followed() {
    let root = TempDir::new().unwrap();
    let site = FakeSite::new()
        .page(
            "https://example.com/docs",
            "Docs",
            &[
                "intro",
                "/blog",
                "https://other.com/docs/intro",
                "http://example.com/docs/faq",
                "https://example.com:8443/docs/faq",
                "mailto:team@example.com",
            ],
        )
        .page("https://example.com/docs/intro", "Intro", &[]);

    let job = CrawlJob::new("https://example.com/docs/", 10, root.path()).unwrap();
    let mut coordinator = Coordinator::new(job, site);
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.pages_visited, 2);
    assert_eq!(report.pages_saved, 2);
    assert_eq!(report.pages_failed, 0);
}

#[tokio::test]
async fn test_query_variants_are_one_page() {
    let root = TempDir::new().unwrap();
    let site = FakeSite::new()
        .page("https://example.com/", "Home", &["/Page", "/page?ref=1", "/page/"])
        .page("https://example.com/page", "Page", &[]);

    let report = run_crawl("https://example.com", &config_for(root.path(), 10), site)
        .await
        .unwrap();

    assert_eq!(report.pages_visited, 2);
    assert_eq!(archive_entries(&report.archive_path).len(), 2);
}

#[tokio::test]
async fn test_colliding_names_do_not_overwrite() {
    let root = TempDir::new().unwrap();
    let site = FakeSite::new()
        .page("https://example.com/", "Home", &["/b_c", "/c"])
        .page("https://example.com/b_c", "A", &[])
        .page("https://example.com/c", "A B", &[]);

    let report = run_crawl("https://example.com", &config_for(root.path(), 10), site)
        .await
        .unwrap();

    let mut names: Vec<String> = archive_entries(&report.archive_path)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["a_b_c.md", "a_b_c_2.md", "home.md"]);
    assert_eq!(report.pages_saved, 3);
}

#[tokio::test]
async fn test_invalid_seed_creates_nothing() {
    let root = TempDir::new().unwrap();
    let site = FakeSite::new();

    let result = run_crawl("example.com", &config_for(root.path(), 10), site).await;

    assert!(matches!(result, Err(HarvestError::Url(_))));
    assert!(dir_entries(root.path()).is_empty());
}

#[tokio::test]
async fn test_unusable_links_are_dropped() {
    let root = TempDir::new().unwrap();
    let site = FakeSite::new().page(
        "https://example.com/",
        "Home",
        &["%E0%A4%A", "http://[::1", ""],
    );

    let job = CrawlJob::new("https://example.com", 10, root.path()).unwrap();
    let mut coordinator = Coordinator::new(job, site);
    let report = coordinator.run().await.unwrap();

    assert_eq!(report.pages_visited, 1);
    assert_eq!(report.pages_failed, 0);
}
