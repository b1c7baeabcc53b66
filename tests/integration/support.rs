//! Shared helpers for the integration tests

use async_trait::async_trait;
use site_harvest::config::Config;
use site_harvest::crawler::{DiscoveredLink, FetchOptions, FetchedPage, PageFetcher};
use site_harvest::FetchError;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use url::Url;

/// An in-memory site: a map from URL to page, plus URLs that fail
#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<String, FetchedPage>,
    unsuccessful: HashSet<String>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page with the given title, content and links
    pub fn page(mut self, url: &str, title: &str, links: &[&str]) -> Self {
        self.pages.insert(
            url.to_string(),
            FetchedPage {
                success: true,
                title: Some(title.to_string()),
                markdown: format!("# {}\n\nContent of {}", title, url),
                internal_links: links.iter().map(|link| DiscoveredLink::from(*link)).collect(),
            },
        );
        self
    }

    /// Marks a URL as one the collaborator reports as unsuccessful
    pub fn unsuccessful(mut self, url: &str) -> Self {
        self.unsuccessful.insert(url.to_string());
        self
    }
}

#[async_trait]
impl PageFetcher for FakeSite {
    async fn fetch(&self, url: &Url, _options: &FetchOptions) -> Result<FetchedPage, FetchError> {
        if self.unsuccessful.contains(url.as_str()) {
            return Ok(FetchedPage::unsuccessful());
        }

        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// Default configuration writing below `output_root`
pub fn config_for(output_root: &Path, limit: usize) -> Config {
    let mut config = Config::default();
    config.crawler.output = output_root.display().to_string();
    config.crawler.limit = limit;
    config
}

/// Reads every entry of a zip archive as (name, content), in archive order
pub fn archive_entries(archive_path: &Path) -> Vec<(String, String)> {
    let mut archive = zip::ZipArchive::new(File::open(archive_path).unwrap()).unwrap();
    let mut entries = Vec::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        entries.push((file.name().to_string(), content));
    }

    entries
}

/// Names of the entries directly inside `dir`
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
