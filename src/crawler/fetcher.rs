//! Page-fetch collaborators
//!
//! This module defines the contract between the crawl loop and whatever
//! turns a URL into page content, plus the implementations that ship with
//! the crate:
//! - `HttpPageFetcher`: fetches HTML directly and converts it locally
//! - `ServiceFetcher`: delegates to a remote rendering service
//! - `AnyFetcher`: picks one of the above from configuration

use crate::config::FetcherConfig;
use crate::crawler::parser::parse_page;
use crate::crawler::service::ServiceFetcher;
use crate::{FetchError, HarvestError, UrlError};
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Options passed to the collaborator with every fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Strip modals, popups and banners before extracting content
    pub remove_overlay_elements: bool,

    /// Always retrieve a fresh copy of the page
    pub bypass_cache: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            remove_overlay_elements: true,
            bypass_cache: true,
        }
    }
}

impl From<&FetcherConfig> for FetchOptions {
    fn from(config: &FetcherConfig) -> Self {
        Self {
            remove_overlay_elements: config.remove_overlay_elements,
            bypass_cache: config.bypass_cache,
        }
    }
}

/// A link reported by the collaborator
///
/// Collaborators report links either as bare URL strings or as objects
/// carrying an `href`; anything else is kept but has no usable URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiscoveredLink {
    Url(String),
    Object {
        #[serde(default)]
        href: Option<String>,
    },
    Other(serde_json::Value),
}

impl DiscoveredLink {
    /// The link target, if the entry has one
    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Object { href } => href.as_deref(),
            Self::Other(_) => None,
        }
    }
}

impl From<&str> for DiscoveredLink {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}

/// What a collaborator returns for one URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    /// Whether the collaborator considers the fetch successful
    pub success: bool,

    /// Page title from metadata
    pub title: Option<String>,

    /// Page content as Markdown
    pub markdown: String,

    /// Links to the same site
    pub internal_links: Vec<DiscoveredLink>,
}

impl FetchedPage {
    /// A page the collaborator could not produce
    pub fn unsuccessful() -> Self {
        Self::default()
    }
}

/// Turns a URL into page content
///
/// Implementations report transport problems as `Err` and pages they
/// fetched but could not use as `Ok` with `success == false`. Timeouts are
/// entirely the implementation's concern.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url, options: &FetchOptions) -> Result<FetchedPage, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP and converts them locally
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    /// Fetches a page and extracts its title, Markdown and internal links
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Network error, timeout | `Err(FetchError::Http)` |
    /// | Non-2xx status | `Err(FetchError::Status)` |
    /// | Content-Type not HTML | `Ok` with `success == false` |
    /// | HTML page | `Ok` with `success == true` |
    ///
    /// Links are resolved against the final URL after redirects.
    async fn fetch(&self, url: &Url, options: &FetchOptions) -> Result<FetchedPage, FetchError> {
        let mut request = self.client.get(url.clone());
        if options.bypass_cache {
            request = request
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache");
        }

        let response = request.send().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();

        // Check Content-Type; a missing header is given the benefit of the doubt
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/html")
            .to_ascii_lowercase();

        if !is_html(&content_type) {
            tracing::debug!("Skipping {}: content type {}", url, content_type);
            return Ok(FetchedPage::unsuccessful());
        }

        let body = response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        let parsed = parse_page(&body, &final_url, options.remove_overlay_elements);

        Ok(FetchedPage {
            success: true,
            title: parsed.title,
            markdown: parsed.markdown,
            internal_links: parsed
                .internal_links
                .into_iter()
                .map(DiscoveredLink::Url)
                .collect(),
        })
    }
}

fn is_html(content_type: &str) -> bool {
    content_type.contains("text/html") || content_type.contains("application/xhtml+xml")
}

/// Enum over the collaborators the binary can be configured with
#[derive(Debug, Clone)]
pub enum AnyFetcher {
    Http(HttpPageFetcher),
    Service(ServiceFetcher),
}

impl AnyFetcher {
    /// Uses the remote service when `service-url` is set, direct HTTP otherwise
    pub fn from_config(config: &FetcherConfig) -> Result<Self, HarvestError> {
        match &config.service_url {
            Some(service_url) => {
                let endpoint = Url::parse(service_url)
                    .map_err(|e| UrlError::Parse(format!("{}: {}", service_url, e)))?;
                Ok(Self::Service(ServiceFetcher::new(endpoint, config)?))
            }
            None => Ok(Self::Http(HttpPageFetcher::new(config)?)),
        }
    }
}

#[async_trait]
impl PageFetcher for AnyFetcher {
    async fn fetch(&self, url: &Url, options: &FetchOptions) -> Result<FetchedPage, FetchError> {
        match self {
            AnyFetcher::Http(fetcher) => fetcher.fetch(url, options).await,
            AnyFetcher::Service(fetcher) => fetcher.fetch(url, options).await,
        }
    }
}
