//! Remote page-fetch service client
//!
//! Sends each URL to a rendering service and maps its JSON answer onto a
//! `FetchedPage`. The service is expected to speak the following contract:
//!
//! ```text
//! POST <endpoint>
//! {"url": "...", "remove_overlay_elements": true, "bypass_cache": true}
//!
//! 200 OK
//! {"success": true, "metadata": {"title": "..."}, "markdown": "...",
//!  "links": {"internal": ["...", {"href": "..."}]}}
//! ```

use crate::config::FetcherConfig;
use crate::crawler::fetcher::{build_http_client, DiscoveredLink, FetchOptions, FetchedPage, PageFetcher};
use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Serialize)]
struct ServiceRequest<'a> {
    url: &'a str,
    remove_overlay_elements: bool,
    bypass_cache: bool,
}

#[derive(Debug, Deserialize)]
struct ServiceResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    metadata: Option<ServiceMetadata>,
    #[serde(default)]
    markdown: Option<String>,
    #[serde(default)]
    links: Option<ServiceLinks>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServiceMetadata {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServiceLinks {
    #[serde(default)]
    internal: Vec<DiscoveredLink>,
}

/// Delegates fetching and rendering to a remote page-fetch service
#[derive(Debug, Clone)]
pub struct ServiceFetcher {
    client: Client,
    endpoint: Url,
}

impl ServiceFetcher {
    pub fn new(endpoint: Url, config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(endpoint, build_http_client(config)?))
    }

    pub fn with_client(endpoint: Url, client: Client) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PageFetcher for ServiceFetcher {
    async fn fetch(&self, url: &Url, options: &FetchOptions) -> Result<FetchedPage, FetchError> {
        let request = ServiceRequest {
            url: url.as_str(),
            remove_overlay_elements: options.remove_overlay_elements,
            bypass_cache: options.bypass_cache,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Service {
                url: url.to_string(),
                message: format!("service answered with status {}", status),
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        let decoded: ServiceResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !decoded.success {
            tracing::debug!(
                "Service reported failure for {}: {}",
                url,
                decoded.error_message.as_deref().unwrap_or("no details")
            );
            return Ok(FetchedPage::unsuccessful());
        }

        Ok(FetchedPage {
            success: true,
            title: decoded.metadata.and_then(|metadata| metadata.title),
            markdown: decoded.markdown.unwrap_or_default(),
            internal_links: decoded.links.map(|links| links.internal).unwrap_or_default(),
        })
    }
}
