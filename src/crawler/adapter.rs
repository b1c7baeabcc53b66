use crate::crawler::fetcher::{DiscoveredLink, FetchOptions, PageFetcher};
use url::Url;

/// Outcome of fetching one page, as seen by the crawl loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
    pub success: bool,
    pub title: Option<String>,

    /// Page content as Markdown
    pub content: String,

    pub internal_links: Vec<DiscoveredLink>,
}

impl PageResult {
    /// A failed fetch: no content and no links to follow
    pub fn failed() -> Self {
        Self::default()
    }
}

/// Wraps a page-fetch collaborator so that a fetch can never fail
///
/// Whatever the collaborator does (an error, or a page it reports as
/// unsuccessful) is folded into a `PageResult`. The crawl loop only ever
/// sees `success == false` with no links.
pub struct FetchAdapter<F> {
    fetcher: F,
    options: FetchOptions,
}

impl<F: PageFetcher> FetchAdapter<F> {
    /// Creates an adapter that strips overlays and bypasses caches
    pub fn new(fetcher: F) -> Self {
        Self::with_options(fetcher, FetchOptions::default())
    }

    pub fn with_options(fetcher: F, options: FetchOptions) -> Self {
        Self { fetcher, options }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Fetches a page through the collaborator
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to fetch
    ///
    /// # Returns
    ///
    /// The page on success, or `PageResult::failed()` for any error or
    /// unsuccessful response.
    pub async fn fetch(&self, url: &Url) -> PageResult {
        match self.fetcher.fetch(url, &self.options).await {
            Ok(page) if page.success => PageResult {
                success: true,
                title: page.title,
                content: page.markdown,
                internal_links: page.internal_links,
            },
            Ok(_) => {
                tracing::warn!("Error processing {}: fetch was not successful", url);
                PageResult::failed()
            }
            Err(e) => {
                tracing::warn!("Error processing {}: {}", url, e);
                PageResult::failed()
            }
        }
    }
}
