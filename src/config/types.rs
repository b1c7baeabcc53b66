use serde::Deserialize;

/// Default number of pages to visit
pub const DEFAULT_LIMIT: usize = 10;

/// Default parent directory for job output
pub const DEFAULT_OUTPUT: &str = "output";

/// Main configuration structure for Site-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
}

/// Crawl loop configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages to mark visited
    pub limit: usize,

    /// Parent directory under which `crawl_<job id>` is created
    pub output: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            output: DEFAULT_OUTPUT.to_string(),
        }
    }
}

/// Page-fetch collaborator configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Drop overlay elements (dialogs, scripts, iframes...) before conversion
    #[serde(rename = "remove-overlay-elements")]
    pub remove_overlay_elements: bool,

    /// Ask for a fresh copy instead of a cached one
    #[serde(rename = "bypass-cache")]
    pub bypass_cache: bool,

    /// Endpoint of a remote page-fetch service; direct HTTP when unset
    #[serde(rename = "service-url")]
    pub service_url: Option<String>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("site-harvest/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            remove_overlay_elements: true,
            bypass_cache: true,
            service_url: None,
        }
    }
}
