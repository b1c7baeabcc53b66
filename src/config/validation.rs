use crate::config::types::{Config, CrawlerConfig, FetcherConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    Ok(())
}

/// Validates crawl loop configuration
pub fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.limit < 1 {
        return Err(ConfigError::Validation(format!(
            "limit must be >= 1, got {}",
            config.limit
        )));
    }

    if config.output.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates page-fetch configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if let Some(service_url) = &config.service_url {
        validate_service_url(service_url)?;
    }

    Ok(())
}

/// Validates the remote page-fetch endpoint
pub fn validate_service_url(service_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(service_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid service-url '{}': {}", service_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "service-url '{}' must use HTTP or HTTPS",
            service_url
        )));
    }

    Ok(())
}
