//! Site-Harvest main entry point
//!
//! This is the command-line interface for the Site-Harvest crawler.

use anyhow::Context;
use clap::Parser;
use site_harvest::config::{load_config_or_default, validate, Config};
use site_harvest::crawler::{run_crawl, AnyFetcher};
use site_harvest::SiteBase;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Harvest: a bounded same-site crawler
///
/// Site-Harvest crawls a website from a seed URL, follows internal links up
/// to a page limit, saves every page as Markdown and bundles the result into
/// a single zip archive.
#[derive(Parser, Debug)]
#[command(name = "site-harvest")]
#[command(version)]
#[command(about = "Web Crawling CLI Tool", long_about = None)]
struct Cli {
    /// Base URL to crawl (e.g., https://example.com)
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum number of pages to crawl [default: 10]
    #[arg(long)]
    limit: Option<usize>,

    /// Directory to save crawl results [default: output]
    #[arg(long)]
    output: Option<String>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Endpoint of a remote page-fetch service to use instead of direct HTTP
    #[arg(long, value_name = "URL")]
    service_url: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Validate the seed before anything touches the filesystem
    let base = SiteBase::parse(&cli.url)
        .context("Invalid URL provided. Please include the scheme (e.g., https://)")?;

    let config = load_effective_config(&cli)?;
    tracing::debug!("Effective configuration: {:?}", config);

    let fetcher =
        AnyFetcher::from_config(&config.fetcher).context("Failed to set up page fetcher")?;
    match &fetcher {
        AnyFetcher::Http(_) => tracing::info!("Fetching pages over direct HTTP"),
        AnyFetcher::Service(service) => {
            tracing::info!("Fetching pages through service at {}", service.endpoint())
        }
    }

    match run_crawl(base.seed().as_str(), &config, fetcher).await {
        Ok(report) => {
            tracing::info!(
                "Saved {} of {} visited pages to {}",
                report.pages_saved,
                report.pages_visited,
                report.archive_path.display()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e).context("Crawl failed")
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_harvest=info,warn"),
            1 => EnvFilter::new("site_harvest=debug,info"),
            2 => EnvFilter::new("site_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (or defaults) and applies command-line overrides
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = load_config_or_default(cli.config.as_deref()).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            cli.config
                .as_deref()
                .map(|path| path.display().to_string())
                .unwrap_or_default()
        )
    })?;

    if let Some(limit) = cli.limit {
        config.crawler.limit = limit;
    }
    if let Some(output) = &cli.output {
        config.crawler.output = output.clone();
    }
    if let Some(service_url) = &cli.service_url {
        config.fetcher.service_url = Some(service_url.clone());
    }

    validate(&config).context("Invalid configuration")?;

    Ok(config)
}
