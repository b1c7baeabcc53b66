//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop and everything around it:
//! - Creating the job's output directory
//! - Driving the frontier until it is empty or the page limit is reached
//! - Naming and writing each fetched page
//! - Filtering discovered links to the site
//! - Archiving the output directory once the loop is done

use crate::config::Config;
use crate::crawler::adapter::{FetchAdapter, PageResult};
use crate::crawler::fetcher::{DiscoveredLink, FetchOptions, PageFetcher};
use crate::crawler::frontier::Frontier;
use crate::output::{archive_directory, name_for, PageWriter};
use crate::state::CrawlState;
use crate::url::{resolve, SiteBase};
use crate::{ConfigError, HarvestError};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;
use uuid::Uuid;

/// An immutable description of one crawl
#[derive(Debug, Clone)]
pub struct CrawlJob {
    /// Random job identifier (UUID v4, simple hex form)
    pub id: String,

    /// The validated seed and the site it defines
    pub base: SiteBase,

    /// Maximum number of pages to visit
    pub page_limit: usize,

    /// Directory the pages are written to before archiving
    pub output_dir: PathBuf,
}

impl CrawlJob {
    /// Validates the seed and limit and picks a fresh job directory
    ///
    /// # Arguments
    ///
    /// * `seed` - The seed URL; must be absolute HTTP(S) with a host
    /// * `page_limit` - Maximum number of pages to visit; must be at least 1
    /// * `output_root` - Directory under which `crawl_<id>` is created
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlJob)` - The job is valid; nothing has been created on disk
    /// * `Err(HarvestError)` - The seed or the limit is invalid
    pub fn new(
        seed: &str,
        page_limit: usize,
        output_root: impl AsRef<Path>,
    ) -> Result<Self, HarvestError> {
        let base = SiteBase::parse(seed)?;

        if page_limit == 0 {
            return Err(ConfigError::Validation("limit must be at least 1".to_string()).into());
        }

        let id = Uuid::new_v4().simple().to_string();
        let output_dir = output_root.as_ref().join(format!("crawl_{}", id));

        Ok(Self {
            id,
            base,
            page_limit,
            output_dir,
        })
    }
}

/// Summary of a finished crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    pub job_id: String,

    /// The zip archive holding every saved page
    pub archive_path: PathBuf,

    /// Pages fetched, whether or not they could be saved
    pub pages_visited: usize,

    /// Pages written to the archive
    pub pages_saved: usize,

    /// Pages that failed to fetch or to write
    pub pages_failed: usize,

    /// Whether the temporary output directory was removed
    pub source_removed: bool,

    pub state: CrawlState,
}

/// Main crawler coordinator structure
///
/// A coordinator owns everything one crawl needs: the job, the fetch
/// adapter, the frontier and the page writer. Nothing is shared between
/// coordinators.
pub struct Coordinator<F> {
    job: CrawlJob,
    adapter: FetchAdapter<F>,
    frontier: Frontier,
    writer: PageWriter,
    state: CrawlState,
    pages_failed: usize,
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a coordinator with default fetch options
    pub fn new(job: CrawlJob, fetcher: F) -> Self {
        Self::from_adapter(job, FetchAdapter::new(fetcher))
    }

    /// Creates a coordinator around an already configured adapter
    pub fn from_adapter(job: CrawlJob, adapter: FetchAdapter<F>) -> Self {
        let frontier = Frontier::new(job.base.seed());
        let writer = PageWriter::new(job.output_dir.clone());

        Self {
            job,
            adapter,
            frontier,
            writer,
            state: CrawlState::Idle,
            pages_failed: 0,
        }
    }

    /// Replaces the initial frontier
    pub fn with_frontier(mut self, frontier: Frontier) -> Self {
        self.frontier = frontier;
        self
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn job(&self) -> &CrawlJob {
        &self.job
    }

    /// Runs the crawl to completion and archives the result
    ///
    /// This is the core crawling logic that:
    /// 1. Creates the output directory
    /// 2. Pops URLs until the frontier is empty or the limit is reached
    /// 3. Fetches each page and writes it as Markdown
    /// 4. Enqueues discovered links that belong to the site
    /// 5. Zips the output directory and removes it
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The archive exists
    /// * `Err(HarvestError)` - Setup or archiving failed; no archive is reported
    pub async fn run(&mut self) -> Result<CrawlReport, HarvestError> {
        let running = self.state.transition(CrawlState::Running)?;

        let output_dir = self.job.output_dir.clone();
        if let Err(source) = fs::create_dir_all(&output_dir) {
            self.state = self.state.transition(CrawlState::Failed)?;
            tracing::error!(
                "Failed to create output directory {}: {}",
                output_dir.display(),
                source
            );
            return Err(HarvestError::Io {
                path: output_dir,
                source,
            });
        }
        self.state = running;

        tracing::info!(
            "Starting crawl {} of {} (limit {})",
            self.job.id,
            self.job.base,
            self.job.page_limit
        );

        let options = self.adapter.options();
        if !options.remove_overlay_elements {
            tracing::debug!("Overlay removal is off; overlays stay in saved pages");
        }
        if !options.bypass_cache {
            tracing::debug!("Cache bypass is off; pages may be served from caches");
        }

        self.crawl_loop().await;

        self.state = self.state.transition(CrawlState::Draining)?;
        println!("Crawling completed.");

        let outcome = match archive_directory(&output_dir) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.state = self.state.transition(CrawlState::Failed)?;
                tracing::error!("Failed to archive {}: {}", output_dir.display(), e);
                return Err(e.into());
            }
        };

        println!(
            "Results have been zipped to {}",
            outcome.archive_path.display()
        );
        if outcome.source_removed {
            println!(
                "Temporary output directory '{}' has been removed.",
                output_dir.display()
            );
        } else {
            println!(
                "Warning: temporary output directory '{}' could not be removed.",
                output_dir.display()
            );
        }

        self.state = self.state.transition(CrawlState::Done)?;

        let report = CrawlReport {
            job_id: self.job.id.clone(),
            archive_path: outcome.archive_path,
            pages_visited: self.frontier.visited_len(),
            pages_saved: self.writer.written(),
            pages_failed: self.pages_failed,
            source_removed: outcome.source_removed,
            state: self.state,
        };

        tracing::info!(
            "Crawl {} finished: {} visited, {} saved, {} failed",
            report.job_id,
            report.pages_visited,
            report.pages_saved,
            report.pages_failed
        );

        Ok(report)
    }

    async fn crawl_loop(&mut self) {
        let limit = self.job.page_limit;

        while !self.frontier.is_exhausted(limit) {
            let Some(url) = self.frontier.pop() else {
                break;
            };

            if self.frontier.is_visited(&url) {
                continue;
            }

            println!(
                "Crawling ({}/{}/{}): {}",
                self.frontier.visited_len() + 1,
                self.frontier.pending_len(),
                limit,
                url
            );

            let page = self.adapter.fetch(&url).await;
            self.frontier.mark_visited(url.clone());

            if page.success {
                self.save_page(&url, &page);
            } else {
                self.pages_failed += 1;
            }

            self.enqueue_links(&page.internal_links);
        }
    }

    /// Writes a fetched page; a failure only affects this page
    fn save_page(&mut self, url: &Url, page: &PageResult) {
        let name = name_for(page.title.as_deref(), url.as_str(), &self.job.base);

        match self.writer.write(&name, &page.content) {
            Ok(path) => tracing::debug!("Saved {} to {}", url, path.display()),
            Err(e) => {
                tracing::warn!("Error processing {}: failed to write {}: {}", url, name, e);
                self.pages_failed += 1;
            }
        }
    }

    fn enqueue_links(&mut self, links: &[DiscoveredLink]) {
        for link in links {
            let Some(href) = link.href() else {
                tracing::debug!("Dropping link without href: {:?}", link);
                continue;
            };

            let Some(resolved) = resolve(href, &self.job.base) else {
                tracing::debug!("Dropping unresolvable link: {}", href);
                continue;
            };

            if !self.job.base.contains(&resolved) {
                tracing::debug!("Dropping off-site link: {}", resolved);
                continue;
            }

            if self.frontier.enqueue(resolved.clone()) {
                tracing::trace!("Queued {}", resolved);
            }
        }
    }
}

/// Runs a crawl from a seed URL using the given configuration
///
/// # Arguments
///
/// * `seed` - The seed URL
/// * `config` - Limit and output location come from `[crawler]`, fetch
///   options from `[fetcher]`
/// * `fetcher` - The page-fetch collaborator
///
/// # Example
///
/// ```no_run
/// use site_harvest::config::Config;
/// use site_harvest::crawler::{run_crawl, AnyFetcher};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let fetcher = AnyFetcher::from_config(&config.fetcher)?;
/// let report = run_crawl("https://example.com", &config, fetcher).await?;
/// println!("{}", report.archive_path.display());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl<F: PageFetcher>(
    seed: &str,
    config: &Config,
    fetcher: F,
) -> Result<CrawlReport, HarvestError> {
    let job = CrawlJob::new(seed, config.crawler.limit, &config.crawler.output)?;
    let adapter = FetchAdapter::with_options(fetcher, FetchOptions::from(&config.fetcher));

    Coordinator::from_adapter(job, adapter).run().await
}
