//! Crawler module for page fetching and crawl orchestration
//!
//! This module contains the core crawling logic, including:
//! - The page-fetch collaborator contract and its implementations
//! - HTML parsing, Markdown conversion and link extraction
//! - The fetch adapter that turns every fetch outcome into a `PageResult`
//! - The frontier of visited and pending URLs
//! - Overall crawl coordination

mod adapter;
mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod service;

pub use adapter::{FetchAdapter, PageResult};
pub use coordinator::{run_crawl, Coordinator, CrawlJob, CrawlReport};
pub use fetcher::{
    build_http_client, AnyFetcher, DiscoveredLink, FetchOptions, FetchedPage, HttpPageFetcher,
    PageFetcher,
};
pub use frontier::Frontier;
pub use parser::{html_to_markdown, parse_page, ParsedPage};
pub use service::ServiceFetcher;
