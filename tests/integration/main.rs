//! Integration tests for Site-Harvest
//!
//! - `crawl_tests`: full crawls against an in-memory site
//! - `http_tests`: full crawls through the HTTP and service fetchers, using
//!   wiremock servers

mod crawl_tests;
mod http_tests;
mod support;
