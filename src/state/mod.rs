//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: The lifecycle of a crawl job (idle, running, draining, done, failed)

mod crawl_state;

pub use crawl_state::CrawlState;
