//! Configuration module for Site-Harvest
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every field has a default, so running without a file
//! is equivalent to an empty one.
//!
//! # Example
//!
//! ```no_run
//! use site_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Crawler will visit at most {} pages", config.crawler.limit);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, FetcherConfig, DEFAULT_LIMIT, DEFAULT_OUTPUT};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
pub use validation::{validate, validate_crawler_config, validate_service_url};
