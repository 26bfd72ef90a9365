//! Configuration module for Speaker Harvest
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file and the environment override for the site URL.
//!
//! # Example
//!
//! ```no_run
//! use speaker_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Listing page: {:?}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, SelectorConfig, SiteConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{
    apply_env_overrides, compute_config_hash, load_config, load_config_with_hash,
    load_default_config, parse_config,
};
pub use validation::validate;

/// Environment variable holding the site URL
pub const SITE_URL_ENV: &str = "CRAWLER_SITE_URL";
