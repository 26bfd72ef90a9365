//! Speaker Harvest: structured speaker and talk extraction
//!
//! This crate walks a conference site's speaker listing, follows each
//! speaker's profile page and every talk page linked from it, and assembles
//! normalized speaker records ready to be written out as JSON.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Speaker Harvest operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Required field '{field}' not found on {url}")]
    ExtractionMiss { url: String, field: &'static str },

    #[error("Malformed speaker payload: {0}")]
    MalformedPayload(String),

    #[error("Could not read the result count from {url}")]
    TargetCount { url: String },

    #[error("Collected {collected} of {target} speakers after {iterations} listing fetches")]
    TargetNotReached {
        target: usize,
        collected: usize,
        iterations: u32,
    },

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::LoopState,
        to: state::LoopState,
    },

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// Returns true for network or transport failures on a single URL
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::HttpStatus { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("No site URL configured (set site.base-url or {})", config::SITE_URL_ENV)]
    MissingBaseUrl,
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),

    #[error("URL cannot be used as a base: {0}")]
    CannotBeABase(String),
}

/// Result type alias for Speaker Harvest operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Harvester, HttpFetcher};
pub use model::{Speaker, SpeakerId, Talk};
pub use state::LoopState;
