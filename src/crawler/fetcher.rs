//! Document fetcher implementation
//!
//! This module handles every HTTP request the harvester makes:
//! - Building the HTTP client with a proper user agent string
//! - GET requests for listing, profile and talk pages
//! - Lenient HTML parsing of whatever body comes back

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::{Result, ScrapeError};
use reqwest::Client;
use scraper::Html;
use std::time::Duration;

/// A parsed HTML document together with the URL it was fetched from
///
/// Owned by the call that fetched it and dropped once its fields are read.
#[derive(Debug)]
pub struct ParsedDocument {
    url: String,
    html: Html,
}

impl ParsedDocument {
    /// Parses a response body, recovering from malformed markup
    ///
    /// Parser errors are logged and otherwise ignored.
    pub fn parse(url: impl Into<String>, body: &str) -> Self {
        let url = url.into();
        let html = Html::parse_document(body);

        if !html.errors.is_empty() {
            tracing::trace!(
                "Recovered from {} markup errors in {}",
                html.errors.len(),
                url
            );
        }

        Self { url, html }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn html(&self) -> &Html {
        &self.html
    }
}

/// Anything that can turn a URL into a parsed document
#[allow(async_fn_in_trait)]
pub trait DocumentSource {
    /// Fetches and parses one page
    ///
    /// Transport errors and non-2xx statuses are returned as errors, never
    /// as an empty document.
    async fn fetch(&self, url: &str) -> Result<ParsedDocument>;
}

/// Fetches documents over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from the configuration
    pub fn new(user_agent: &UserAgentConfig, crawler: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(user_agent, crawler)?,
        })
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl DocumentSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<ParsedDocument> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // The declared charset is not trusted; bodies are read as UTF-8
        let bytes = response.bytes().await.map_err(|source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        })?;
        let body = String::from_utf8_lossy(&bytes);

        Ok(ParsedDocument::parse(url, &body))
    }
}

/// Formats the user agent string
///
/// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
pub fn format_user_agent(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use speaker_harvest::config::{CrawlerConfig, UserAgentConfig};
/// use speaker_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(format_user_agent(user_agent))
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}
