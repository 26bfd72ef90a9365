use crate::extract::selectors as defaults;
use serde::Deserialize;

/// Main configuration structure for Speaker Harvest
///
/// Every section is optional; a run with no config file at all is driven
/// entirely by the site URL from the environment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub selectors: SelectorConfig,
}

/// The site being harvested
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Listing page URL; profile pages live at `<base-url><username>`
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,

    /// Whether to recover each speaker's image from the listing markup
    #[serde(rename = "include-images")]
    pub include_images: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            include_images: true,
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Upper bound on listing page fetches before giving up on the target count
    #[serde(rename = "max-iterations")]
    pub max_iterations: u32,

    /// Number of talk detail pages fetched at once for a single speaker
    #[serde(rename = "talk-concurrency")]
    pub talk_concurrency: usize,

    /// Pause between listing page re-fetches (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Total timeout for a single request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connect timeout for a single request (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            talk_concurrency: 1,
            request_delay_ms: 0,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SpeakerHarvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON file the speakers are written to
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "speakers.json".to_string(),
        }
    }
}

/// Selector strings for every content block the harvester reads
///
/// The site's class strings are its only stable anchors, so they all live
/// here and can be overridden from the `[selectors]` table when the markup
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    #[serde(rename = "listing-node")]
    pub listing_node: String,

    /// Attribute on the listing node holding the inline JSON payload
    #[serde(rename = "payload-attribute")]
    pub payload_attribute: String,

    #[serde(rename = "listing-image")]
    pub listing_image: String,

    #[serde(rename = "result-count")]
    pub result_count: String,

    #[serde(rename = "talk-link")]
    pub talk_link: String,

    #[serde(rename = "talk-title")]
    pub talk_title: String,

    #[serde(rename = "talk-duration")]
    pub talk_duration: String,

    #[serde(rename = "slide-link")]
    pub slide_link: String,

    #[serde(rename = "about-block")]
    pub about_block: String,

    #[serde(rename = "description-block")]
    pub description_block: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            listing_node: defaults::LISTING_NODE.to_string(),
            payload_attribute: defaults::PAYLOAD_ATTRIBUTE.to_string(),
            listing_image: defaults::LISTING_IMAGE.to_string(),
            result_count: defaults::RESULT_COUNT.to_string(),
            talk_link: defaults::TALK_LINK.to_string(),
            talk_title: defaults::TALK_TITLE.to_string(),
            talk_duration: defaults::TALK_DURATION.to_string(),
            slide_link: defaults::SLIDE_LINK.to_string(),
            about_block: defaults::ABOUT_BLOCK.to_string(),
            description_block: defaults::DESCRIPTION_BLOCK.to_string(),
        }
    }
}
