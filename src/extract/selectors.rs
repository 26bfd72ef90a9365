//! Selector table for the speaker site
//!
//! The site marks its content blocks only through Tailwind class strings, so
//! every selector matches the exact `class` attribute value. A markup change
//! on the site means updating this table (or the `[selectors]` config
//! section), nothing else.

use crate::config::SelectorConfig;
use crate::ConfigError;
use scraper::Selector;

/// One repeated block on the listing page, carrying the speaker payload
pub const LISTING_NODE: &str = r#"div[class="space-y-6"]"#;

/// Attribute on the listing node holding the inline JSON payload
pub const PAYLOAD_ATTRIBUTE: &str = "speaker";

/// Speaker image inside a listing node
pub const LISTING_IMAGE: &str = "img[src]";

/// Pagination summary paragraph ("Showing 1 to 12 of 48 results")
pub const RESULT_COUNT: &str = r#"p[class="text-sm text-gray-700 leading-5 dark:text-gray-400"]"#;

/// Talk card link on a profile page
pub const TALK_LINK: &str = r#"a[class="flex flex-col rounded-lg hover:shadow-lg overflow-hidden"]"#;

/// Talk title on a talk page
pub const TALK_TITLE: &str = r#"span[class="mt-2 block text-3xl font-bold leading-8 tracking-tight text-gray-900 sm:text-4xl"]"#;

/// Line holding the talk duration on a talk page
pub const TALK_DURATION: &str = r#"span[class="mt-3 block text-sm tracking-tight text-gray-700"]"#;

/// Link to the talk's slides
pub const SLIDE_LINK: &str = r#"a[class="block"]"#;

/// "About this talk" content block
pub const ABOUT_BLOCK: &str = r#"div[class="prose prose-sm md:prose-base prose-indigo mx-auto bg-gray-100 text-gray-700 mt-12 px-4 pb-1 pt-5 shadow rounded-lg"] > div"#;

/// Talk description content block
pub const DESCRIPTION_BLOCK: &str = r#"div[class="relative group prose prose-lg prose-indigo mx-auto mt-6 text-gray-500"] > div"#;

/// Value spans inside the result count paragraph
const COUNT_VALUE: &str = "span";

/// Compiled selectors used by the page views
#[derive(Debug, Clone)]
pub struct SiteSelectors {
    pub(crate) listing_node: Selector,
    pub(crate) payload_attribute: String,
    pub(crate) listing_image: Selector,
    pub(crate) result_count: Selector,
    pub(crate) count_value: Selector,
    pub(crate) talk_link: Selector,
    pub(crate) talk_title: Selector,
    pub(crate) talk_duration: Selector,
    pub(crate) slide_link: Selector,
    pub(crate) about_block: Selector,
    pub(crate) description_block: Selector,
}

impl SiteSelectors {
    /// Compiles every selector string, failing on the first invalid one
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        if config.payload_attribute.trim().is_empty() {
            return Err(ConfigError::InvalidSelector(
                "payload-attribute cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            listing_node: compile_one("listing-node", &config.listing_node)?,
            payload_attribute: config.payload_attribute.trim().to_string(),
            listing_image: compile_one("listing-image", &config.listing_image)?,
            result_count: compile_one("result-count", &config.result_count)?,
            count_value: compile_one("count-value", COUNT_VALUE)?,
            talk_link: compile_one("talk-link", &config.talk_link)?,
            talk_title: compile_one("talk-title", &config.talk_title)?,
            talk_duration: compile_one("talk-duration", &config.talk_duration)?,
            slide_link: compile_one("slide-link", &config.slide_link)?,
            about_block: compile_one("about-block", &config.about_block)?,
            description_block: compile_one("description-block", &config.description_block)?,
        })
    }

    /// Compiles the built-in selector table
    pub fn site_defaults() -> Result<Self, ConfigError> {
        Self::compile(&SelectorConfig::default())
    }
}

fn compile_one(name: &str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::InvalidSelector(format!("{} '{}': {:?}", name, selector, e)))
}
