//! Typed views over the three page shapes of the site
//!
//! Each view borrows a fetched document and the compiled selector table and
//! exposes only the fields that page kind carries.

use crate::crawler::ParsedDocument;
use crate::extract::selectors::SiteSelectors;
use crate::extract::text::{block_text, decode_entities, node_text};
use scraper::{ElementRef, Node};

/// Child position of the duration text inside its line, counting text nodes
const DURATION_CHILD_INDEX: usize = 2;

/// One candidate speaker recovered from the listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Raw JSON payload from the node's data attribute
    pub payload: String,

    /// Image `src` exactly as it appears in the markup
    pub image_src: Option<String>,
}

/// The paginated speaker overview
pub struct ListingPage<'a> {
    doc: &'a ParsedDocument,
    selectors: &'a SiteSelectors,
}

impl<'a> ListingPage<'a> {
    pub fn new(doc: &'a ParsedDocument, selectors: &'a SiteSelectors) -> Self {
        Self { doc, selectors }
    }

    /// Reads the total number of speakers from the result count indicator
    ///
    /// The total is the last numeric `span` in the indicator; if the spans
    /// are missing, the last number in the indicator's text is used instead.
    pub fn target_count(&self) -> Option<usize> {
        let indicator = self
            .doc
            .html()
            .select(&self.selectors.result_count)
            .next()?;

        indicator
            .select(&self.selectors.count_value)
            .filter_map(|span| parse_count(&node_text(span)))
            .last()
            .or_else(|| {
                node_text(indicator)
                    .split_whitespace()
                    .filter_map(parse_count)
                    .last()
            })
    }

    /// Enumerates listing nodes carrying a payload, in document order
    pub fn entries(&self) -> Vec<ListingEntry> {
        self.doc
            .html()
            .select(&self.selectors.listing_node)
            .filter_map(|node| {
                let payload = node.value().attr(&self.selectors.payload_attribute)?;
                Some(ListingEntry {
                    payload: payload.to_string(),
                    image_src: self.image_src(node),
                })
            })
            .collect()
    }

    /// Finds the speaker image inside a listing node
    ///
    /// Falls back to the first element child's first element child, which
    /// is where the avatar sits in the current markup.
    fn image_src(&self, node: ElementRef<'_>) -> Option<String> {
        let anchored = node
            .select(&self.selectors.listing_image)
            .find_map(|img| non_empty(img.value().attr("src")));

        anchored.or_else(|| {
            let outer = node.children().find_map(ElementRef::wrap)?;
            let inner = outer.children().find_map(ElementRef::wrap)?;
            non_empty(inner.value().attr("src"))
        })
    }
}

/// A speaker's profile page
pub struct ProfilePage<'a> {
    doc: &'a ParsedDocument,
    selectors: &'a SiteSelectors,
}

impl<'a> ProfilePage<'a> {
    pub fn new(doc: &'a ParsedDocument, selectors: &'a SiteSelectors) -> Self {
        Self { doc, selectors }
    }

    /// Talk link hrefs in document order; `None` for a link without an href
    pub fn talk_links(&self) -> Vec<Option<String>> {
        self.doc
            .html()
            .select(&self.selectors.talk_link)
            .map(|link| non_empty(link.value().attr("href")))
            .collect()
    }
}

/// A single talk's detail page
pub struct TalkPage<'a> {
    doc: &'a ParsedDocument,
    selectors: &'a SiteSelectors,
}

impl<'a> TalkPage<'a> {
    pub fn new(doc: &'a ParsedDocument, selectors: &'a SiteSelectors) -> Self {
        Self { doc, selectors }
    }

    /// Talk title, trimmed and entity-decoded
    pub fn title(&self) -> Option<String> {
        self.first(&self.selectors.talk_title)
            .map(|el| decode_entities(node_text(el).trim()))
    }

    /// Free-text duration
    ///
    /// Prefers the last non-empty text node directly inside the duration
    /// line, which follows the icon and any label; otherwise falls back to
    /// whatever sits at the fixed child position. Absent when neither exists.
    pub fn duration(&self) -> Option<String> {
        let line = self.first(&self.selectors.talk_duration)?;

        let direct = line
            .children()
            .filter_map(|child| match child.value() {
                Node::Text(text) => Some(text.trim()),
                _ => None,
            })
            .filter(|text| !text.is_empty())
            .last()
            .map(str::to_string);

        direct.or_else(|| {
            let child = line.children().nth(DURATION_CHILD_INDEX)?;
            let text = match ElementRef::wrap(child) {
                Some(el) => node_text(el),
                None => child.value().as_text()?.trim().to_string(),
            };
            non_empty(Some(&text))
        })
    }

    /// Href of the first slide link
    pub fn slide_url(&self) -> Option<String> {
        self.first(&self.selectors.slide_link)
            .and_then(|el| non_empty(el.value().attr("href")))
    }

    /// Text of the "about this talk" block
    pub fn about(&self) -> Option<String> {
        self.first(&self.selectors.about_block).map(block_text)
    }

    /// Text of the description block
    pub fn description(&self) -> Option<String> {
        self.first(&self.selectors.description_block).map(block_text)
    }

    fn first(&self, selector: &scraper::Selector) -> Option<ElementRef<'a>> {
        self.doc.html().select(selector).next()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_count(token: &str) -> Option<usize> {
    let digits: String = token
        .trim()
        .trim_matches(|c: char| !c.is_ascii_digit())
        .chars()
        .filter(|c| *c != ',' && *c != '.')
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    digits.parse().ok()
}
