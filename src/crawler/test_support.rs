//! In-memory document source and page builders for unit tests

use crate::crawler::fetcher::{DocumentSource, ParsedDocument};
use crate::{Result, ScrapeError};
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned pages by URL
///
/// A URL registered with several bodies serves them in order and then keeps
/// repeating the last one. A `None` body answers that request with a 503.
/// Unknown URLs fail with a 404.
#[derive(Default)]
pub struct StaticSource {
    pages: HashMap<String, Vec<Option<String>>>,
    hits: Mutex<HashMap<String, usize>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, body: String) -> Self {
        self.rotating(url, vec![body])
    }

    pub fn rotating(mut self, url: &str, bodies: Vec<String>) -> Self {
        self.pages
            .insert(url.to_string(), bodies.into_iter().map(Some).collect());
        self
    }

    /// Fails the first `failures` requests for `url`, then serves `body`
    pub fn flaky(mut self, url: &str, failures: usize, body: String) -> Self {
        let mut bodies = vec![None; failures];
        bodies.push(Some(body));
        self.pages.insert(url.to_string(), bodies);
        self
    }

    /// Number of times `url` has been fetched
    pub fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }
}

impl DocumentSource for StaticSource {
    async fn fetch(&self, url: &str) -> Result<ParsedDocument> {
        let index = {
            let mut hits = self.hits.lock().unwrap();
            let count = hits.entry(url.to_string()).or_insert(0);
            *count += 1;
            *count - 1
        };

        let bodies = match self.pages.get(url) {
            Some(bodies) if !bodies.is_empty() => bodies,
            _ => {
                return Err(ScrapeError::HttpStatus {
                    url: url.to_string(),
                    status: 404,
                })
            }
        };

        match &bodies[index.min(bodies.len() - 1)] {
            Some(body) => Ok(ParsedDocument::parse(url, body)),
            None => Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: 503,
            }),
        }
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Minimal speaker payload JSON
pub fn speaker_payload(id: u64, username: &str) -> String {
    format!(
        r#"{{"id":{},"username":"{}","name":"Speaker {}","twitter":"","youtube":null,"bio":"Bio of {}"}}"#,
        id, username, id, username
    )
}

/// Listing page with a result count indicator and one node per payload
pub fn listing_html(total: usize, payloads: &[String]) -> String {
    let nodes: String = payloads
        .iter()
        .map(|payload| {
            format!(
                r#"<div class="space-y-6" speaker="{}"><div><img src="/avatars/x.png"></div></div>"#,
                escape_attr(payload)
            )
        })
        .collect();

    format!(
        r#"<html><body>{}<p class="text-sm text-gray-700 leading-5 dark:text-gray-400">Showing <span class="font-medium">1</span> to <span class="font-medium">{}</span> of <span class="font-medium">{}</span> results</p></body></html>"#,
        nodes,
        payloads.len(),
        total
    )
}

/// Profile page linking to the given talk hrefs
pub fn profile_html(hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<a class="flex flex-col rounded-lg hover:shadow-lg overflow-hidden" href="{}">card</a>"#,
                href
            )
        })
        .collect();

    format!("<html><body>{}</body></html>", links)
}

/// Talk page carrying only a title
pub fn talk_html(title: &str) -> String {
    format!(
        r#"<html><body><span class="mt-2 block text-3xl font-bold leading-8 tracking-tight text-gray-900 sm:text-4xl">{}</span></body></html>"#,
        title
    )
}
