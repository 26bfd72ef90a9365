//! Talk resolution
//!
//! Fetches a speaker's profile page, then every talk page linked from it.
//! A talk that cannot be fetched or read is dropped on its own; the rest of
//! the speaker's talks are still returned, in profile page order.

use crate::crawler::fetcher::DocumentSource;
use crate::extract::{ProfilePage, SiteSelectors, TalkPage};
use crate::model::Talk;
use crate::url::{profile_url, resolve_href};
use crate::{Result, ScrapeError};
use futures::stream::{self, StreamExt};
use url::Url;

/// Talks recovered for one speaker
#[derive(Debug, Default)]
pub struct ResolvedTalks {
    /// Successfully extracted talks, in profile page order
    pub talks: Vec<Talk>,

    /// Number of talk links that were dropped
    pub dropped: usize,
}

/// Resolves a username to its ordered list of talks
pub struct TalkResolver<'a, S> {
    source: &'a S,
    base_url: &'a Url,
    selectors: &'a SiteSelectors,
    concurrency: usize,
}

impl<'a, S: DocumentSource> TalkResolver<'a, S> {
    /// Creates a resolver
    ///
    /// `concurrency` bounds how many talk pages are in flight at once; 1
    /// fetches them strictly one after another.
    pub fn new(
        source: &'a S,
        base_url: &'a Url,
        selectors: &'a SiteSelectors,
        concurrency: usize,
    ) -> Self {
        Self {
            source,
            base_url,
            selectors,
            concurrency: concurrency.max(1),
        }
    }

    /// Fetches the profile page for `username` and every talk it links to
    ///
    /// Fails only when the profile page itself cannot be fetched.
    pub async fn resolve_talks(&self, username: &str) -> Result<ResolvedTalks> {
        let profile = profile_url(self.base_url, username)?;

        let hrefs = {
            let doc = self.source.fetch(profile.as_str()).await?;
            ProfilePage::new(&doc, self.selectors).talk_links()
        };
        tracing::debug!("Found {} talk links for {}", hrefs.len(), username);

        // `buffered` yields results in input order whatever order fetches finish in
        let outcomes: Vec<Result<Talk>> = stream::iter(hrefs)
            .map(|href| self.resolve_talk(href, &profile))
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut resolved = ResolvedTalks::default();
        for outcome in outcomes {
            match outcome {
                Ok(talk) => resolved.talks.push(talk),
                Err(e) => {
                    tracing::warn!("Dropping talk for {}: {}", username, e);
                    resolved.dropped += 1;
                }
            }
        }

        Ok(resolved)
    }

    /// Fetches one talk page and extracts its record
    ///
    /// Relative hrefs resolve against the site's base URL.
    async fn resolve_talk(&self, href: Option<String>, profile: &Url) -> Result<Talk> {
        let talk_url = href
            .as_deref()
            .and_then(|href| resolve_href(self.base_url, href))
            .ok_or_else(|| ScrapeError::ExtractionMiss {
                url: profile.to_string(),
                field: "talk_url",
            })?;

        let doc = self.source.fetch(talk_url.as_str()).await?;
        let page = TalkPage::new(&doc, self.selectors);

        let title = page.title().ok_or_else(|| ScrapeError::ExtractionMiss {
            url: talk_url.to_string(),
            field: "title",
        })?;

        Ok(Talk {
            title,
            duration: page.duration(),
            talk_url: talk_url.into(),
            slider_url: page.slide_url(),
            about_this_talk: page.about(),
            description: page.description(),
        })
    }
}
