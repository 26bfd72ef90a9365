//! Speaker resolution
//!
//! Turns a listing payload into a normalized `Speaker`, pulling in the
//! speaker's talks through `TalkResolver`.

use crate::crawler::fetcher::DocumentSource;
use crate::crawler::talks::TalkResolver;
use crate::extract::{collapse_newlines, decode_entities};
use crate::model::{RawSpeaker, Speaker, Talk};
use crate::url::resolve_href;
use crate::Result;
use url::Url;

const TWITTER_PREFIX: &str = "https://x.com/";
const YOUTUBE_PREFIX: &str = "https://youtube.com/@";

/// A resolved speaker plus the number of talks that had to be dropped
#[derive(Debug)]
pub struct ResolvedSpeaker {
    pub speaker: Speaker,
    pub talks_dropped: usize,
}

/// Assembles speaker records from listing payloads
pub struct SpeakerResolver<'a, S> {
    talks: TalkResolver<'a, S>,
    base_url: &'a Url,
    include_images: bool,
}

impl<'a, S: DocumentSource> SpeakerResolver<'a, S> {
    pub fn new(talks: TalkResolver<'a, S>, base_url: &'a Url, include_images: bool) -> Self {
        Self {
            talks,
            base_url,
            include_images,
        }
    }

    /// Resolves one speaker, fetching the profile page and all talk pages
    ///
    /// Fails when the profile page cannot be fetched; individual talk
    /// failures only shrink the talk list.
    pub async fn resolve(
        &self,
        raw: RawSpeaker,
        image_src: Option<&str>,
    ) -> Result<ResolvedSpeaker> {
        let resolved = self.talks.resolve_talks(&raw.username).await?;

        let image = if self.include_images {
            image_src
                .and_then(|src| resolve_href(self.base_url, src))
                .map(String::from)
        } else {
            None
        };

        Ok(ResolvedSpeaker {
            speaker: build_speaker(raw, image, resolved.talks),
            talks_dropped: resolved.dropped,
        })
    }
}

/// Normalizes a raw payload into a speaker record
pub fn build_speaker(raw: RawSpeaker, image: Option<String>, talks: Vec<Talk>) -> Speaker {
    Speaker {
        id: raw.id,
        name: raw.name.as_deref().map(decode_entities).unwrap_or_default(),
        location: raw.location,
        company: raw.company,
        job_title: raw.job_title,
        twitter: handle_url(TWITTER_PREFIX, raw.twitter.as_deref()),
        website: raw.website,
        youtube: handle_url(YOUTUBE_PREFIX, raw.youtube.as_deref()),
        email: raw.email,
        image,
        bio: raw
            .bio
            .as_deref()
            .map(|bio| collapse_newlines(&decode_entities(bio)))
            .unwrap_or_default(),
        talks,
    }
}

/// Turns a social handle into a profile URL; blank handles yield `None`
pub fn handle_url(prefix: &str, handle: Option<&str>) -> Option<String> {
    let handle = handle?.trim();
    if handle.is_empty() {
        None
    } else {
        Some(format!("{}{}", prefix, handle))
    }
}
