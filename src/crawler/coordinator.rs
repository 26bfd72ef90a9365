//! Harvest coordinator - the pagination and dedup loop
//!
//! The listing page has no page or cursor parameter; every request returns a
//! different, possibly overlapping subset of speakers. The loop keeps
//! re-fetching it and folding unseen speakers into the accumulator until the
//! accumulator holds as many speakers as the page says exist.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{DocumentSource, HttpFetcher, ParsedDocument};
use crate::crawler::progress::{NoProgress, Progress};
use crate::crawler::speaker::SpeakerResolver;
use crate::crawler::talks::TalkResolver;
use crate::extract::{ListingEntry, ListingPage, SiteSelectors};
use crate::model::{RawSpeaker, Speaker, SpeakerId};
use crate::output::RunStats;
use crate::state::LoopState;
use crate::url::normalize_base_url;
use crate::{ConfigError, Result, ScrapeError};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Main harvest loop structure
pub struct Harvester<S> {
    source: S,
    base_url: Url,
    include_images: bool,
    crawler: CrawlerConfig,
    selectors: SiteSelectors,
    speakers: Vec<Speaker>,
    seen: HashSet<SpeakerId>,
    state: LoopState,
    stats: RunStats,
}

impl<S: DocumentSource> Harvester<S> {
    /// Creates a new harvester reading pages from `source`
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Ready to run
    /// * `Err(ScrapeError)` - The base URL or a selector is invalid
    pub fn new(config: &Config, source: S) -> Result<Self> {
        let base_url = config
            .site
            .base_url
            .as_deref()
            .ok_or(ConfigError::MissingBaseUrl)?;

        Ok(Self {
            source,
            base_url: normalize_base_url(base_url)?,
            include_images: config.site.include_images,
            crawler: config.crawler.clone(),
            selectors: SiteSelectors::compile(&config.selectors)?,
            speakers: Vec::new(),
            seen: HashSet::new(),
            state: LoopState::default(),
            stats: RunStats::default(),
        })
    }

    /// Runs the loop to completion
    ///
    /// 1. Fetch the listing page and read the target count from it
    /// 2. Fold the page's unseen speakers into the accumulator
    /// 3. Re-fetch the listing page until the accumulator reaches the target
    ///
    /// Listing page fetch failures, a missing target count, and running out
    /// of iterations end the run with an error. Failures on a single speaker
    /// or talk only drop that item.
    pub async fn run(&mut self, progress: &dyn Progress) -> Result<()> {
        let listing_url = self.base_url.to_string();
        self.stats.mark_started();

        tracing::info!("Reading result count from {}", listing_url);
        let first = self.source.fetch(&listing_url).await?;
        let target = ListingPage::new(&first, &self.selectors)
            .target_count()
            .ok_or_else(|| ScrapeError::TargetCount {
                url: listing_url.clone(),
            })?;

        self.stats.target = target;
        tracing::info!("Site reports {} speakers", target);
        progress.started(target);

        // The first fetch doubles as the first iteration
        let mut pending: Option<ParsedDocument> = Some(first);

        while self.speakers.len() < target {
            self.state = self.state.transition(LoopState::Accumulating)?;

            if self.stats.iterations >= self.crawler.max_iterations {
                return Err(ScrapeError::TargetNotReached {
                    target,
                    collected: self.speakers.len(),
                    iterations: self.stats.iterations,
                });
            }

            let entries = {
                let doc = match pending.take() {
                    Some(doc) => doc,
                    None => {
                        if self.crawler.request_delay_ms > 0 {
                            tokio::time::sleep(Duration::from_millis(
                                self.crawler.request_delay_ms,
                            ))
                            .await;
                        }
                        self.source.fetch(&listing_url).await?
                    }
                };
                ListingPage::new(&doc, &self.selectors).entries()
            };

            self.stats.iterations += 1;
            let before = self.speakers.len();
            self.absorb(entries, target, progress).await;

            tracing::debug!(
                "Iteration {}: {} new speakers, {}/{} collected",
                self.stats.iterations,
                self.speakers.len() - before,
                self.speakers.len(),
                target
            );
        }

        self.state = self.state.transition(LoopState::Done)?;
        self.stats.mark_finished();
        progress.finished(self.speakers.len());

        tracing::info!(
            "Harvest completed: {} speakers after {} listing fetches",
            self.speakers.len(),
            self.stats.iterations
        );

        Ok(())
    }

    /// Folds one listing page's entries into the accumulator
    ///
    /// Identities are checked before resolution and recorded only after it
    /// succeeds, so a speaker whose profile fails stays eligible for a later
    /// iteration. Stops as soon as the target is reached.
    async fn absorb(&mut self, entries: Vec<ListingEntry>, target: usize, progress: &dyn Progress) {
        let resolver = SpeakerResolver::new(
            TalkResolver::new(
                &self.source,
                &self.base_url,
                &self.selectors,
                self.crawler.talk_concurrency,
            ),
            &self.base_url,
            self.include_images,
        );

        for entry in entries {
            if self.speakers.len() >= target {
                break;
            }
            self.stats.listing_nodes += 1;

            let raw = match RawSpeaker::from_json(&entry.payload) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::debug!("Skipping listing node: {}", e);
                    self.stats.malformed_payloads += 1;
                    continue;
                }
            };

            if self.seen.contains(&raw.id) {
                self.stats.duplicates_skipped += 1;
                continue;
            }

            let id = raw.id.clone();
            let username = raw.username.clone();
            match resolver.resolve(raw, entry.image_src.as_deref()).await {
                Ok(resolved) => {
                    self.stats.speakers_resolved += 1;
                    self.stats.talks_resolved += resolved.speaker.talks.len() as u64;
                    self.stats.talks_dropped += resolved.talks_dropped as u64;

                    tracing::info!(
                        "Collected speaker {} ({}) with {} talks",
                        id,
                        username,
                        resolved.speaker.talks.len()
                    );
                    progress.speaker_added(&resolved.speaker, self.speakers.len() + 1);

                    self.seen.insert(id);
                    self.speakers.push(resolved.speaker);
                }
                Err(e) => {
                    tracing::warn!("Failed to resolve speaker {} ({}): {}", id, username, e);
                    self.stats.speakers_failed += 1;
                }
            }
        }
    }

    /// Speakers collected so far, in order of first observation
    pub fn speakers(&self) -> &[Speaker] {
        &self.speakers
    }

    pub fn into_speakers(self) -> Vec<Speaker> {
        self.speakers
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn state(&self) -> LoopState {
        self.state
    }
}

/// Runs a complete harvest over HTTP
///
/// # Example
///
/// ```no_run
/// use speaker_harvest::config::load_default_config;
/// use speaker_harvest::crawler::run_harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_default_config()?;
/// let (speakers, stats) = run_harvest(&config).await?;
/// println!("{} speakers in {} fetches", speakers.len(), stats.iterations);
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(config: &Config) -> Result<(Vec<Speaker>, RunStats)> {
    let fetcher = HttpFetcher::new(&config.user_agent, &config.crawler)?;
    let mut harvester = Harvester::new(config, fetcher)?;
    harvester.run(&NoProgress).await?;

    let stats = harvester.stats().clone();
    Ok((harvester.into_speakers(), stats))
}
