//! Crawler module for fetching and resolving speakers
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching behind the `DocumentSource` seam
//! - Talk resolution from profile and talk pages
//! - Speaker normalization
//! - The listing page pagination and dedup loop

mod coordinator;
mod fetcher;
mod progress;
mod speaker;
mod talks;

#[cfg(test)]
pub(crate) mod test_support;

pub use coordinator::{run_harvest, Harvester};
pub use fetcher::{build_http_client, format_user_agent, DocumentSource, HttpFetcher, ParsedDocument};
pub use progress::{NoProgress, Progress};
pub use speaker::{build_speaker, handle_url, ResolvedSpeaker, SpeakerResolver};
pub use talks::{ResolvedTalks, TalkResolver};
