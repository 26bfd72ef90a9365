//! Run statistics
//!
//! Counters collected by the harvest loop and a printer for the end-of-run
//! summary.

use chrono::{DateTime, Utc};

/// Harvest statistics summary
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Total number of speakers the site reports
    pub target: usize,

    /// Listing page fetches processed
    pub iterations: u32,

    /// Listing nodes examined across all iterations
    pub listing_nodes: u64,

    /// Listing nodes whose payload failed to decode
    pub malformed_payloads: u64,

    /// Listing nodes skipped because the speaker was already collected
    pub duplicates_skipped: u64,

    /// Speakers added to the accumulator
    pub speakers_resolved: u64,

    /// Speaker resolutions that failed (retried on later iterations)
    pub speakers_failed: u64,

    /// Talks attached to collected speakers
    pub talks_resolved: u64,

    /// Talk links dropped because their page could not be read
    pub talks_dropped: u64,

    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunStats {
    pub fn mark_started(&mut self) {
        self.started_at = Some(Utc::now());
    }

    pub fn mark_finished(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration of the run, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        match (self.started_at, self.finished_at) {
            (Some(started), Some(finished)) => Some((finished - started).num_seconds()),
            _ => None,
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_run_stats(stats: &RunStats) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    println!(
        "  Speakers collected: {} / {}",
        stats.speakers_resolved, stats.target
    );
    println!("  Talks collected: {}", stats.talks_resolved);
    println!("  Listing fetches: {}", stats.iterations);
    if let Some(seconds) = stats.duration_seconds() {
        println!("  Duration: {}s", seconds);
    }
    println!();

    println!("Listing Nodes:");
    println!("  Examined: {}", stats.listing_nodes);
    println!("  Duplicates skipped: {}", stats.duplicates_skipped);
    println!("  Malformed payloads: {}", stats.malformed_payloads);
    println!();

    if stats.speakers_failed > 0 || stats.talks_dropped > 0 {
        println!("Failures:");
        println!("  Speaker resolutions failed: {}", stats.speakers_failed);
        println!("  Talks dropped: {}", stats.talks_dropped);
        println!();
    }
}
