//! Output module for persisting harvest results
//!
//! This module handles:
//! - Writing the speaker collection as a JSON array
//! - Recording and printing run statistics

mod json;
pub mod stats;
mod traits;

pub use json::{to_pretty_json, JsonFileSink};
pub use stats::{print_run_stats, RunStats};
pub use traits::{OutputError, OutputResult, OutputSink};
