//! Progress reporting hooks for the harvest loop

use crate::model::Speaker;

/// Observer notified as the harvest advances
///
/// All methods default to doing nothing.
pub trait Progress {
    /// The target count has been read from the listing page
    fn started(&self, _target: usize) {}

    /// A new speaker was added; `collected` includes it
    fn speaker_added(&self, _speaker: &Speaker, _collected: usize) {}

    /// The loop reached its target
    fn finished(&self, _collected: usize) {}
}

/// Progress observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {}
