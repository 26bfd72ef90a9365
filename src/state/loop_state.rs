/// Harvest loop state definitions
///
/// The pagination loop starts out accumulating speakers and moves to done
/// once the accumulator reaches the target count.
use crate::ScrapeError;
use std::fmt;

/// Represents the current state of the pagination loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoopState {
    /// Listing pages are still being fetched and folded into the accumulator
    #[default]
    Accumulating,

    /// The accumulator has reached the target count
    Done,
}

impl LoopState {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if the loop may move from this state to `to`
    pub fn can_transition_to(&self, to: LoopState) -> bool {
        matches!(
            (self, to),
            (Self::Accumulating, Self::Accumulating) | (Self::Accumulating, Self::Done)
        )
    }

    /// Moves to `to`, rejecting transitions out of a terminal state
    pub fn transition(self, to: LoopState) -> Result<LoopState, ScrapeError> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(ScrapeError::InvalidTransition { from: self, to })
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accumulating => "accumulating",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
