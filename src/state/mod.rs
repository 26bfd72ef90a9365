//! State module for tracking harvest progress
//!
//! # Components
//!
//! - `LoopState`: the pagination loop's two-state machine (accumulating, done)

mod loop_state;

pub use loop_state::LoopState;
