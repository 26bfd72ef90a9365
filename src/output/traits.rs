//! Output handler traits and errors

use crate::model::Speaker;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output destinations of a finished harvest
pub trait OutputSink {
    /// Persists the final, ordered speaker collection
    fn write(&self, speakers: &[Speaker]) -> OutputResult<()>;

    /// Human-readable description of where the output goes
    fn describe(&self) -> String;
}
