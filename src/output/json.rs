//! JSON file output
//!
//! Writes the speakers as one pretty-printed JSON array. `serde_json` never
//! escapes `/` or non-ASCII characters, so URLs and names stay readable.

use crate::model::Speaker;
use crate::output::traits::{OutputError, OutputResult, OutputSink};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::{Path, PathBuf};

/// Indentation used for the output file
const INDENT: &[u8] = b"    ";

/// Writes speakers to a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for JsonFileSink {
    fn write(&self, speakers: &[Speaker]) -> OutputResult<()> {
        let json = to_pretty_json(speakers)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(&self.path, json)?;
        tracing::info!("Wrote {} speakers to {}", speakers.len(), self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serializes speakers as a pretty-printed JSON array
pub fn to_pretty_json(speakers: &[Speaker]) -> OutputResult<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    speakers.serialize(&mut serializer)?;

    String::from_utf8(buf).map_err(|e| OutputError::Write(e.to_string()))
}
