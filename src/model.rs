//! Speaker and talk records
//!
//! `RawSpeaker` is the payload embedded in the listing markup; `Speaker` and
//! `Talk` are the normalized records handed to the output sink.

use crate::ScrapeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable speaker identity as published by the site
///
/// The site emits numeric ids, but string ids are accepted too. Either form
/// is written back out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpeakerId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{}", id),
            Self::Text(id) => write!(f, "{}", id),
        }
    }
}

/// Speaker payload as embedded in a listing node's data attribute
#[derive(Debug, Clone, Deserialize)]
pub struct RawSpeaker {
    pub id: SpeakerId,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl RawSpeaker {
    /// Decodes a payload, rejecting it when the identity fields are unusable
    pub fn from_json(payload: &str) -> Result<Self, ScrapeError> {
        let raw: RawSpeaker = serde_json::from_str(payload)
            .map_err(|e| ScrapeError::MalformedPayload(e.to_string()))?;

        if raw.username.trim().is_empty() {
            return Err(ScrapeError::MalformedPayload(format!(
                "speaker {} has an empty username",
                raw.id
            )));
        }

        Ok(raw)
    }
}

/// A fully resolved speaker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Speaker {
    pub id: SpeakerId,
    pub name: String,
    pub location: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
    pub youtube: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub bio: String,
    pub talks: Vec<Talk>,
}

/// A talk given by a speaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Talk {
    pub title: String,
    pub duration: Option<String>,
    pub talk_url: String,
    pub slider_url: Option<String>,
    pub about_this_talk: Option<String>,
    pub description: Option<String>,
}
