//! Field extraction for the speaker site
//!
//! All knowledge of the site's markup lives here:
//! - the selector table (`selectors`)
//! - text helpers for flattening and decoding content (`text`)
//! - typed views for listing, profile and talk pages (`pages`)

mod pages;
pub mod selectors;
mod text;

pub use pages::{ListingEntry, ListingPage, ProfilePage, TalkPage};
pub use selectors::SiteSelectors;
pub use text::{block_text, collapse_newlines, decode_entities, node_text};
