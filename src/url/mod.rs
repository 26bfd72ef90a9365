//! URL handling module for Speaker Harvest
//!
//! Normalizes the configured site URL, builds profile URLs from usernames and
//! resolves hrefs found in the site's markup.

mod normalize;

pub use normalize::{normalize_base_url, profile_url, resolve_href};
