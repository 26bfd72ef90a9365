use crate::UrlError;
use url::Url;

/// Href prefixes that never point at a fetchable page
const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Normalizes the configured site URL so usernames can be appended to it
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Require an HTTP or HTTPS scheme and a host
/// 3. Remove the fragment
/// 4. Ensure the path ends with `/`
///
/// # Examples
///
/// ```
/// use speaker_harvest::url::normalize_base_url;
///
/// let url = normalize_base_url("https://conf.example.com/speakers").unwrap();
/// assert_eq!(url.as_str(), "https://conf.example.com/speakers/");
/// ```
pub fn normalize_base_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(url_str.to_string()));
    }

    url.set_fragment(None);

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Builds a speaker's profile URL by appending the username to the base URL
///
/// The username is pushed as a single path segment, so characters such as
/// `:` or `?` cannot turn it into a different URL.
///
/// # Examples
///
/// ```
/// use speaker_harvest::url::{normalize_base_url, profile_url};
///
/// let base = normalize_base_url("https://conf.example.com/speakers/").unwrap();
/// let url = profile_url(&base, "ada").unwrap();
/// assert_eq!(url.as_str(), "https://conf.example.com/speakers/ada");
/// ```
pub fn profile_url(base: &Url, username: &str) -> Result<Url, UrlError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);

    url.path_segments_mut()
        .map_err(|_| UrlError::CannotBeABase(base.to_string()))?
        .pop_if_empty()
        .push(username.trim().trim_matches('/'));

    Ok(url)
}

/// Resolves an href found in site markup to an absolute URL
///
/// Returns None if the href should not be followed:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel: and data: links
/// - hrefs that do not resolve to HTTP(S)
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
        return None;
    }

    match base.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}
