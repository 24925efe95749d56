use crate::UrlError;
use url::Url;

/// Validates a seed URL and returns it in canonical form
///
/// # Validation Steps
///
/// 1. Trim surrounding whitespace and parse; reject if malformed
/// 2. Require the `http` or `https` scheme
/// 3. Require a non-empty host
///
/// The canonical form is the `url` crate's serialization (lowercased scheme
/// and host, default port dropped, empty path becomes `/`). The same string is
/// used as the crawl seed and as the result cache key.
///
/// # Examples
///
/// ```
/// use llms_txt_gen::url::canonicalize_seed;
///
/// let url = canonicalize_seed("HTTPS://Example.COM").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
/// ```
pub fn canonicalize_seed(url_str: &str) -> Result<Url, UrlError> {
    let trimmed = url_str.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Parse("URL is empty".to_string()));
    }

    let url = Url::parse(trimmed).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingHost(trimmed.to_string())),
    }
}

/// Resolves a discovered href against the page it was found on
///
/// Returns None if the link should be ignored:
/// - empty or fragment-only hrefs (same-page anchors)
/// - `javascript:`, `mailto:`, `tel:` and `data:` targets
/// - hrefs that do not resolve to an `http`/`https` URL
///
/// The fragment of the resolved URL is dropped so that `#anchor` variants of
/// one page are deduplicated.
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    let mut absolute = base_url.join(href).ok()?;
    if absolute.scheme() != "http" && absolute.scheme() != "https" {
        return None;
    }
    absolute.set_fragment(None);
    Some(absolute)
}
