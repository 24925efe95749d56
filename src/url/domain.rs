use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use llms_txt_gen::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the `host:port` key used for per-host request spacing
pub fn host_key(url: &Url) -> String {
    match (extract_host(url), url.port_or_known_default()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host,
        (None, _) => String::new(),
    }
}

/// Checks whether two URLs address the same host
///
/// Hosts are compared case-insensitively and ports must match, so
/// `example.com` and `www.example.com` are different hosts.
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (extract_host(a), extract_host(b)) {
        (Some(ha), Some(hb)) => ha == hb && a.port_or_known_default() == b.port_or_known_default(),
        _ => false,
    }
}
