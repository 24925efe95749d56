/// File extensions that are never crawled (images, stylesheets, scripts,
/// fonts, archives, media and feeds)
pub const STATIC_ASSET_EXTENSIONS: &[&str] = &[
    ".pdf", ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".ico", ".bmp", ".css", ".js",
    ".mjs", ".map", ".xml", ".json", ".woff", ".woff2", ".ttf", ".otf", ".eot", ".zip", ".gz",
    ".tar", ".tgz", ".rar", ".7z", ".mp4", ".webm", ".mov", ".avi", ".mp3", ".wav", ".ogg",
];

/// Checks whether a URL path ends in a static-asset extension
///
/// The comparison is case-insensitive.
///
/// # Examples
///
/// ```
/// use llms_txt_gen::url::has_asset_extension;
///
/// assert!(has_asset_extension("/images/logo.PNG"));
/// assert!(!has_asset_extension("/blog/post"));
/// ```
pub fn has_asset_extension(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    STATIC_ASSET_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(ext))
}

/// Checks whether a URL path begins with any of the excluded prefixes
///
/// Matching is a plain string prefix test, so `/admin` also excludes
/// `/administrator`.
pub fn matches_excluded_prefix(path: &str, prefixes: &[String]) -> bool {
    prefixes
        .iter()
        .any(|prefix| path.starts_with(prefix.as_str()))
}
