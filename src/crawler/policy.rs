//! Link-following and page-extraction policies
//!
//! The traversal engine is generic over two decisions: which discovered links
//! to fetch ([`FollowPolicy`]) and how a fetched document becomes a [`Page`]
//! ([`PageExtractor`]). Both are injected when the [`Crawler`] is built.
//!
//! [`Crawler`]: crate::crawler::Crawler

use crate::crawler::page::Page;
use crate::crawler::parser::extract_page;
use crate::url::{has_asset_extension, matches_excluded_prefix, same_host};
use scraper::Html;
use url::Url;

/// Information available to a follow decision
#[derive(Debug, Clone, Copy)]
pub struct FollowContext<'a> {
    /// The seed URL of the crawl
    pub seed: &'a Url,

    /// The page the link was found on
    pub source: &'a Url,

    /// Depth the linked page would have if followed
    pub depth: u32,
}

/// Decides whether a discovered link is fetched
pub trait FollowPolicy: Send + Sync {
    fn should_follow(&self, url: &Url, ctx: &FollowContext<'_>) -> bool;
}

impl<F> FollowPolicy for F
where
    F: Fn(&Url, &FollowContext<'_>) -> bool + Send + Sync,
{
    fn should_follow(&self, url: &Url, ctx: &FollowContext<'_>) -> bool {
        self(url, ctx)
    }
}

/// Turns a fetched document into a [`Page`]
pub trait PageExtractor: Send + Sync {
    fn extract(&self, document: &Html, url: &Url, depth: u32) -> Page;
}

/// Default follow policy
///
/// A link is followed when:
/// - its host (and port) equals the seed's host
/// - its scheme is `http` or `https`
/// - its path does not end in a static-asset extension
/// - its path does not begin with an excluded prefix
#[derive(Debug, Clone, Default)]
pub struct SameHostPolicy {
    exclude_paths: Vec<String>,
}

impl SameHostPolicy {
    pub fn new(exclude_paths: Vec<String>) -> Self {
        Self { exclude_paths }
    }
}

impl FollowPolicy for SameHostPolicy {
    fn should_follow(&self, url: &Url, ctx: &FollowContext<'_>) -> bool {
        if url.scheme() != "http" && url.scheme() != "https" {
            return false;
        }
        if !same_host(url, ctx.seed) {
            return false;
        }
        if has_asset_extension(url.path()) {
            return false;
        }
        !matches_excluded_prefix(url.path(), &self.exclude_paths)
    }
}

/// Default extractor backed by [`extract_page`]
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExtractor;

impl PageExtractor for HtmlExtractor {
    fn extract(&self, document: &Html, url: &Url, depth: u32) -> Page {
        extract_page(document, url, depth)
    }
}
