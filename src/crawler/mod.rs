//! Crawler module for site traversal and page extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and response classification
//! - HTML parsing into pages and outgoing links
//! - Pluggable link-following and extraction policies
//! - Concurrent traversal coordination

mod coordinator;
mod fetcher;
mod page;
mod parser;
mod policy;

pub use coordinator::{Crawler, ProgressCallback};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use page::Page;
pub use parser::{extract_links, extract_page, parse_html, ParsedPage};
pub use policy::{FollowContext, FollowPolicy, HtmlExtractor, PageExtractor, SameHostPolicy};
