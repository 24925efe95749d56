//! HTML parser for extracting links and page metadata
//!
//! This module handles parsing HTML content to extract:
//! - Links to follow (from `<a>` tags)
//! - Page title, first heading and description
//! - Visible text of the main content region

use crate::crawler::page::Page;
use crate::url::resolve_link;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Elements whose text content is never visible
const INVISIBLE_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Page metadata and body text
    pub page: Page,

    /// All followable-candidate links found on the page (absolute URLs)
    pub links: Vec<Url>,
}

/// Parses HTML content and extracts page metadata and links
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `url` - The URL the page was requested at; links resolve against it
/// * `depth` - Hop count of this page from the seed
///
/// # Example
///
/// ```
/// use llms_txt_gen::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &url, 0);
/// assert_eq!(parsed.page.title, "Test");
/// assert_eq!(parsed.links[0].as_str(), "https://example.com/page");
/// ```
pub fn parse_html(html: &str, url: &Url, depth: u32) -> ParsedPage {
    let document = Html::parse_document(html);
    ParsedPage {
        page: extract_page(&document, url, depth),
        links: extract_links(&document, url),
    }
}

/// Builds a [`Page`] from a parsed document
pub fn extract_page(document: &Html, url: &Url, depth: u32) -> Page {
    let mut page = Page::new(url, depth);

    page.title = first_text(document, "title").unwrap_or_default();
    page.h1 = first_text(document, "h1").unwrap_or_default();
    page.description = meta_content(document, r#"meta[name="description"]"#)
        .or_else(|| meta_content(document, r#"meta[property="og:description"]"#))
        .unwrap_or_default();

    let body = region_text(document, "main")
        .or_else(|| region_text(document, "body"))
        .unwrap_or_default();
    page.set_body_text(body);

    page
}

/// Extracts all candidate links from `<a href>` elements
///
/// Anchors carrying the `download` attribute are skipped, as are hrefs that
/// [`resolve_link`] rejects. Duplicates within one page are kept in first-seen
/// order only once.
pub fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let mut links: Vec<Url> = Vec::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        if element.value().attr("download").is_some() {
            continue;
        }

        if let Some(absolute) = element
            .value()
            .attr("href")
            .and_then(|href| resolve_link(href, base_url))
        {
            if !links.contains(&absolute) {
                links.push(absolute);
            }
        }
    }

    links
}

/// Returns the whitespace-collapsed text of the first element matching `selector`
fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(visible_text)
        .filter(|s| !s.is_empty())
}

/// Returns the trimmed `content` attribute of the first matching meta tag
fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .filter_map(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .find(|content| !content.is_empty())
}

/// Returns the visible text of every element matching `selector`, joined
fn region_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let text = document
        .select(&selector)
        .map(visible_text)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Collects the text beneath an element, skipping script-like children and
/// collapsing runs of whitespace into single spaces
fn visible_text(element: ElementRef<'_>) -> String {
    let mut words: Vec<&str> = Vec::new();

    for node in element.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| INVISIBLE_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        words.extend(text.split_whitespace());
    }

    words.join(" ")
}
