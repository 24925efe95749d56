//! Page classification into named sections
//!
//! Pages are bucketed by the first segment of their path. Single-segment
//! paths land in `Main`, which always comes first. The remaining buckets are
//! ordered largest first, and buckets holding a single page are folded into a
//! trailing `Optional` section.

use crate::crawler::Page;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the section holding single-segment paths
pub const MAIN_SECTION: &str = "Main";

/// Name of the section collecting pages from demoted one-page buckets
pub const OPTIONAL_SECTION: &str = "Optional";

/// A named, ordered group of pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub pages: Vec<Page>,

    /// True for the catch-all section built from demoted buckets
    pub optional: bool,
}

impl Section {
    fn new(name: impl Into<String>, optional: bool) -> Self {
        Self {
            name: name.into(),
            pages: Vec::new(),
            optional,
        }
    }
}

/// Splits crawled pages into the root page and ordered sections
///
/// The root is the first page whose URL equals `root_url` or whose path is
/// `/` or empty. Later pages matching the same rule (for example the root
/// with a query string) are treated as ordinary pages and go to `Main`. If
/// no page qualifies, a placeholder root carrying only `root_url` is
/// returned.
///
/// Buckets of equal size keep the lexical order of their names.
///
/// # Example
///
/// ```
/// use llms_txt_gen::{classify, Page};
///
/// let page = |path: &str| {
///     let url = url::Url::parse(&format!("https://example.com{}", path)).unwrap();
///     Page::new(&url, 1)
/// };
/// let pages = vec![page("/"), page("/about"), page("/docs/a"), page("/docs/b")];
///
/// let (root, sections) = classify(&pages, "https://example.com/");
/// assert_eq!(root.path, "/");
/// assert_eq!(sections[0].name, "Main");
/// assert_eq!(sections[1].name, "Docs");
/// ```
pub fn classify(pages: &[Page], root_url: &str) -> (Page, Vec<Section>) {
    let mut root: Option<Page> = None;
    let mut main = Section::new(MAIN_SECTION, false);
    let mut groups: BTreeMap<String, Vec<Page>> = BTreeMap::new();

    for page in pages {
        if root.is_none() && is_root(page, root_url) {
            root = Some(page.clone());
            continue;
        }

        let trimmed = page.path.trim_matches('/');
        match trimmed.split_once('/') {
            Some((first, _)) => groups
                .entry(title_case(first))
                .or_default()
                .push(page.clone()),
            None => main.pages.push(page.clone()),
        }
    }

    let mut ranked: Vec<(String, Vec<Page>)> = groups.into_iter().collect();
    // Stable sort keeps the BTreeMap's lexical order among equal sizes
    ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    let mut sections = Vec::with_capacity(ranked.len() + 2);
    if !main.pages.is_empty() {
        sections.push(main);
    }

    let mut optional = Section::new(OPTIONAL_SECTION, true);
    for (name, group) in ranked {
        if group.len() == 1 {
            optional.pages.extend(group);
        } else {
            sections.push(Section {
                name,
                pages: group,
                optional: false,
            });
        }
    }
    if !optional.pages.is_empty() {
        sections.push(optional);
    }

    let root = root.unwrap_or_else(|| placeholder_root(root_url));
    (root, sections)
}

fn is_root(page: &Page, root_url: &str) -> bool {
    page.url == root_url || page.path == "/" || page.path.is_empty()
}

fn placeholder_root(root_url: &str) -> Page {
    match url::Url::parse(root_url) {
        Ok(url) => Page::new(&url, 0),
        Err(_) => Page {
            url: root_url.to_string(),
            ..Page::default()
        },
    }
}

/// Turns a path segment into a heading: `getting-started` becomes
/// `Getting Started`
pub fn title_case(segment: &str) -> String {
    segment
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
