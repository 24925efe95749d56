use crate::crawler::Page;
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};
use url::Url;

/// A link waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedLink {
    /// Absolute URL to fetch
    pub url: Url,

    /// Hop count from the seed
    pub depth: u32,
}

#[derive(Debug, Default)]
struct Inner {
    /// Every URL ever enqueued; a URL is claimed here exactly once
    visited: HashSet<String>,

    /// URLs of pages already in `pages`
    accepted: HashSet<String>,

    /// Discovered but not yet dispatched links, in discovery order
    frontier: VecDeque<QueuedLink>,

    /// Accepted pages, in acceptance order
    pages: Vec<Page>,

    /// Set once `pages` reaches the page cap; never cleared
    done: bool,
}

/// Shared state of one traversal
///
/// All mutation goes through methods that take the single internal lock, so
/// the visited set, the result list and the completion flag are always
/// observed together. Once the page cap is reached the state refuses both new
/// pages and new links.
#[derive(Debug)]
pub struct CrawlState {
    inner: Mutex<Inner>,
    max_pages: usize,
}

impl CrawlState {
    /// Creates an empty state that stops accepting after `max_pages` pages
    pub fn new(max_pages: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                done: max_pages == 0,
                ..Inner::default()
            }),
            max_pages,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claims `url` and appends it to the frontier
    ///
    /// Returns false if the traversal is complete or the URL was seen before.
    pub fn try_enqueue_link(&self, url: Url, depth: u32) -> bool {
        let mut inner = self.lock();
        if inner.done {
            return false;
        }
        if !inner.visited.insert(url.as_str().to_string()) {
            return false;
        }
        inner.frontier.push_back(QueuedLink { url, depth });
        true
    }

    /// Takes the oldest frontier entry, or None if the frontier is empty or
    /// the traversal is complete
    pub fn next_link(&self) -> Option<QueuedLink> {
        let mut inner = self.lock();
        if inner.done {
            return None;
        }
        inner.frontier.pop_front()
    }

    /// Appends `page` to the result list
    ///
    /// The completion check, the append, the transition to complete and the
    /// `on_accept` notification happen under one lock acquisition, so
    /// notifications arrive in acceptance order and never after completion.
    /// `on_accept` receives the number of pages collected so far and the
    /// page URL.
    ///
    /// Returns false if the traversal is complete or the URL was already
    /// accepted.
    pub fn try_accept_page<F>(&self, page: Page, on_accept: F) -> bool
    where
        F: FnOnce(usize, &str),
    {
        let mut inner = self.lock();
        if inner.done {
            return false;
        }
        if !inner.accepted.insert(page.url.clone()) {
            return false;
        }

        inner.pages.push(page);
        let count = inner.pages.len();
        if count >= self.max_pages {
            inner.done = true;
        }

        if let Some(page) = inner.pages.last() {
            on_accept(count, &page.url);
        }
        true
    }

    /// Returns true once the page cap has been reached
    pub fn is_done(&self) -> bool {
        self.lock().done
    }

    /// Number of accepted pages
    pub fn page_count(&self) -> usize {
        self.lock().pages.len()
    }

    /// Number of links waiting in the frontier
    pub fn frontier_len(&self) -> usize {
        self.lock().frontier.len()
    }

    /// Moves the accepted pages out, leaving the list empty
    pub fn take_pages(&self) -> Vec<Page> {
        std::mem::take(&mut self.lock().pages)
    }
}
