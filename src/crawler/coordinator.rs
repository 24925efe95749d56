//! Crawler coordinator - concurrent site traversal
//!
//! This module contains the traversal loop that coordinates:
//! - Dispatching frontier links to a bounded pool of fetch tasks
//! - Per-host request spacing
//! - Page extraction and acceptance into the shared result list
//! - Link discovery under the injected follow policy

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult};
use crate::crawler::page::Page;
use crate::crawler::parser::extract_links;
use crate::crawler::policy::{
    FollowContext, FollowPolicy, HtmlExtractor, PageExtractor, SameHostPolicy,
};
use crate::state::{CrawlState, HostThrottle, QueuedLink};
use crate::url::{canonicalize_seed, host_key};
use crate::LlmsError;
use reqwest::Client;
use scraper::Html;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use url::Url;

/// Called after every accepted page with `(pages_found, current_url)`
///
/// Invocations happen in acceptance order and never after the page cap has
/// been reached.
pub type ProgressCallback = Arc<dyn Fn(usize, &str) + Send + Sync>;

/// Site crawler
///
/// Holds the traversal limits, the HTTP client and the injected follow and
/// extraction policies. One `Crawler` can run any number of crawls; each call
/// to [`Crawler::crawl`] gets fresh traversal state.
pub struct Crawler {
    config: CrawlerConfig,
    client: Client,
    policy: Arc<dyn FollowPolicy>,
    extractor: Arc<dyn PageExtractor>,
}

impl Crawler {
    /// Creates a crawler with the default same-host policy and HTML extractor
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(LlmsError)` - The HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, LlmsError> {
        let client = build_http_client(&config.crawler, &config.user_agent)?;
        Ok(Self::with_client(config.crawler.clone(), client))
    }

    /// Creates a crawler around an existing HTTP client
    pub fn with_client(config: CrawlerConfig, client: Client) -> Self {
        let policy = SameHostPolicy::new(config.exclude_paths.clone());
        Self {
            config,
            client,
            policy: Arc::new(policy),
            extractor: Arc::new(HtmlExtractor),
        }
    }

    /// Replaces the link-following policy
    pub fn with_policy<P: FollowPolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Replaces the page extractor
    pub fn with_extractor<E: PageExtractor + 'static>(mut self, extractor: E) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// Returns the traversal limits
    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Crawls a site starting at `seed_url`
    ///
    /// # Traversal
    ///
    /// 1. Validate and canonicalize the seed; fail fast on a bad URL
    /// 2. Keep up to `parallelism` fetch tasks running from the shared frontier
    /// 3. Each task waits for its host's delay slot, fetches, extracts the page
    ///    and offers it to the result list
    /// 4. Accepted pages below `max_depth` enqueue the links the policy allows
    /// 5. Stop dispatching once `max_pages` pages are accepted; tasks already
    ///    running finish but contribute nothing further
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Page>)` - Accepted pages in acceptance order; empty if even the
    ///   seed could not be fetched
    /// * `Err(LlmsError::InvalidSeedUrl)` - The seed URL is malformed or not http(s)
    /// * `Err(LlmsError::Join)` - A crawl task panicked
    pub async fn crawl(
        &self,
        seed_url: &str,
        progress: Option<ProgressCallback>,
    ) -> Result<Vec<Page>, LlmsError> {
        let seed = canonicalize_seed(seed_url)?;
        let start_time = Instant::now();

        tracing::info!(
            "Starting crawl of {} (max depth {}, max pages {}, parallelism {})",
            seed,
            self.config.max_depth,
            self.config.max_pages,
            self.config.parallelism
        );

        let state = Arc::new(CrawlState::new(self.config.max_pages));
        state.try_enqueue_link(seed.clone(), 0);

        let task = Arc::new(CrawlTask {
            seed,
            client: self.client.clone(),
            policy: self.policy.clone(),
            extractor: self.extractor.clone(),
            state: state.clone(),
            throttle: HostThrottle::new(Duration::from_millis(self.config.delay_ms)),
            progress,
            max_depth: self.config.max_depth,
        });

        let parallelism = self.config.parallelism.max(1);
        let mut workers = JoinSet::new();

        loop {
            while workers.len() < parallelism {
                let Some(link) = state.next_link() else {
                    break;
                };
                let task = task.clone();
                workers.spawn(async move { task.process(link).await });
            }

            match workers.join_next().await {
                Some(Ok(())) => {}
                Some(Err(e)) => {
                    tracing::error!("Crawl task failed: {}", e);
                    return Err(LlmsError::Join(e.to_string()));
                }
                None => break,
            }
        }

        let pages = state.take_pages();
        tracing::info!(
            "Crawl completed: {} pages collected in {:?}",
            pages.len(),
            start_time.elapsed()
        );

        Ok(pages)
    }
}

/// Everything a fetch task needs, shared by all tasks of one crawl
struct CrawlTask {
    seed: Url,
    client: Client,
    policy: Arc<dyn FollowPolicy>,
    extractor: Arc<dyn PageExtractor>,
    state: Arc<CrawlState>,
    throttle: HostThrottle,
    progress: Option<ProgressCallback>,
    max_depth: u32,
}

impl CrawlTask {
    /// Fetches one link, offers its page, and enqueues its children
    ///
    /// Fetch failures end this branch of the traversal only.
    async fn process(&self, link: QueuedLink) {
        if self.state.is_done() {
            return;
        }

        self.throttle.wait_turn(&host_key(&link.url)).await;

        if self.state.is_done() {
            tracing::debug!("Page limit reached, skipping {}", link.url);
            return;
        }

        tracing::debug!("Fetching {} (depth {})", link.url, link.depth);

        let (final_url, body) = match fetch_url(&self.client, link.url.as_str()).await {
            FetchResult::Success {
                final_url, body, ..
            } => (final_url, body),
            FetchResult::ContentMismatch { content_type } => {
                tracing::debug!("Skipping {}: not HTML ({})", link.url, content_type);
                return;
            }
            FetchResult::HttpError { status_code } => {
                self.log_failure(&link, &format!("HTTP {}", status_code));
                return;
            }
            FetchResult::NetworkError { error } => {
                self.log_failure(&link, &error);
                return;
            }
        };

        let base = Url::parse(&final_url).unwrap_or_else(|_| link.url.clone());
        let (page, links) = self.extract(&body, &link, &base);

        let accepted = self.state.try_accept_page(page, |count, url| {
            tracing::debug!("Accepted page {}: {}", count, url);
            if let Some(progress) = &self.progress {
                progress(count, url);
            }
        });
        if !accepted || link.depth >= self.max_depth {
            return;
        }

        let ctx = FollowContext {
            seed: &self.seed,
            source: &base,
            depth: link.depth + 1,
        };

        let mut enqueued = 0;
        for child in links {
            if self.policy.should_follow(&child, &ctx)
                && self.state.try_enqueue_link(child, ctx.depth)
            {
                enqueued += 1;
            }
        }

        if enqueued > 0 {
            tracing::debug!(
                "Enqueued {} links from {} ({} in frontier)",
                enqueued,
                link.url,
                self.state.frontier_len()
            );
        }
    }

    /// Parses the document and runs the extractor
    ///
    /// Kept synchronous: the parsed document is not `Send` and must not live
    /// across an await point.
    fn extract(&self, body: &str, link: &QueuedLink, base: &Url) -> (Page, Vec<Url>) {
        let document = Html::parse_document(body);
        let page = self.extractor.extract(&document, &link.url, link.depth);
        let links = extract_links(&document, base);
        (page, links)
    }

    fn log_failure(&self, link: &QueuedLink, reason: &str) {
        if link.depth == 0 {
            tracing::warn!("Seed {} could not be fetched: {}", link.url, reason);
        } else {
            tracing::warn!("Failed to fetch {}: {}", link.url, reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_config() -> Config {
        let mut config = Config::default();
        config.crawler.delay_ms = 0;
        config.crawler.request_timeout_secs = 5;
        config
    }

    async fn mount_page(server: &MockServer, route: &str, html: String) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
            .mount(server)
            .await;
    }

    fn page_html(title: &str, links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|href| format!(r#"<a href="{}">link</a>"#, href))
            .collect();
        format!(
            "<html><head><title>{}</title></head><body><main>{} content</main>{}</body></html>",
            title, title, anchors
        )
    }

    #[tokio::test]
    async fn test_invalid_seed_fails_fast() {
        let crawler = Crawler::new(&create_test_config()).unwrap();

        let result = crawler.crawl("ftp://example.com/", None).await;
        assert!(matches!(result, Err(LlmsError::InvalidSeedUrl(_))));

        let result = crawler.crawl("not a url", None).await;
        assert!(matches!(result, Err(LlmsError::InvalidSeedUrl(_))));
    }

    #[tokio::test]
    async fn test_unreachable_seed_yields_no_pages() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let crawler = Crawler::new(&create_test_config()).unwrap();
        let pages = crawler
            .crawl(&format!("http://{}/", addr), None)
            .await
            .unwrap();
        assert!(pages.is_empty());
    }

    #[tokio::test]
    async fn test_crawl_follows_same_host_links() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            "/",
            page_html("Home", &["/about", "/blog/post", "https://other.example/x", "/logo.png"]),
        )
        .await;
        mount_page(&server, "/about", page_html("About", &["/"])).await;
        mount_page(&server, "/blog/post", page_html("Post", &["/about"])).await;

        let crawler = Crawler::new(&create_test_config()).unwrap();
        let pages = crawler
            .crawl(&format!("{}/", server.uri()), None)
            .await
            .unwrap();

        let mut paths: Vec<&str> = pages.iter().map(|p| p.path.as_str()).collect();
        paths.sort_unstable();
        assert_eq!(paths, vec!["/", "/about", "/blog/post"]);

        let seed = pages.iter().find(|p| p.path == "/").unwrap();
        assert_eq!(seed.depth, 0);
        assert_eq!(seed.title, "Home");
        assert!(pages.iter().filter(|p| p.path != "/").all(|p| p.depth == 1));
    }

    #[tokio::test]
    async fn test_max_depth_limits_traversal() {
        let server = MockServer::start().await;
        mount_page(&server, "/", page_html("Root", &["/one"])).await;
        mount_page(&server, "/one", page_html("One", &["/two"])).await;
        mount_page(&server, "/two", page_html("Two", &["/three"])).await;
        mount_page(&server, "/three", page_html("Three", &[])).await;

        let mut config = create_test_config();
        config.crawler.max_depth = 1;
        let crawler = Crawler::new(&config).unwrap();

        let pages = crawler
            .crawl(&format!("{}/", server.uri()), None)
            .await
            .unwrap();

        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.depth <= 1));
    }

    #[tokio::test]
    async fn test_max_pages_caps_results_and_progress() {
        let server = MockServer::start().await;
        let children: Vec<String> = (0..10).map(|i| format!("/p{}", i)).collect();
        let child_refs: Vec<&str> = children.iter().map(String::as_str).collect();
        mount_page(&server, "/", page_html("Root", &child_refs)).await;
        for child in &children {
            mount_page(&server, child, page_html(child, &[])).await;
        }

        let mut config = create_test_config();
        config.crawler.max_pages = 4;
        config.crawler.parallelism = 3;
        let crawler = Crawler::new(&config).unwrap();

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let progress: ProgressCallback = Arc::new(move |count: usize, url: &str| {
            sink.lock().unwrap().push((count, url.to_string()));
        });

        let pages = crawler
            .crawl(&format!("{}/", server.uri()), Some(progress))
            .await
            .unwrap();

        assert_eq!(pages.len(), 4);

        let events = events.lock().unwrap();
        let counts: Vec<usize> = events.iter().map(|(c, _)| *c).collect();
        assert_eq!(counts, vec![1, 2, 3, 4]);
        let urls: Vec<&str> = events.iter().map(|(_, u)| u.as_str()).collect();
        let page_urls: Vec<&str> = pages.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, page_urls);
    }

    #[tokio::test]
    async fn test_no_url_collected_twice() {
        let server = MockServer::start().await;
        mount_page(&server, "/", page_html("Root", &["/a", "/b", "/a#top"])).await;
        mount_page(&server, "/a", page_html("A", &["/", "/b"])).await;
        mount_page(&server, "/b", page_html("B", &["/a", "/"])).await;

        let mut config = create_test_config();
        config.crawler.parallelism = 4;
        let crawler = Crawler::new(&config).unwrap();

        let pages = crawler
            .crawl(&format!("{}/", server.uri()), None)
            .await
            .unwrap();

        let mut urls: Vec<&str> = pages.iter().map(|p| p.url.as_str()).collect();
        let total = urls.len();
        urls.sort_unstable();
        urls.dedup();
        assert_eq!(urls.len(), total);
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn test_excluded_paths_and_failures_are_skipped() {
        let server = MockServer::start().await;
        mount_page(&server, "/", page_html("Root", &["/admin/panel", "/missing", "/ok"])).await;
        mount_page(&server, "/admin/panel", page_html("Admin", &[])).await;
        mount_page(&server, "/ok", page_html("Ok", &[])).await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut config = create_test_config();
        config.crawler.exclude_paths = vec!["/admin".to_string()];
        let crawler = Crawler::new(&config).unwrap();

        let pages = crawler
            .crawl(&format!("{}/", server.uri()), None)
            .await
            .unwrap();

        let mut paths: Vec<&str> = pages.iter().map(|p| p.path.as_str()).collect();
        paths.sort_unstable();
        assert_eq!(paths, vec!["/", "/ok"]);
    }

    #[tokio::test]
    async fn test_custom_policy_is_used() {
        let server = MockServer::start().await;
        mount_page(&server, "/", page_html("Root", &["/keep", "/drop"])).await;
        mount_page(&server, "/keep", page_html("Keep", &[])).await;
        mount_page(&server, "/drop", page_html("Drop", &[])).await;

        fn only_keep(url: &Url, _: &FollowContext<'_>) -> bool {
            url.path() == "/keep"
        }

        let crawler = Crawler::new(&create_test_config())
            .unwrap()
            .with_policy(only_keep);
        let pages = crawler
            .crawl(&format!("{}/", server.uri()), None)
            .await
            .unwrap();

        let paths: Vec<&str> = pages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/keep"]);
    }
}
