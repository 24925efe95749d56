//! Integration tests for the crawl → classify → generate pipeline
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! public API end-to-end, including the SQLite result cache.

use llms_txt_gen::config::{CacheConfig, Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use llms_txt_gen::storage::SqliteCache;
use llms_txt_gen::{
    classify, generate, generate_full, Crawler, LlmsError, OutputFormat, Pipeline, ProgressCallback,
    ResultCache,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration backed by the given cache database
fn create_test_config(db_path: Option<String>) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_depth: 3,
            max_pages: 50,
            parallelism: 3,
            delay_ms: 10, // Very short for testing
            exclude_paths: vec!["/private".to_string()],
            request_timeout_secs: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: Some("https://example.com/contact".to_string()),
        },
        cache: CacheConfig {
            database_path: db_path,
            ttl_secs: 3600,
        },
        output: OutputConfig::default(),
    }
}

async fn mount_html(server: &MockServer, route: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html.to_string(), "text/html"))
        .mount(server)
        .await;
}

/// A small documentation site:
///
/// ```text
/// /            -> /about /docs/intro /docs/setup /blog/one /private/x /logo.png (off-host link too)
/// /about       -> /contact
/// /docs/intro  -> /docs/advanced
/// /docs/setup
/// /docs/advanced
/// /blog/one
/// /contact
/// ```
async fn mount_site(server: &MockServer) {
    mount_html(
        server,
        "/",
        r#"<html><head><title>Acme</title><meta name="description" content="Tools for builders"></head>
        <body><h1>Acme Docs</h1>
          <a href="/about">About</a>
          <a href="/docs/intro">Intro</a>
          <a href="/docs/setup#install">Setup</a>
          <a href="/blog/one">Blog</a>
          <a href="/private/x">Private</a>
          <a href="/logo.png">Logo</a>
          <a href="https://elsewhere.example/">Elsewhere</a>
          <a href="mailto:hi@example.com">Mail</a>
        </body></html>"#,
    )
    .await;
    mount_html(
        server,
        "/about",
        r#"<html><head><title>About</title><meta name="description" content="Who we are"></head>
        <body><main>We build tools.</main><a href="/contact">Contact</a></body></html>"#,
    )
    .await;
    mount_html(
        server,
        "/docs/intro",
        r#"<html><head><title>Introduction</title></head>
        <body><main>Start here.</main><a href="/docs/advanced">Advanced</a></body></html>"#,
    )
    .await;
    mount_html(
        server,
        "/docs/setup",
        r#"<html><head><title>Setup</title></head><body><main>Install it.</main></body></html>"#,
    )
    .await;
    mount_html(
        server,
        "/docs/advanced",
        r#"<html><head><title>Advanced</title></head><body><main>Go deeper.</main></body></html>"#,
    )
    .await;
    mount_html(
        server,
        "/blog/one",
        r#"<html><head><title>First Post</title></head><body><main>Hello.</main></body></html>"#,
    )
    .await;
    mount_html(
        server,
        "/contact",
        r#"<html><head><title>Contact</title></head><body><main>Write to us.</main></body></html>"#,
    )
    .await;
    mount_html(
        server,
        "/private/x",
        r#"<html><head><title>Private</title></head><body>secret</body></html>"#,
    )
    .await;
}

#[tokio::test]
async fn test_full_crawl_and_generate() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let config = create_test_config(None);
    let crawler = Crawler::new(&config).expect("Failed to build crawler");
    let seed = format!("{}/", mock_server.uri());

    let pages = crawler.crawl(&seed, None).await.expect("Crawl failed");

    let mut paths: Vec<&str> = pages.iter().map(|p| p.path.as_str()).collect();
    paths.sort_unstable();
    assert_eq!(
        paths,
        vec![
            "/",
            "/about",
            "/blog/one",
            "/contact",
            "/docs/advanced",
            "/docs/intro",
            "/docs/setup"
        ]
    );
    assert!(pages.iter().all(|p| p.depth <= 3));

    let (root, sections) = classify(&pages, &seed);
    assert_eq!(root.h1, "Acme Docs");

    let names: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Main", "Docs", "Optional"]);
    assert_eq!(sections[1].pages.len(), 3);
    assert_eq!(sections[2].pages[0].path, "/blog/one");

    let index = generate(&root, &sections);
    assert!(index.starts_with("# Acme Docs\n\n> Tools for builders\n"));
    let about_url = format!("{}/about", mock_server.uri());
    assert!(index.contains(&format!("- [About]({}): Who we are\n", about_url)));
    assert_eq!(index.lines().filter(|l| l.starts_with("- [")).count(), 6);

    let full = generate_full(&root, &sections);
    assert_eq!(full.matches("\n### ").count(), 6);
    assert!(full.contains(&format!("URL: {}\n\nWe build tools.\n", about_url)));
}

#[tokio::test]
async fn test_crawler_sends_user_agent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact)",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><title>UA</title></html>", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let crawler = Crawler::new(&create_test_config(None)).unwrap();
    let pages = crawler
        .crawl(&format!("{}/", mock_server.uri()), None)
        .await
        .unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].title, "UA");
}

#[tokio::test]
async fn test_page_cap_with_progress() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let mut config = create_test_config(None);
    config.crawler.max_pages = 3;
    let crawler = Crawler::new(&config).unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let progress: ProgressCallback = Arc::new(move |count: usize, url: &str| {
        sink.lock().unwrap().push((count, url.to_string()));
    });
    let pages = crawler
        .crawl(&format!("{}/", mock_server.uri()), Some(progress))
        .await
        .unwrap();

    assert_eq!(pages.len(), 3);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen.last().map(|(c, _)| *c), Some(3));
}

#[tokio::test]
async fn test_pipeline_with_sqlite_cache() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("llms.db");
    let config = create_test_config(Some(db_path.to_string_lossy().into_owned()));
    let seed = format!("{}/", mock_server.uri());

    let first = {
        let pipeline = Pipeline::from_config(&config).expect("Failed to build pipeline");
        pipeline
            .run(&seed, OutputFormat::Index, false, None)
            .await
            .expect("Pipeline failed")
    };
    assert!(!first.cached);
    assert_eq!(first.pages_crawled, 7);

    // A new pipeline over the same database serves the cached artifact
    let pipeline = Pipeline::from_config(&config).unwrap();
    let second = pipeline
        .run(&seed, OutputFormat::Index, false, None)
        .await
        .unwrap();
    assert!(second.cached);
    assert_eq!(second.result, first.result);

    let full = pipeline
        .run(&seed, OutputFormat::Full, false, None)
        .await
        .unwrap();
    assert!(full.cached);
    assert!(full.result.contains("### Introduction\n\nURL: "));
    assert!(full.result.contains("Start here.\n"));
}

#[tokio::test]
async fn test_cache_expiry_forces_recrawl() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let cache = Arc::new(SqliteCache::new_in_memory(Duration::from_millis(100)).unwrap());
    let crawler = Crawler::new(&create_test_config(None)).unwrap();
    let pipeline = Pipeline::new(crawler, cache.clone());
    let seed = format!("{}/", mock_server.uri());

    pipeline
        .run(&seed, OutputFormat::Index, false, None)
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(cache.get(&seed).unwrap().is_none());
    assert!(cache.get(&seed).unwrap().is_none());

    let again = pipeline
        .run(&seed, OutputFormat::Index, false, None)
        .await
        .unwrap();
    assert!(!again.cached);
}

#[tokio::test]
async fn test_non_html_seed_is_empty_result() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(None);
    let pipeline = Pipeline::from_config(&config).unwrap();

    let result = pipeline
        .run(&format!("{}/", mock_server.uri()), OutputFormat::Index, false, None)
        .await;

    match result {
        Err(LlmsError::EmptyResult { url }) => assert!(url.starts_with("http://127.0.0.1")),
        other => panic!("expected EmptyResult, got {:?}", other.map(|o| o.result)),
    }
}
