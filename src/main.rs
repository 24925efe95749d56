//! llms-txt-gen main entry point
//!
//! This is the command-line interface for the llms.txt generator.

use anyhow::{Context, Result};
use clap::Parser;
use llms_txt_gen::config::{load_config_with_hash, validate, Config};
use llms_txt_gen::output::{print_statistics, CrawlStatistics};
use llms_txt_gen::pipeline::EventSink;
use llms_txt_gen::storage::open_cache;
use llms_txt_gen::{canonicalize_seed, classify, OutputFormat, Pipeline, PipelineEvent};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// llms-txt-gen: summarize a website for language models
///
/// Crawls a site within depth and page limits, groups its pages into
/// sections, and prints an `llms.txt` index (or, with `--full`, an
/// `llms-full.txt` content dump). Results are cached per URL.
#[derive(Parser, Debug)]
#[command(name = "llms-txt-gen")]
#[command(version)]
#[command(about = "Generate llms.txt files by crawling a website", long_about = None)]
struct Cli {
    /// Site to summarize (http or https)
    #[arg(value_name = "URL", required_unless_present = "stats")]
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Render the full-content format instead of the link index
    #[arg(long)]
    full: bool,

    /// Write the artifact to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Ignore cached results (the new result is still cached)
    #[arg(long)]
    fresh: bool,

    /// Print progress/complete/error events as JSON lines on stdout
    #[arg(long)]
    json_events: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// List cache entries and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,

    /// Override the maximum crawl depth
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Override the maximum number of pages
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Override the number of concurrent fetches
    #[arg(long, value_name = "N")]
    parallelism: Option<usize>,

    /// Override the per-host request delay in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Skip paths beginning with this prefix (repeatable)
    #[arg(long = "exclude", value_name = "PREFIX")]
    exclude: Vec<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&cli, &config)
    } else if cli.stats {
        handle_stats(&config)
    } else {
        handle_generate(&cli, &config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries the artifact.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("llms_txt_gen=info,warn"),
            1 => EnvFilter::new("llms_txt_gen=debug,info"),
            2 => EnvFilter::new("llms_txt_gen=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any), applies command-line overrides and
/// re-validates the result
fn load_effective_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(parallelism) = cli.parallelism {
        config.crawler.parallelism = parallelism;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.delay_ms = delay_ms;
    }
    config.crawler.exclude_paths.extend(cli.exclude.iter().cloned());
    if cli.full {
        config.output.format = OutputFormat::Full;
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(cli: &Cli, config: &Config) -> Result<()> {
    println!("=== llms-txt-gen Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Parallelism: {}", config.crawler.parallelism);
    println!("  Per-host delay: {}ms", config.crawler.delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);

    println!("\nExcluded Paths ({}):", config.crawler.exclude_paths.len());
    for prefix in &config.crawler.exclude_paths {
        println!("  - {}", prefix);
    }

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nCache:");
    match &config.cache.database_path {
        Some(path) => println!("  Database: {}", path),
        None => println!("  Database: (in memory)"),
    }
    println!("  TTL: {}s", config.cache.ttl_secs);

    println!("\nOutput format: {}", config.output.format);

    println!("\n✓ Configuration is valid");
    if let Some(url) = &cli.url {
        let seed = canonicalize_seed(url).context("Invalid URL")?;
        println!("✓ Would crawl {}", seed);
    }

    Ok(())
}

/// Handles the --stats mode: lists cache entries without expiring them
fn handle_stats(config: &Config) -> Result<()> {
    match &config.cache.database_path {
        Some(path) => println!("Database: {}\n", path),
        None => println!("Database: (in memory)\n"),
    }

    let cache = open_cache(&config.cache).context("Failed to open cache")?;
    let entries = cache.entries().context("Failed to read cache entries")?;

    println!("=== Cache Entries ({}) ===\n", entries.len());
    let now = chrono::Utc::now();
    for entry in &entries {
        let age = (now - entry.created_at).num_seconds().max(0);
        let state = if entry.fresh { "fresh" } else { "stale" };
        println!(
            "  {} ({} pages, {}s old, {})",
            entry.key, entry.page_count, age, state
        );
    }

    Ok(())
}

/// Handles the main generate operation
async fn handle_generate(cli: &Cli, config: &Config) -> Result<()> {
    let url = cli.url.as_deref().context("A URL is required")?;
    let format = config.output.format;

    let pipeline = Pipeline::from_config(config).context("Failed to initialize")?;

    let events: Option<EventSink> = if cli.json_events {
        let sink: EventSink = Arc::new(|event: &PipelineEvent| {
            match serde_json::to_string(event) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::error!("Failed to serialize event: {}", e),
            }
        });
        Some(sink)
    } else {
        None
    };

    let output = match pipeline.run(url, format, cli.fresh, events).await {
        Ok(output) => output,
        Err(e) => {
            tracing::error!("Generation failed: {}", e);
            return Err(e.into());
        }
    };

    if output.cached {
        tracing::info!("Served {} from cache", url);
    } else {
        tracing::info!("Generated {} from {} pages", format.file_name(), output.pages_crawled);
    }

    if cli.verbose > 0 {
        let seed = canonicalize_seed(url)?;
        let (_, sections) = classify(&output.pages, seed.as_str());
        print_statistics(&CrawlStatistics::new(&output.pages, &sections));
    }

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &output.result)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None if cli.json_events => {}
        None => print!("{}", output.result),
    }

    Ok(())
}
