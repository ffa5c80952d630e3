//! Help-center scraper entry point
//!
//! This is the command-line interface for the help-center scraper.

use anyhow::Context;
use clap::Parser;
use helpcenter_scraper::config::{load_config_with_hash, Config};
use helpcenter_scraper::crawler::crawl;
use helpcenter_scraper::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Help-center scraper: mirrors help-center articles as Markdown
///
/// Walks categories, sections and articles of a help-center API, converts each
/// article to Markdown with a metadata header, and writes a README index.
#[derive(Parser, Debug)]
#[command(name = "helpcenter-scraper")]
#[command(version)]
#[command(about = "Mirror help-center articles as Markdown", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Override the maximum number of articles to save
    #[arg(long, value_name = "N")]
    max_articles: Option<usize>,

    /// Override the delay before each article fetch, in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Override the output directory
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let config = config
        .with_overrides(cli.max_articles, cli.delay_ms, cli.output_dir)
        .context("Invalid command-line override")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("helpcenter_scraper=info,warn"),
            1 => EnvFilter::new("helpcenter_scraper=debug,info"),
            2 => EnvFilter::new("helpcenter_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the crawl plan
fn handle_dry_run(config: &Config) {
    println!("=== Help-Center Scraper Dry Run ===\n");

    println!("Source:");
    println!("  Origin: {}", config.source.origin());
    println!("  Locale: {}", config.source.locale);
    println!(
        "  Categories endpoint: {}/api/v2/help_center/{}/categories.json",
        config.source.origin(),
        config.source.locale
    );

    println!("\nCrawler:");
    match config.crawler.max_articles {
        Some(cap) => println!("  Max articles: {}", cap),
        None => println!("  Max articles: unlimited"),
    }
    println!("  Article delay: {}ms", config.crawler.article_delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory.display());
    if let Some(manifest) = &config.output.manifest_path {
        println!("  Manifest: {}", manifest.display());
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl of {} ({})",
        config.source.origin(),
        config.source.locale
    );

    let report = crawl(config).await.context("Crawl failed")?;

    tracing::info!(
        "Crawl completed: {} articles saved to {}",
        report.results.len(),
        config.output.directory.display()
    );
    print_statistics(&report.stats);

    Ok(())
}
