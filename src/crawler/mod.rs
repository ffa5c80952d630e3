//! Crawler module for help-center harvesting
//!
//! This module contains the core crawling logic, including:
//! - Entity fetchers for the four help-center endpoints
//! - A fixed-delay rate limiter for article-detail fetches
//! - The hierarchy walker that ties fetching, conversion and writing together

mod fetcher;
mod limiter;
mod types;
mod walker;

pub use fetcher::{build_http_client, HelpCenterClient};
pub use limiter::RateLimiter;
pub use types::{Article, ArticleSummary, Category, Section};
pub use walker::{CrawlReport, Walker};

use crate::config::Config;
use crate::output::{write_index, write_manifest, Manifest};
use crate::ScrapeError;
use chrono::Utc;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Walk categories, sections and articles, writing one document per article
/// 3. Write the `README.md` index
/// 4. Write the JSON manifest when one is configured
///
/// # Arguments
///
/// * `config` - The scraper configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed, possibly with some articles skipped
/// * `Err(ScrapeError)` - The output could not be created
pub async fn crawl(config: &Config) -> Result<CrawlReport, ScrapeError> {
    let walker = Walker::new(config)?;
    let report = walker.run().await?;
    let origin = config.source.origin();

    let index_path = write_index(&report.results, origin, &config.output.directory)?;
    tracing::info!(
        "Wrote index of {} articles to {}",
        report.results.len(),
        index_path.display()
    );

    if let Some(manifest_path) = &config.output.manifest_path {
        write_manifest(
            manifest_path,
            &Manifest {
                source: origin,
                generated_at: Utc::now(),
                stats: &report.stats,
                articles: &report.results,
            },
        )?;
        tracing::info!("Wrote manifest to {}", manifest_path.display());
    }

    Ok(report)
}
