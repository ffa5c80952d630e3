//! Hierarchy walker - main crawl orchestration logic
//!
//! Visits categories, then their sections, then each section's article
//! summaries, strictly in listing order and one request at a time. Before every
//! article-detail fetch the rate limiter waits, and before every fetch at any
//! level the article cap is checked; once the cap is reached the whole walk
//! ends, not just the current section.

use crate::config::Config;
use crate::convert::convert_article;
use crate::crawler::{Category, HelpCenterClient, RateLimiter, Section};
use crate::output::{save_document, CrawlStats, ScrapeResult};
use crate::ScrapeError;
use std::path::PathBuf;
use std::time::Instant;

/// Outcome of a completed walk
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Saved documents in the order they were written
    pub results: Vec<ScrapeResult>,
    pub stats: CrawlStats,
}

/// Walks the help-center hierarchy and writes one document per article
#[derive(Debug, Clone)]
pub struct Walker {
    client: HelpCenterClient,
    limiter: RateLimiter,
    origin: String,
    output_dir: PathBuf,
    max_articles: Option<usize>,
}

impl Walker {
    /// Creates a walker with an HTTP client built from the configuration
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let client = HelpCenterClient::from_config(config)?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a walker around an existing API client
    pub fn with_client(client: HelpCenterClient, config: &Config) -> Self {
        let limiter = RateLimiter::new(config.crawler.article_delay());
        tracing::debug!(
            "Walking {} with {:?} between article fetches",
            client.api_root(),
            limiter.delay()
        );

        Self {
            client,
            limiter,
            origin: config.source.origin().to_string(),
            output_dir: config.output.directory.clone(),
            max_articles: config.crawler.max_articles,
        }
    }

    fn cap_reached(&self, saved: usize) -> bool {
        self.max_articles.is_some_and(|cap| saved >= cap)
    }

    /// Runs the walk to completion
    ///
    /// Fetch and write failures are absorbed and counted; only failing to
    /// create the output directory aborts the run.
    pub async fn run(&self) -> Result<CrawlReport, ScrapeError> {
        std::fs::create_dir_all(&self.output_dir)?;

        let start = Instant::now();
        let mut report = CrawlReport::default();

        if self.cap_reached(0) {
            tracing::info!("Article cap is 0, nothing to fetch");
            report.stats.cap_reached = true;
            report.stats.set_elapsed(start.elapsed());
            return Ok(report);
        }

        let categories = self.client.fetch_categories().await;
        report.stats.categories = categories.len() as u64;
        tracing::info!("Found {} categories", categories.len());

        'walk: for category in &categories {
            if self.cap_reached(report.results.len()) {
                report.stats.cap_reached = true;
                break 'walk;
            }

            let sections = self.client.fetch_sections(category.id).await;
            report.stats.sections += sections.len() as u64;
            tracing::info!(
                "Category '{}' ({}): {} sections",
                category.name,
                category.id,
                sections.len()
            );

            for section in &sections {
                if self.cap_reached(report.results.len()) {
                    report.stats.cap_reached = true;
                    break 'walk;
                }

                let summaries = self.client.fetch_article_summaries(section.id).await;
                report.stats.summaries += summaries.len() as u64;
                tracing::debug!(
                    "Section '{}' ({}): {} articles",
                    section.name,
                    section.id,
                    summaries.len()
                );

                for summary in &summaries {
                    if self.cap_reached(report.results.len()) {
                        report.stats.cap_reached = true;
                        break 'walk;
                    }

                    self.limiter.wait().await;
                    self.process_article(summary.id, category, section, &mut report)
                        .await;
                }
            }
        }

        if report.stats.cap_reached {
            tracing::info!(
                "Reached article cap of {}",
                self.max_articles.unwrap_or_default()
            );
        }

        report.stats.saved = report.results.len() as u64;
        report.stats.set_elapsed(start.elapsed());
        Ok(report)
    }

    /// Fetches, converts and writes one article, recording the outcome
    async fn process_article(
        &self,
        article_id: u64,
        category: &Category,
        section: &Section,
        report: &mut CrawlReport,
    ) {
        report.stats.articles_requested += 1;

        let Some(article) = self.client.fetch_article(article_id).await else {
            report.stats.articles_missing += 1;
            return;
        };

        if let Some(listed_in) = article.section_id.filter(|id| *id != section.id) {
            tracing::warn!(
                "Article {} reports section {} but was listed under section {}",
                article.id,
                listed_in,
                section.id
            );
        }

        let document = convert_article(&article, Some(category), Some(section), &self.origin);

        match save_document(&self.output_dir, &article, &document) {
            Some(result) => {
                tracing::info!(
                    "Saved {} ({} bytes) [{}]",
                    result.filename,
                    result.content_length,
                    report.results.len() + 1
                );
                report.results.push(result);
            }
            None => report.stats.write_failures += 1,
        }
    }
}
