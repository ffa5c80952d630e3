//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeout
//! - One GET per help-center endpoint (categories, sections, article listing, article detail)
//! - Absorbing every failure into an empty result so a broken branch never aborts the crawl

use crate::config::{Config, CrawlerConfig, UserAgentConfig};
use crate::crawler::types::{
    Article, ArticleResponse, ArticleSummary, ArticlesResponse, CategoriesResponse, Category,
    Section, SectionsResponse,
};
use crate::ScrapeError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - Crawler settings supplying the request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(crawler.request_timeout())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Client for the help-center REST API
///
/// Every fetch method logs and swallows its own errors: listings fall back to an
/// empty vector and the article detail falls back to `None`.
#[derive(Debug, Clone)]
pub struct HelpCenterClient {
    client: Client,
    api_root: String,
}

impl HelpCenterClient {
    /// Creates a client for `{origin}/api/v2/help_center/{locale}`
    pub fn new(client: Client, origin: &str, locale: &str) -> Self {
        Self {
            client,
            api_root: format!(
                "{}/api/v2/help_center/{}",
                origin.trim_end_matches('/'),
                locale
            ),
        }
    }

    /// Builds the HTTP client and API root from the configuration
    pub fn from_config(config: &Config) -> Result<Self, ScrapeError> {
        let client = build_http_client(&config.user_agent, &config.crawler)?;
        Ok(Self::new(
            client,
            config.source.origin(),
            &config.source.locale,
        ))
    }

    /// Root URL that every endpoint path is appended to
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// `GET /categories.json`
    pub async fn fetch_categories(&self) -> Vec<Category> {
        let url = format!("{}/categories.json", self.api_root);
        match self.get_json::<CategoriesResponse>(&url).await {
            Ok(body) => body.categories,
            Err(e) => {
                tracing::warn!("Error fetching categories: {}", e);
                Vec::new()
            }
        }
    }

    /// `GET /categories/{id}/sections.json`
    pub async fn fetch_sections(&self, category_id: u64) -> Vec<Section> {
        let url = format!("{}/categories/{}/sections.json", self.api_root, category_id);
        match self.get_json::<SectionsResponse>(&url).await {
            Ok(body) => body.sections,
            Err(e) => {
                tracing::warn!("Error fetching sections for category {}: {}", category_id, e);
                Vec::new()
            }
        }
    }

    /// `GET /sections/{id}/articles.json`
    pub async fn fetch_article_summaries(&self, section_id: u64) -> Vec<ArticleSummary> {
        let url = format!("{}/sections/{}/articles.json", self.api_root, section_id);
        match self.get_json::<ArticlesResponse>(&url).await {
            Ok(body) => body.articles,
            Err(e) => {
                tracing::warn!("Error fetching articles for section {}: {}", section_id, e);
                Vec::new()
            }
        }
    }

    /// `GET /articles/{id}.json`
    pub async fn fetch_article(&self, article_id: u64) -> Option<Article> {
        let url = format!("{}/articles/{}.json", self.api_root, article_id);
        match self.get_json::<ArticleResponse>(&url).await {
            Ok(body) => body.article,
            Err(e) => {
                tracing::warn!("Error fetching article {}: {}", article_id, e);
                None
            }
        }
    }

    /// Issues one GET and decodes a JSON body, classifying failures
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ScrapeError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|source| ScrapeError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
