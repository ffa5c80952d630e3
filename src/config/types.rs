use crate::ConfigResult;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for the scraper
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Returns a copy of this configuration with command-line overrides applied
    ///
    /// The result is validated again, so an override cannot slip past the
    /// checks the file went through.
    pub fn with_overrides(
        mut self,
        max_articles: Option<usize>,
        delay_ms: Option<u64>,
        output_dir: Option<PathBuf>,
    ) -> ConfigResult<Self> {
        if max_articles.is_some() {
            self.crawler.max_articles = max_articles;
        }
        if let Some(delay) = delay_ms {
            self.crawler.article_delay_ms = delay;
        }
        if let Some(dir) = output_dir {
            self.output.directory = dir;
        }
        super::validate(&self)?;
        Ok(self)
    }
}

/// Help-center source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Origin of the help center, e.g. `https://support.example.com`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Content locale used in every API path, e.g. `en-us`
    pub locale: String,
}

impl SourceConfig {
    /// The base URL without any trailing slash
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of articles to save (unlimited when absent)
    #[serde(rename = "max-articles", default)]
    pub max_articles: Option<usize>,

    /// Delay before each article-detail fetch (milliseconds)
    #[serde(rename = "article-delay-ms", default = "default_article_delay_ms")]
    pub article_delay_ms: u64,

    /// Request timeout for the HTTP client (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl CrawlerConfig {
    pub fn article_delay(&self) -> Duration {
        Duration::from_millis(self.article_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_articles: None,
            article_delay_ms: default_article_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_article_delay_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving one Markdown file per article and the index
    pub directory: PathBuf,

    /// Optional path of the JSON manifest of saved documents
    #[serde(rename = "manifest-path", default)]
    pub manifest_path: Option<PathBuf>,
}
