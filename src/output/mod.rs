//! Output module for persisted documents and crawl summaries
//!
//! This module handles:
//! - Writing one Markdown document per article
//! - Generating the `README.md` index of saved documents
//! - Recording crawl statistics and the optional JSON manifest

mod index;
mod manifest;
pub mod stats;
mod writer;

pub use index::{format_index, title_order, write_index, INDEX_FILENAME};
pub use manifest::{write_manifest, Manifest};
pub use stats::{print_statistics, CrawlStats};
pub use writer::{save_document, write_document};

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Record of one successfully written article document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeResult {
    /// File name inside the output directory, e.g. `getting-started.md`
    pub filename: String,

    /// Full path of the written file
    pub filepath: PathBuf,

    pub slug: String,

    pub title: String,

    /// Length of the written document in bytes
    pub content_length: usize,

    pub article_id: u64,

    /// Upstream `updated_at`, for change detection by a downstream cache
    pub updated_at: String,

    /// Hex SHA-256 of the written document
    pub content_hash: String,
}
