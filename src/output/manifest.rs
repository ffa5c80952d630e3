//! JSON manifest of saved documents
//!
//! Handed to downstream tooling (for example an uploader keeping its own cache
//! of which documents changed). The manifest itself holds no skip state.

use crate::output::{CrawlStats, OutputError, OutputResult, ScrapeResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct Manifest<'a> {
    pub source: &'a str,
    pub generated_at: DateTime<Utc>,
    pub stats: &'a CrawlStats,
    pub articles: &'a [ScrapeResult],
}

/// Writes the manifest as pretty-printed JSON, creating parent directories
pub fn write_manifest(path: &Path, manifest: &Manifest<'_>) -> OutputResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(path, json).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}
