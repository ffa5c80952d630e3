//! Index document generation
//!
//! The index lists every saved article by title, linking to its file, and ends
//! with a footer naming the source, the generation time and the article count.

use crate::output::{OutputError, OutputResult, ScrapeResult};
use chrono::{DateTime, Utc};
use feruca::Collator;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the index inside the output directory
pub const INDEX_FILENAME: &str = "README.md";

/// Orders two titles with the Unicode root collation
///
/// Accented letters sort with their base letter and lowercase precedes
/// uppercase on otherwise equal titles. Titles that collate equal fall back to
/// byte order, so the order is total.
pub fn title_order(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}

/// Formats the index document
///
/// # Arguments
///
/// * `results` - Saved documents, in any order
/// * `source` - Help-center origin named in the footer
/// * `generated_at` - Timestamp named in the footer
pub fn format_index(results: &[ScrapeResult], source: &str, generated_at: DateTime<Utc>) -> String {
    let mut sorted: Vec<&ScrapeResult> = results.iter().collect();
    let mut collator = Collator::default();
    sorted.sort_by(|a, b| collator.collate(a.title.as_str(), b.title.as_str()));

    let mut md = String::new();
    md.push_str("# Help Center Articles\n\n");

    for result in &sorted {
        md.push_str(&format!("- [{}]({})\n", result.title, result.filename));
    }

    md.push_str("\n---\n\n");
    md.push_str(&format!("Source: {}\n", source));
    md.push_str(&format!("Generated: {}\n", generated_at.to_rfc3339()));
    md.push_str(&format!("Total articles: {}\n", results.len()));
    md
}

/// Writes `README.md` into the output directory, replacing any previous index
pub fn write_index(results: &[ScrapeResult], source: &str, output_dir: &Path) -> OutputResult<PathBuf> {
    let markdown = format_index(results, source, Utc::now());
    let path = output_dir.join(INDEX_FILENAME);

    fs::write(&path, markdown).map_err(|source| OutputError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}
