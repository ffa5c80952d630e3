//! Article document persistence

use crate::convert::ConvertedDocument;
use crate::crawler::Article;
use crate::output::{OutputError, OutputResult, ScrapeResult};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `content` to `output_dir/filename`, creating the directory if needed
///
/// An existing file at the same path is overwritten.
pub fn write_document(output_dir: &Path, filename: &str, content: &str) -> OutputResult<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|source| OutputError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = output_dir.join(filename);
    fs::write(&path, content).map_err(|source| OutputError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Persists a converted article and describes the result
///
/// # Arguments
///
/// * `output_dir` - Directory receiving the document
/// * `article` - The article the document was built from
/// * `document` - The converted document
///
/// # Returns
///
/// * `Some(ScrapeResult)` - The document was written
/// * `None` - Writing failed; the error has been logged
pub fn save_document(
    output_dir: &Path,
    article: &Article,
    document: &ConvertedDocument,
) -> Option<ScrapeResult> {
    let filename = document.filename();
    let content = document.render();

    match write_document(output_dir, &filename, &content) {
        Ok(filepath) => {
            tracing::debug!("Saved {}", filepath.display());
            Some(ScrapeResult {
                filename,
                filepath,
                slug: document.slug.clone(),
                title: article.title.clone(),
                content_length: content.len(),
                article_id: article.id,
                updated_at: article.updated_at.clone(),
                content_hash: hex::encode(Sha256::digest(content.as_bytes())),
            })
        }
        Err(e) => {
            tracing::error!("Error saving article {} ({}): {}", article.id, filename, e);
            None
        }
    }
}
