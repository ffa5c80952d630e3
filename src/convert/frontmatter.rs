//! Frontmatter block generation and lookup
//!
//! The block uses a fixed key order. String values are double-quoted with inner
//! double quotes backslash-escaped; no other character is escaped.

use crate::crawler::{Article, Category, Section};

const DELIMITER: &str = "---";
const UNKNOWN: &str = "Unknown";

/// Builds the frontmatter block for an article
///
/// # Arguments
///
/// * `article` - The full article record
/// * `category` - Category the article was discovered under, if known
/// * `section` - Section the article was discovered under, if known
///
/// # Returns
///
/// The block including both `---` delimiter lines and a trailing newline
pub fn build_frontmatter(
    article: &Article,
    category: Option<&Category>,
    section: Option<&Section>,
) -> String {
    let category_name = category.map_or(UNKNOWN, |c| c.name.as_str());
    let section_name = section.map_or(UNKNOWN, |s| s.name.as_str());
    let section_id = article.section_id.or(section.map(|s| s.id));
    let category_id = category
        .map(|c| c.id)
        .or(section.map(|s| s.category_id));
    let tags = serde_json::to_string(&article.label_names).unwrap_or_else(|_| "[]".to_string());

    let mut block = String::new();
    block.push_str(DELIMITER);
    block.push('\n');
    block.push_str(&format!("title: {}\n", quote(&article.title)));
    block.push_str(&format!("id: {}\n", article.id));
    block.push_str(&format!("url: {}\n", quote(&article.html_url)));
    block.push_str(&format!("category: {}\n", quote(category_name)));
    block.push_str(&format!("section: {}\n", quote(section_name)));
    block.push_str(&format!("author_id: {}\n", number_or_null(article.author_id)));
    block.push_str(&format!("created_at: {}\n", quote(&article.created_at)));
    block.push_str(&format!("updated_at: {}\n", quote(&article.updated_at)));
    block.push_str(&format!("draft: {}\n", article.draft));
    block.push_str(&format!("promoted: {}\n", article.promoted));
    block.push_str(&format!("position: {}\n", article.position));
    block.push_str(&format!("vote_sum: {}\n", article.vote_sum));
    block.push_str(&format!("vote_count: {}\n", article.vote_count));
    block.push_str(&format!("section_id: {}\n", number_or_null(section_id)));
    block.push_str(&format!("category_id: {}\n", number_or_null(category_id)));
    block.push_str(&format!("tags: {}\n", tags));
    block.push_str(DELIMITER);
    block.push('\n');
    block
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

fn number_or_null(value: Option<u64>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}

/// Reads a single scalar field back out of a document's frontmatter
///
/// Surrounding double quotes are removed and escaped quotes restored.
/// Returns `None` when the document has no frontmatter or the key is absent.
pub fn frontmatter_value(document: &str, key: &str) -> Option<String> {
    let rest = document.strip_prefix(DELIMITER)?.strip_prefix('\n')?;
    let end = rest.find(&format!("\n{}", DELIMITER))?;

    rest[..end].lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.trim() != key {
            return None;
        }
        let value = value.trim();
        let unquoted = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .map(|v| v.replace("\\\"", "\""));
        Some(unquoted.unwrap_or_else(|| value.to_string()))
    })
}
