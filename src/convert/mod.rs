//! Article conversion
//!
//! Pure functions turning fetched articles into document text:
//! - HTML body → Markdown via ordered rewrite rules
//! - Title → filename slug
//! - Article metadata → frontmatter block

mod frontmatter;
mod markdown;
mod slug;

pub use frontmatter::{build_frontmatter, frontmatter_value};
pub use markdown::{decode_entities, html_to_markdown, normalize_whitespace, rewrite_href};
pub use slug::slugify;

use crate::crawler::{Article, Category, Section};

/// A converted article ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedDocument {
    pub slug: String,
    pub frontmatter: String,
    pub body: String,
}

impl ConvertedDocument {
    /// Frontmatter, one blank line, then the Markdown body
    pub fn render(&self) -> String {
        format!("{}\n{}\n", self.frontmatter, self.body)
    }

    /// File name inside the output directory
    pub fn filename(&self) -> String {
        format!("{}.md", self.slug)
    }
}

/// Converts a fetched article into a document
///
/// A title that slugifies to nothing falls back to `article-{id}`.
pub fn convert_article(
    article: &Article,
    category: Option<&Category>,
    section: Option<&Section>,
    base_origin: &str,
) -> ConvertedDocument {
    let slug = match slugify(&article.title) {
        s if s.is_empty() => format!("article-{}", article.id),
        s => s,
    };

    ConvertedDocument {
        slug,
        frontmatter: build_frontmatter(article, category, section),
        body: html_to_markdown(article.body_html.as_deref().unwrap_or(""), base_origin),
    }
}
