//! Help-center entities as returned by the REST API

use serde::Deserialize;

/// A top-level help-center category
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

/// A section belonging to exactly one category
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Section {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub category_id: u64,
}

/// Lightweight article reference from the section listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArticleSummary {
    pub id: u64,
    pub title: String,
}

/// Full article record fetched per id
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Article {
    pub id: u64,
    pub title: String,

    /// Raw HTML body (`body` in the API payload)
    #[serde(rename = "body", default)]
    pub body_html: Option<String>,

    #[serde(default)]
    pub html_url: String,

    #[serde(default)]
    pub author_id: Option<u64>,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub updated_at: String,

    #[serde(default)]
    pub draft: bool,

    #[serde(default)]
    pub promoted: bool,

    #[serde(default)]
    pub position: i64,

    #[serde(default)]
    pub vote_sum: i64,

    #[serde(default)]
    pub vote_count: i64,

    #[serde(default)]
    pub section_id: Option<u64>,

    #[serde(default)]
    pub label_names: Vec<String>,
}

// Response envelopes

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesResponse {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SectionsResponse {
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArticlesResponse {
    #[serde(default)]
    pub articles: Vec<ArticleSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArticleResponse {
    pub article: Option<Article>,
}
