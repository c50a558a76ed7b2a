//! News article types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    /// Not yet visible; `published_at` is unset.
    #[default]
    Draft,
    /// Visible on the public site.
    Published,
}

/// A news article as returned by `/articles/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Server-assigned identifier (UUID string).
    pub id: String,
    /// Headline.
    pub title: String,
    /// Category label.
    pub category: String,
    /// Short summary shown in listings.
    pub excerpt: String,
    /// Full body.
    pub content: String,
    /// Cover image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Author display name.
    #[serde(default)]
    pub author: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Publication state.
    #[serde(default)]
    pub status: ArticleStatus,
    /// Pinned to the top of listings.
    #[serde(default)]
    pub is_featured: bool,
    /// Server-maintained view counter.
    #[serde(default)]
    pub view_count: u64,
    /// Human-readable read time, e.g. "5 min".
    #[serde(default)]
    pub read_time: Option<String>,
    /// Set by the server when the article is published.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last-update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Write payload for creating or replacing an article.
///
/// `published_at` is server-managed: it is set when the status moves
/// to published and cleared on draft, so drafts never carry one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleDraft {
    /// Headline.
    pub title: String,
    /// Category label.
    pub category: String,
    /// Short summary shown in listings.
    pub excerpt: String,
    /// Full body.
    pub content: String,
    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Author display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Free-form tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Publication state.
    #[serde(default)]
    pub status: ArticleStatus,
    /// Pinned to the top of listings.
    #[serde(default)]
    pub is_featured: bool,
    /// Human-readable read time, e.g. "5 min".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
}
