//! Product catalog types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication state of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Visible on the public site.
    #[default]
    Active,
    /// Hidden from the public site.
    Inactive,
}

/// A biological product as returned by `/products/`.
///
/// The backend's list endpoint returns a compact representation, so
/// everything past the identity fields is defaulted when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned identifier (UUID string).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category label.
    pub category: String,
    /// Long-form description.
    pub description: String,
    /// Feature bullet points.
    #[serde(default)]
    pub features: Vec<String>,
    /// Usage instructions.
    #[serde(default)]
    pub usage: Option<String>,
    /// Ingredient description.
    #[serde(default)]
    pub ingredients: Option<String>,
    /// Benefit bullet points.
    #[serde(default)]
    pub benefits: Vec<String>,
    /// Packaging options.
    #[serde(default)]
    pub packaging: Vec<String>,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Labels matching `images` by position.
    #[serde(default)]
    pub image_labels: Vec<String>,
    /// Publication state.
    #[serde(default)]
    pub status: ProductStatus,
    /// Featured on the landing page.
    #[serde(default)]
    pub is_popular: bool,
    /// Manual ordering weight.
    #[serde(default)]
    pub sort_order: i32,
    /// Server-maintained view counter.
    #[serde(default)]
    pub view_count: u64,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last-update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Write payload for creating or replacing a product.
///
/// Omits the server-owned fields (`id`, `view_count`, timestamps).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Display name.
    pub name: String,
    /// Category label.
    pub category: String,
    /// Long-form description.
    pub description: String,
    /// Feature bullet points.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    /// Usage instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    /// Ingredient description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    /// Benefit bullet points.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub benefits: Vec<String>,
    /// Packaging options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packaging: Vec<String>,
    /// Image URLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Labels matching `images` by position.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_labels: Vec<String>,
    /// Publication state.
    #[serde(default)]
    pub status: ProductStatus,
    /// Featured on the landing page.
    #[serde(default)]
    pub is_popular: bool,
    /// Manual ordering weight.
    #[serde(default)]
    pub sort_order: i32,
}
