//! Dashboard statistics and activity log types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters returned by `GET /stats/` for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Active products.
    #[serde(default)]
    pub total_products: u64,
    /// Published articles.
    #[serde(default)]
    pub total_articles: u64,
    /// Contacts not yet handled.
    #[serde(default)]
    pub new_contacts: u64,
    /// Contacts received today.
    #[serde(default)]
    pub today_contacts: u64,
    /// Accumulated product page views.
    #[serde(default)]
    pub total_product_views: u64,
    /// Accumulated article page views.
    #[serde(default)]
    pub total_article_views: u64,
}

/// One admin action as returned by `GET /activity-logs/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    /// Log entry id.
    pub id: i64,
    /// Acting user, if still present.
    #[serde(default)]
    pub user: Option<String>,
    /// Action verb, e.g. "create" or "delete".
    pub action: String,
    /// Affected entity kind, e.g. "product".
    #[serde(default)]
    pub entity_type: Option<String>,
    /// Affected entity id.
    #[serde(default)]
    pub entity_id: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// When the action happened.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
