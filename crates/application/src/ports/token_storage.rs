//! Token storage port.

use async_trait::async_trait;

/// Port for durable storage of the access/refresh token pair.
///
/// A pure key-value pass-through: no validation happens at this layer,
/// and the two tokens live under distinct keys with no transactional
/// coupling. Mutations overwrite unconditionally and clears are
/// idempotent. Adapters degrade softly on storage failure - callers
/// treat an unreadable token the same as an absent one.
#[async_trait]
pub trait TokenStorage: Send + Sync {
    /// Returns the stored access token, if any.
    async fn access_token(&self) -> Option<String>;

    /// Overwrites the stored access token.
    async fn set_access_token(&self, token: &str);

    /// Removes the stored access token.
    async fn clear_access_token(&self);

    /// Returns the stored refresh token, if any.
    async fn refresh_token(&self) -> Option<String>;

    /// Overwrites the stored refresh token.
    async fn set_refresh_token(&self, token: &str);

    /// Removes the stored refresh token.
    async fn clear_refresh_token(&self);
}
