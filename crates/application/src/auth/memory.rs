//! In-memory token storage.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ports::TokenStorage;

/// Token storage held in process memory.
///
/// Used by tests and by embedders that do not want tokens persisted
/// across restarts. Each token lives behind its own lock - the two
/// are independent per the storage contract.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    access: RwLock<Option<String>>,
    refresh: RwLock<Option<String>>,
}

impl MemoryTokenStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a token pair.
    #[must_use]
    pub fn with_tokens(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: RwLock::new(Some(access.into())),
            refresh: RwLock::new(Some(refresh.into())),
        }
    }
}

#[async_trait]
impl TokenStorage for MemoryTokenStorage {
    async fn access_token(&self) -> Option<String> {
        self.access.read().await.clone()
    }

    async fn set_access_token(&self, token: &str) {
        *self.access.write().await = Some(token.to_string());
    }

    async fn clear_access_token(&self) {
        *self.access.write().await = None;
    }

    async fn refresh_token(&self) -> Option<String> {
        self.refresh.read().await.clone()
    }

    async fn set_refresh_token(&self, token: &str) {
        *self.refresh.write().await = Some(token.to_string());
    }

    async fn clear_refresh_token(&self) {
        *self.refresh.write().await = None;
    }
}
