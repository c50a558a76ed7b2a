//! File-based token storage.
//!
//! Tokens are stored in `tokens.json` under the user's configuration
//! directory (or any caller-chosen path). The file holds the access
//! and refresh tokens as two independent optional fields; each
//! operation rewrites only its own field.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use greentek_application::TokenStorage;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// On-disk shape of the token file.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct StoredTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh: Option<String>,
}

/// Token storage persisted to a JSON file.
///
/// Storage failures degrade softly per the port contract: an
/// unreadable or malformed file reads as "no tokens stored", and
/// write failures are logged rather than surfaced, matching the
/// fire-and-forget semantics the client core expects from its token
/// store.
#[derive(Debug)]
pub struct FileTokenStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStorage {
    /// Creates a storage backed by the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Default location: `<config dir>/greentek/tokens.json`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("greentek").join("tokens.json"))
    }

    /// The file this storage reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> StoredTokens {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => from_json_bytes(&bytes).unwrap_or_else(|err| {
                tracing::warn!(path = %self.path.display(), "malformed token file: {err}");
                StoredTokens::default()
            }),
            Err(_) => StoredTokens::default(),
        }
    }

    async fn write(&self, tokens: &StoredTokens) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = tokio::fs::create_dir_all(parent).await {
                tracing::warn!(path = %parent.display(), "cannot create token dir: {err}");
                return;
            }
        }
        let bytes = match to_json_stable_bytes(tokens) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!("cannot serialize tokens: {err}");
                return;
            }
        };
        if let Err(err) = tokio::fs::write(&self.path, bytes).await {
            tracing::warn!(path = %self.path.display(), "cannot write token file: {err}");
        }
    }

    async fn mutate(&self, apply: impl FnOnce(&mut StoredTokens)) {
        let _guard = self.lock.lock().await;
        let mut tokens = self.read().await;
        apply(&mut tokens);
        self.write(&tokens).await;
    }
}

#[async_trait]
impl TokenStorage for FileTokenStorage {
    async fn access_token(&self) -> Option<String> {
        let _guard = self.lock.lock().await;
        self.read().await.access
    }

    async fn set_access_token(&self, token: &str) {
        self.mutate(|tokens| tokens.access = Some(token.to_string()))
            .await;
    }

    async fn clear_access_token(&self) {
        self.mutate(|tokens| tokens.access = None).await;
    }

    async fn refresh_token(&self) -> Option<String> {
        let _guard = self.lock.lock().await;
        self.read().await.refresh
    }

    async fn set_refresh_token(&self, token: &str) {
        self.mutate(|tokens| tokens.refresh = Some(token.to_string()))
            .await;
    }

    async fn clear_refresh_token(&self) {
        self.mutate(|tokens| tokens.refresh = None).await;
    }
}
