//! Site settings endpoints.

use std::collections::BTreeMap;

use serde::Deserialize;

use greentek_domain::{flatten_settings, unflatten_settings, Setting};

use super::ListEnvelope;
use crate::client::{ApiCall, ApiClient};
use crate::error::{ApiError, ApiResult};

/// Response of `POST /settings/bulk_update/`.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkUpdateResult {
    /// Human-readable summary.
    pub message: String,
    /// Keys that were written.
    #[serde(default)]
    pub updated: Vec<String>,
}

/// `/settings/` endpoint group.
#[derive(Debug, Clone, Copy)]
pub struct SettingsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Settings endpoints.
    #[must_use]
    pub const fn settings(&self) -> SettingsApi<'_> {
        SettingsApi { client: self }
    }
}

impl SettingsApi<'_> {
    /// Lists every settings row the session may see.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn list(&self) -> ApiResult<Vec<Setting>> {
        let envelope: ListEnvelope<Setting> =
            self.client.request(ApiCall::get("/settings/")).await?;
        Ok(envelope.into_vec())
    }

    /// Fetches the public settings, grouped by first key segment.
    /// No bearer token is sent.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn public_grouped(
        &self,
    ) -> ApiResult<BTreeMap<String, BTreeMap<String, Option<String>>>> {
        self.client
            .request(ApiCall::get("/settings/public/").public())
            .await
    }

    /// Fetches the public settings and rebuilds the nested document
    /// the admin UI edits (null rows are dropped).
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError); key conflicts in the stored
    /// rows surface as [`ApiError::Decode`].
    pub async fn public_document(&self) -> ApiResult<serde_json::Value> {
        let grouped = self.public_grouped().await?;
        let entries: Vec<(String, String)> = grouped
            .into_values()
            .flat_map(BTreeMap::into_iter)
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect();
        unflatten_settings(entries.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Writes a nested settings document via the bulk endpoint: the
    /// document is flattened to dotted string keys, arrays are
    /// JSON-stringified, and null or empty leaves are skipped.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn bulk_update(&self, document: &serde_json::Value) -> ApiResult<BulkUpdateResult> {
        let flat = flatten_settings(document);
        tracing::debug!(keys = flat.len(), "bulk-updating settings");
        let body = serde_json::json!({ "settings": flat });
        self.client
            .request(ApiCall::post("/settings/bulk_update/").with_json(body))
            .await
    }
}
