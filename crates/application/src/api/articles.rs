//! Article endpoints.

use greentek_domain::{Article, ArticleDraft};

use super::ListEnvelope;
use crate::client::{ApiCall, ApiClient};
use crate::error::{ApiError, ApiResult};

/// `/articles/` endpoint group.
#[derive(Debug, Clone, Copy)]
pub struct ArticlesApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Article endpoints.
    #[must_use]
    pub const fn articles(&self) -> ArticlesApi<'_> {
        ArticlesApi { client: self }
    }
}

impl ArticlesApi<'_> {
    /// Lists every article.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn list(&self) -> ApiResult<Vec<Article>> {
        let envelope: ListEnvelope<Article> =
            self.client.request(ApiCall::get("/articles/")).await?;
        Ok(envelope.into_vec())
    }

    /// Fetches one article by id.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn get(&self, id: &str) -> ApiResult<Article> {
        self.client
            .request(ApiCall::get(format!("/articles/{id}/")))
            .await
    }

    /// Creates an article.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn create(&self, draft: &ArticleDraft) -> ApiResult<Article> {
        let body = serde_json::to_value(draft).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.client
            .request(ApiCall::post("/articles/").with_json(body))
            .await
    }

    /// Replaces an article.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn update(&self, id: &str, draft: &ArticleDraft) -> ApiResult<Article> {
        let body = serde_json::to_value(draft).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.client
            .request(ApiCall::put(format!("/articles/{id}/")).with_json(body))
            .await
    }

    /// Deletes an article.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client
            .request_empty(ApiCall::delete(format!("/articles/{id}/")))
            .await
    }
}
