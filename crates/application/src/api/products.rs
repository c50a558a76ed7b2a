//! Product endpoints.

use greentek_domain::{Product, ProductDraft};

use super::ListEnvelope;
use crate::client::{ApiCall, ApiClient};
use crate::error::{ApiError, ApiResult};

/// `/products/` endpoint group.
#[derive(Debug, Clone, Copy)]
pub struct ProductsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Product endpoints.
    #[must_use]
    pub const fn products(&self) -> ProductsApi<'_> {
        ProductsApi { client: self }
    }
}

impl ProductsApi<'_> {
    /// Lists every product.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn list(&self) -> ApiResult<Vec<Product>> {
        let envelope: ListEnvelope<Product> =
            self.client.request(ApiCall::get("/products/")).await?;
        Ok(envelope.into_vec())
    }

    /// Lists active products, as shown on the public site.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn list_active(&self) -> ApiResult<Vec<Product>> {
        let envelope: ListEnvelope<Product> = self
            .client
            .request(ApiCall::get("/products/").query("status", "active"))
            .await?;
        Ok(envelope.into_vec())
    }

    /// Fetches one product by id.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn get(&self, id: &str) -> ApiResult<Product> {
        self.client
            .request(ApiCall::get(format!("/products/{id}/")))
            .await
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn create(&self, draft: &ProductDraft) -> ApiResult<Product> {
        let body = serde_json::to_value(draft).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.client
            .request(ApiCall::post("/products/").with_json(body))
            .await
    }

    /// Replaces a product.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn update(&self, id: &str, draft: &ProductDraft) -> ApiResult<Product> {
        let body = serde_json::to_value(draft).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.client
            .request(ApiCall::put(format!("/products/{id}/")).with_json(body))
            .await
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client
            .request_empty(ApiCall::delete(format!("/products/{id}/")))
            .await
    }
}
