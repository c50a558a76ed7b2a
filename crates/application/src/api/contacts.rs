//! Contact endpoints.

use greentek_domain::{Contact, ContactMessage, ContactReply};

use super::ListEnvelope;
use crate::client::{ApiCall, ApiClient};
use crate::error::{ApiError, ApiResult};

/// `/contacts/` endpoint group.
#[derive(Debug, Clone, Copy)]
pub struct ContactsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Contact endpoints.
    #[must_use]
    pub const fn contacts(&self) -> ContactsApi<'_> {
        ContactsApi { client: self }
    }
}

impl ContactsApi<'_> {
    /// Lists every contact message.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn list(&self) -> ApiResult<Vec<Contact>> {
        let envelope: ListEnvelope<Contact> =
            self.client.request(ApiCall::get("/contacts/")).await?;
        Ok(envelope.into_vec())
    }

    /// Fetches one contact by id.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn get(&self, id: &str) -> ApiResult<Contact> {
        self.client
            .request(ApiCall::get(format!("/contacts/{id}/")))
            .await
    }

    /// Submits a contact message. This is the one write endpoint open
    /// to site visitors, so no bearer token is sent.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn create(&self, message: &ContactMessage) -> ApiResult<Contact> {
        let body = serde_json::to_value(message).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.client
            .request(ApiCall::post("/contacts/").public().with_json(body))
            .await
    }

    /// Records an admin reply against a contact.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn reply(&self, id: &str, reply: &ContactReply) -> ApiResult<Contact> {
        let body = serde_json::to_value(reply).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.client
            .request(ApiCall::post(format!("/contacts/{id}/reply/")).with_json(body))
            .await
    }

    /// Deletes a contact.
    ///
    /// # Errors
    ///
    /// See [`ApiError`](crate::ApiError).
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client
            .request_empty(ApiCall::delete(format!("/contacts/{id}/")))
            .await
    }
}
