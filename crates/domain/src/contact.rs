//! Customer contact types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Handling state of a contact message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    /// Not yet handled.
    #[default]
    New,
    /// An admin reply has been recorded.
    Replied,
    /// Conversation closed.
    Closed,
}

/// A contact message as returned by `/contacts/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    /// Server-assigned identifier (UUID string).
    pub id: String,
    /// Sender name.
    pub name: String,
    /// Sender email address.
    pub email: String,
    /// Sender phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Message subject.
    #[serde(default)]
    pub subject: Option<String>,
    /// Message body.
    pub message: String,
    /// Handling state.
    #[serde(default)]
    pub status: ContactStatus,
    /// Recorded admin reply, if any.
    #[serde(default)]
    pub admin_reply: Option<String>,
    /// When the reply was recorded.
    #[serde(default)]
    pub replied_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Write payload for `POST /contacts/`.
///
/// Submitted by site visitors, so the endpoint accepts it without a
/// bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    /// Sender name.
    pub name: String,
    /// Sender email address.
    pub email: String,
    /// Sender phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Message subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Message body.
    pub message: String,
}

/// Write payload for `POST /contacts/{id}/reply/`.
#[derive(Debug, Clone, Serialize)]
pub struct ContactReply {
    /// Reply text recorded against the contact.
    pub admin_reply: String,
}
