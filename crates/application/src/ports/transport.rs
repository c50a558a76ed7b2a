//! HTTP transport port.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// HTTP methods used by the backend's REST conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Read a resource or listing.
    Get,
    /// Create a resource or invoke an action endpoint.
    Post,
    /// Replace a resource.
    Put,
    /// Remove a resource.
    Delete,
}

impl HttpMethod {
    /// Method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Request body accepted by the transport.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// JSON document; the adapter sets `Content-Type` accordingly.
    Json(serde_json::Value),
    /// One file part plus plain-text fields, sent as multipart form
    /// data.
    Multipart {
        /// Form field name for the file part.
        field: String,
        /// File name reported for the part.
        file_name: String,
        /// File contents.
        bytes: Vec<u8>,
        /// Additional plain-text form fields.
        extra: Vec<(String, String)>,
    },
}

/// A fully-resolved request handed to the transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute target URL, query included.
    pub url: Url,
    /// Extra headers (the executor contributes `Authorization`).
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: RequestBody,
    /// Timeout for this request in milliseconds.
    pub timeout_ms: u64,
}

/// Raw response as seen by the executor.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header value, if present.
    pub content_type: Option<String>,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true if the body is declared as JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }

    /// Body as lossy UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Errors a transport can produce before an HTTP status exists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request exceeded its timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// A connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other transport-level failure.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// Abstracts the HTTP library so the executor and the refresh
/// coordinator can be exercised against scripted responses in tests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends one request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no HTTP response was
    /// obtained; non-2xx statuses are NOT errors at this layer.
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError>;
}
