//! Application error types

use thiserror::Error;

use crate::ports::TransportError;

/// Errors surfaced to callers of the API client.
///
/// The executor never swallows a failure: every call either resolves
/// with a decoded value or rejects with one of these. The only
/// internally-handled failure is the single 401-refresh-retry
/// sequence.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The session can no longer be refreshed; a new login is needed.
    #[error("session expired - please log in again")]
    SessionExpired,

    /// The server could not be reached. Stored tokens are not assumed
    /// invalid on a pure network error outside the refresh path.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided `detail` message, or the raw body.
        message: String,
    },

    /// The base URL or endpoint did not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
