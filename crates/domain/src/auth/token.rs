//! Token pair returned by the login endpoint.

use serde::{Deserialize, Serialize};

/// Access/refresh token pair issued by `POST /token/`.
///
/// The access token is a short-lived bearer credential attached to
/// individual API calls; the refresh token is long-lived and used
/// solely to mint new access tokens. Both are opaque strings to the
/// client - tokens are replaced, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer credential.
    pub access: String,
    /// Long-lived credential for the refresh endpoint.
    pub refresh: String,
}

impl TokenPair {
    /// Creates a token pair.
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }
}
