//! Unsigned JWT payload inspection.
//!
//! The client decodes token payloads without verifying signatures:
//! verification keys live server-side only and the transport is TLS.
//! Do not replace this with cryptographic verification - the decoded
//! claims are used solely to decide whether a token is worth sending.

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

/// Safety margin subtracted from a token's nominal expiry, so a token
/// is treated as expired slightly before the server would reject it.
/// Prevents a request departing with a token that expires mid-flight.
pub const DEFAULT_EXPIRY_SKEW_SECS: i64 = 60;

/// Decoded JWT payload.
///
/// Recomputed on demand from the access token, never cached.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    /// Expiry claim, seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
    /// Remaining claims, passed through untyped.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Decodes the payload segment of a JWT.
///
/// Fails soft: returns `None` on any malformed input (wrong segment
/// count, invalid base64url, invalid JSON) and never panics.
#[must_use]
pub fn decode_claims(token: &str) -> Option<Claims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| URL_SAFE.decode(payload))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Returns true if the token should be treated as expired at `now`.
///
/// A token with an undecodable payload or no `exp` claim is always
/// expired. Otherwise the token is expired once `exp <= now + skew`.
#[must_use]
pub fn is_expired_at(token: &str, now: DateTime<Utc>, skew_secs: i64) -> bool {
    match decode_claims(token).and_then(|c| c.exp) {
        Some(exp) => exp <= now.timestamp() + skew_secs,
        None => true,
    }
}

/// Returns the token's expiry instant, for diagnostics.
#[must_use]
pub fn expires_at(token: &str) -> Option<DateTime<Utc>> {
    let exp = decode_claims(token)?.exp?;
    Utc.timestamp_opt(exp, 0).single()
}
