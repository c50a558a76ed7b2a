//! Authentication types and token inspection.

mod claims;
mod token;

pub use claims::{decode_claims, expires_at, is_expired_at, Claims, DEFAULT_EXPIRY_SKEW_SECS};
pub use token::TokenPair;
