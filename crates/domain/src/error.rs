//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A settings key maps to both a leaf value and a nested group.
    #[error("conflicting setting key: {0}")]
    ConflictingSettingKey(String),

    /// A settings key is empty or contains an empty segment.
    #[error("invalid setting key: {0}")]
    InvalidSettingKey(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
