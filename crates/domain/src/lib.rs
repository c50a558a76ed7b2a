//! Greentek Domain - Core types for the Greentek API client
//!
//! This crate defines the domain model for the Greentek client SDK.
//! All types here are pure Rust with no I/O dependencies.

pub mod article;
pub mod auth;
pub mod contact;
pub mod error;
pub mod product;
pub mod settings;
pub mod stats;

pub use article::{Article, ArticleDraft, ArticleStatus};
pub use auth::{
    decode_claims, expires_at, is_expired_at, Claims, TokenPair, DEFAULT_EXPIRY_SKEW_SECS,
};
pub use contact::{Contact, ContactMessage, ContactReply, ContactStatus};
pub use error::{DomainError, DomainResult};
pub use product::{Product, ProductDraft, ProductStatus};
pub use settings::{flatten_settings, unflatten_settings, Setting};
pub use stats::{ActivityLog, DashboardStats};
