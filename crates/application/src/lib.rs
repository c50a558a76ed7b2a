//! Greentek Application - Client core and ports
//!
//! This crate defines the authenticated request executor and its
//! supporting services:
//! - Port traits (HTTP transport, token storage, clock)
//! - Single-flight token refresh coordination
//! - Typed endpoint groups over the executor
//! - Application-level error handling

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod ports;

pub use api::{ArticlesApi, BulkUpdateResult, ContactsApi, ProductsApi, SettingsApi};
pub use auth::{MemoryTokenStorage, RefreshCoordinator, SessionNotifier};
pub use client::{ApiCall, ApiClient};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use ports::{
    Clock, HttpMethod, HttpRequest, HttpTransport, RawResponse, RequestBody, TokenStorage,
    TransportError,
};
