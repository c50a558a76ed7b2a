//! Greentek Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined
//! in the application layer: a reqwest-backed HTTP transport, the
//! system clock, and file-based token persistence.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::{ReqwestTransport, SystemClock};
pub use persistence::FileTokenStorage;
pub use serialization::{from_json_bytes, to_json_stable, to_json_stable_bytes, SerializationError};
