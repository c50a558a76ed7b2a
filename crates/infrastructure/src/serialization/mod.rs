//! Serialization helpers.

mod json;

pub use json::{from_json_bytes, to_json_stable, to_json_stable_bytes, SerializationError};
