//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the client core and external
//! systems. Each port is a trait implemented by an adapter in the
//! infrastructure layer (or by a mock in tests).

mod clock;
mod token_storage;
mod transport;

pub use clock::Clock;
pub use token_storage::TokenStorage;
pub use transport::{
    HttpMethod, HttpRequest, HttpTransport, RawResponse, RequestBody, TransportError,
};
