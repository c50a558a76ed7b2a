//! Typed endpoint groups over the request executor.
//!
//! Each group borrows the client and maps one backend resource onto
//! plain async methods, mirroring the REST conventions: list/get on
//! collections, PUT replace, DELETE by id, plus the handful of action
//! endpoints the backend exposes.

mod articles;
mod contacts;
mod products;
mod settings;
mod stats;

pub use articles::ArticlesApi;
pub use contacts::ContactsApi;
pub use products::ProductsApi;
pub use settings::{BulkUpdateResult, SettingsApi};

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Listing shape: paginated endpoints wrap rows in `{results: []}`,
/// unpaginated ones return a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListEnvelope<T> {
    Paginated { results: Vec<T> },
    Plain(Vec<T>),
}

impl<T: DeserializeOwned> ListEnvelope<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Self::Paginated { results } => results,
            Self::Plain(rows) => rows,
        }
    }
}
