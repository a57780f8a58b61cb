//! Driven port for the durable single-collection movie cache.
//!
//! The store holds exactly the latest successful snapshot. Reads return the
//! whole collection or an error, never a partial list; writes replace the
//! whole collection in one step.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::define_port_error;
use crate::domain::Movie;

/// Persisted row shape, keyed by `id`.
///
/// Field names serialise in camelCase to match the snapshot document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalMovieRecord {
    /// Row key.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Synopsis text.
    pub description: String,
    /// Poster path relative to the image host.
    pub poster_path: String,
}

define_port_error! {
    /// Errors surfaced by local store adapters.
    pub enum LocalStoreError {
        /// Nothing has been written to the store yet.
        Uninitialized => "local store holds no snapshot",
        /// Storage could not be reached or written.
        Unavailable { message: String } =>
            "local store unavailable: {message}",
        /// The persisted snapshot could not be decoded.
        Corrupt { message: String } =>
            "local store snapshot corrupt: {message}",
        /// A collection repeated a row key.
        DuplicateId { id: i64 } =>
            "local store rejects duplicate movie id {id}",
    }
}

/// Port for reading and replacing the cached movie collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocalMovieStore: Send + Sync {
    /// Read the cached collection in the order it was written.
    ///
    /// An uninitialised store reports [`LocalStoreError::Uninitialized`]
    /// rather than an empty success.
    async fn read_all(&self) -> Result<Vec<Movie>, LocalStoreError>;

    /// Replace the cached collection atomically.
    ///
    /// Concurrent readers observe either the previous or the new snapshot.
    async fn replace_all(&self, movies: &[Movie]) -> Result<(), LocalStoreError>;
}

/// Reject collections that repeat a row key.
///
/// # Errors
///
/// Returns [`LocalStoreError::DuplicateId`] naming the first repeated id.
pub(crate) fn ensure_unique_ids(ids: impl IntoIterator<Item = i64>) -> Result<(), LocalStoreError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(LocalStoreError::duplicate_id(id));
        }
    }
    Ok(())
}
