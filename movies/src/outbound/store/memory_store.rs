//! Process-local movie store.
//!
//! Keeps the snapshot behind an async `RwLock` and swaps it with a single
//! assignment, so readers never see a half-written collection. Useful for
//! tests and for runs that do not need persistence.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::Movie;
use crate::domain::mapper::{domain_to_local, local_to_domain};
use crate::domain::ports::{LocalMovieRecord, LocalMovieStore, LocalStoreError, ensure_unique_ids};

/// In-memory implementation of [`LocalMovieStore`].
#[derive(Debug, Default)]
pub struct InMemoryMovieStore {
    snapshot: RwLock<Option<Arc<[LocalMovieRecord]>>>,
}

impl InMemoryMovieStore {
    /// Create an uninitialised store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocalMovieStore for InMemoryMovieStore {
    async fn read_all(&self) -> Result<Vec<Movie>, LocalStoreError> {
        let snapshot = self
            .snapshot
            .read()
            .await
            .clone()
            .ok_or_else(LocalStoreError::uninitialized)?;
        Ok(snapshot.iter().cloned().map(local_to_domain).collect())
    }

    async fn replace_all(&self, movies: &[Movie]) -> Result<(), LocalStoreError> {
        ensure_unique_ids(movies.iter().map(Movie::id))?;
        let records: Arc<[LocalMovieRecord]> = movies.iter().map(domain_to_local).collect();
        *self.snapshot.write().await = Some(records);
        Ok(())
    }
}
