//! Repository-level failure surfaced to callers.
//!
//! Adapter errors are normalised into [`FetchError`] at the repository
//! boundary. Presentation code shows [`FetchError::message`] in a transient
//! notice and keeps whatever it rendered last.

use thiserror::Error;

use super::ports::{LocalStoreError, RemoteError};

/// Message attached to every offline cache read failure.
pub const LOCAL_CACHE_READ_FAILED: &str = "local cache read failed";

/// Failure returned once every avenue for a read is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The remote catalogue could not be read.
    #[error(transparent)]
    Remote(#[from] RemoteError),
    /// The local cache could not be read while offline.
    #[error("{}", LOCAL_CACHE_READ_FAILED)]
    LocalCache(#[source] LocalStoreError),
    /// The requested movie is not in the cached snapshot.
    #[error("no cached movie with id {id}")]
    NotFound {
        /// Identifier that was requested.
        id: i64,
    },
}

impl FetchError {
    /// Human-readable text for a transient notice.
    ///
    /// # Examples
    /// ```
    /// use movies::domain::FetchError;
    /// use movies::domain::ports::LocalStoreError;
    ///
    /// let err = FetchError::LocalCache(LocalStoreError::uninitialized());
    /// assert_eq!(err.message(), "local cache read failed");
    /// ```
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether the failure came from the remote catalogue.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}
