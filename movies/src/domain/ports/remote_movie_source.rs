//! Driven port for reading movies from the remote catalogue API.
//!
//! The domain owns the record shape so repository orchestration stays
//! adapter-agnostic. List payloads carry no identifier; callers assign one
//! when mapping into [`crate::domain::Movie`].

use async_trait::async_trait;

use super::define_port_error;

/// One movie as delivered by the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMovieRecord {
    /// Display title.
    pub title: String,
    /// Synopsis text.
    pub description: String,
    /// Poster path relative to the image host.
    pub poster_path: String,
}

define_port_error! {
    /// Errors surfaced while calling the remote catalogue.
    pub enum RemoteError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "remote transport failed: {message}",
        /// The request exceeded the transport timeout.
        Timeout { message: String } =>
            "remote request timed out: {message}",
        /// The API answered with a non-success status.
        Status { status: u16, message: String } =>
            "remote answered with status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "remote response decode failed: {message}",
        /// The API has no movie with the requested identifier.
        NotFound { id: i64 } =>
            "remote has no movie with id {id}",
    }
}

impl RemoteError {
    /// Whether the catalogue could not be reached at all.
    ///
    /// Only these failures justify serving the cache instead; a status,
    /// decode or not-found answer came from a reachable server.
    #[must_use]
    pub const fn is_connectivity_failure(&self) -> bool {
        self.is_transport() || self.is_timeout()
    }
}

/// Port for querying the remote movie catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteMovieSource: Send + Sync {
    /// Fetch the full movie list in API order.
    async fn fetch_movie_list(&self) -> Result<Vec<RemoteMovieRecord>, RemoteError>;

    /// Fetch the detail record for one movie.
    ///
    /// Detail is requested independently of any cached list.
    async fn fetch_movie_detail(&self, id: i64) -> Result<RemoteMovieRecord, RemoteError>;
}
