//! Driving port for movie reads.
//!
//! Callers pass a connectivity answer computed beforehand; the port never
//! probes the network itself.

use async_trait::async_trait;

use crate::domain::{FetchError, Movie};

/// Domain use-case port for listing movies and loading one movie.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MoviesQuery: Send + Sync {
    /// Return the movie list from the remote API when online, otherwise from
    /// the local cache.
    async fn get_movies(&self, is_online: bool) -> Result<Vec<Movie>, FetchError>;

    /// Return one movie by identifier.
    async fn get_movie(&self, id: i64, is_online: bool) -> Result<Movie, FetchError>;
}
