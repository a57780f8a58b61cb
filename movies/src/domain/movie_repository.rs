//! Movie repository: the cache-aside orchestrator.
//!
//! Online reads go to the remote catalogue and are written through to the
//! local store before returning. Offline reads come from the local store.
//! The repository keeps no state between calls; the store owns the snapshot.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::mapper::{remote_list_to_domain, remote_to_domain};
use crate::domain::ports::{
    LocalMovieStore, LocalStoreError, MoviesQuery, RemoteError, RemoteMovieSource,
};
use crate::domain::{FetchError, Movie};

/// What happens when an online fetch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnlineFailurePolicy {
    /// Surface the remote failure to the caller.
    #[default]
    Terminal,
    /// Serve the cached snapshot instead when the remote is unreachable
    /// (transport or timeout failures) and a snapshot exists. Answers from a
    /// reachable remote, such as a 404, still surface.
    FallBackToCache,
}

/// Where a returned collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieOrigin {
    /// Freshly fetched from the remote catalogue.
    Remote,
    /// Read from the local snapshot.
    Cache,
}

/// Result of the write-through step after a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheWrite {
    /// The fetched collection replaced the cached snapshot.
    Stored,
    /// The write failed; the fetched collection was still returned.
    Failed(LocalStoreError),
    /// No write was attempted because nothing new was fetched.
    Skipped,
}

/// Movies plus provenance for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoviesOutcome {
    /// Movies in list order.
    pub movies: Vec<Movie>,
    /// Source that produced `movies`.
    pub origin: MovieOrigin,
    /// Write-through status.
    pub cache_write: CacheWrite,
}

impl MoviesOutcome {
    fn from_cache(movies: Vec<Movie>) -> Self {
        Self {
            movies,
            origin: MovieOrigin::Cache,
            cache_write: CacheWrite::Skipped,
        }
    }
}

/// Repository unifying the remote catalogue and the local cache.
pub struct MovieRepository<R, L> {
    remote: Arc<R>,
    local: Arc<L>,
    online_failure_policy: OnlineFailurePolicy,
}

impl<R, L> Clone for MovieRepository<R, L> {
    fn clone(&self) -> Self {
        Self {
            remote: Arc::clone(&self.remote),
            local: Arc::clone(&self.local),
            online_failure_policy: self.online_failure_policy,
        }
    }
}

impl<R, L> MovieRepository<R, L> {
    /// Create a repository with the strict online-failure policy.
    pub fn new(remote: Arc<R>, local: Arc<L>) -> Self {
        Self {
            remote,
            local,
            online_failure_policy: OnlineFailurePolicy::default(),
        }
    }

    /// Replace the online-failure policy.
    #[must_use]
    pub fn with_online_failure_policy(mut self, policy: OnlineFailurePolicy) -> Self {
        self.online_failure_policy = policy;
        self
    }
}

impl<R, L> MovieRepository<R, L>
where
    R: RemoteMovieSource,
    L: LocalMovieStore,
{
    /// Read the movie list and report where it came from.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Remote`] when the online fetch fails (and the
    /// policy does not permit a cache fallback) and
    /// [`FetchError::LocalCache`] when the offline cache read fails.
    pub async fn fetch_movies(&self, is_online: bool) -> Result<MoviesOutcome, FetchError> {
        if !is_online {
            return self.read_cache().await.map(MoviesOutcome::from_cache);
        }

        let records = match self.remote.fetch_movie_list().await {
            Ok(records) => records,
            Err(error) => {
                return self
                    .recover_from_remote_failure(error)
                    .await
                    .map(MoviesOutcome::from_cache);
            }
        };

        let movies = remote_list_to_domain(records);
        let cache_write = self.write_through(&movies).await;
        info!(count = movies.len(), "fetched movies from remote");
        Ok(MoviesOutcome {
            movies,
            origin: MovieOrigin::Remote,
            cache_write,
        })
    }

    /// Read one movie.
    ///
    /// Online, the detail record is fetched from the remote catalogue and is
    /// not written through. Offline, the movie is looked up in the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] when the snapshot has no such id, and
    /// the same remote and cache failures as [`Self::fetch_movies`].
    pub async fn fetch_movie(&self, id: i64, is_online: bool) -> Result<Movie, FetchError> {
        let movies = if is_online {
            match self.remote.fetch_movie_detail(id).await {
                Ok(record) => return Ok(remote_to_domain(record, id)),
                Err(error) => self.recover_from_remote_failure(error).await?,
            }
        } else {
            self.read_cache().await?
        };

        movies
            .into_iter()
            .find(|movie| movie.id() == id)
            .ok_or(FetchError::NotFound { id })
    }

    async fn recover_from_remote_failure(
        &self,
        error: RemoteError,
    ) -> Result<Vec<Movie>, FetchError> {
        let may_fall_back = self.online_failure_policy == OnlineFailurePolicy::FallBackToCache
            && error.is_connectivity_failure();
        if !may_fall_back {
            warn!(%error, "remote movie fetch failed");
            return Err(FetchError::Remote(error));
        }

        match self.local.read_all().await {
            Ok(movies) => {
                warn!(%error, count = movies.len(), "remote unreachable; serving cache");
                Ok(movies)
            }
            Err(cache_error) => {
                warn!(%error, %cache_error, "remote unreachable; cache unavailable");
                Err(FetchError::Remote(error))
            }
        }
    }

    async fn write_through(&self, movies: &[Movie]) -> CacheWrite {
        match self.local.replace_all(movies).await {
            Ok(()) => {
                debug!(count = movies.len(), "movie cache replaced");
                CacheWrite::Stored
            }
            Err(error) => {
                warn!(%error, "movie cache write-through failed");
                CacheWrite::Failed(error)
            }
        }
    }

    async fn read_cache(&self) -> Result<Vec<Movie>, FetchError> {
        self.local.read_all().await.map_err(|error| {
            warn!(%error, "movie cache read failed");
            FetchError::LocalCache(error)
        })
    }
}

#[async_trait]
impl<R, L> MoviesQuery for MovieRepository<R, L>
where
    R: RemoteMovieSource,
    L: LocalMovieStore,
{
    async fn get_movies(&self, is_online: bool) -> Result<Vec<Movie>, FetchError> {
        self.fetch_movies(is_online).await.map(|outcome| outcome.movies)
    }

    async fn get_movie(&self, id: i64, is_online: bool) -> Result<Movie, FetchError> {
        self.fetch_movie(id, is_online).await
    }
}

#[cfg(test)]
#[path = "movie_repository_tests.rs"]
mod tests;
