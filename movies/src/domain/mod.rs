//! Domain entities, errors, mapping, and the movie repository.
//!
//! Purpose: keep business rules independent of HTTP and storage details.
//! Adapters in [`crate::outbound`] implement the traits in [`ports`].
//!
//! Public surface:
//! - `Movie`: canonical movie value object.
//! - `FetchError`: failure returned by repository reads.
//! - `MovieRepository`: cache-aside orchestrator implementing `MoviesQuery`.

pub mod error;
pub mod mapper;
pub mod movie;
pub mod movie_repository;
pub mod ports;

pub use self::error::{FetchError, LOCAL_CACHE_READ_FAILED};
pub use self::movie::Movie;
pub use self::movie_repository::{
    CacheWrite, MovieOrigin, MovieRepository, MoviesOutcome, OnlineFailurePolicy,
};
