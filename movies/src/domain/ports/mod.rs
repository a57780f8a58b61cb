//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod connectivity;
mod local_movie_store;
mod movies_query;
mod remote_movie_source;

pub use connectivity::{ConnectivityProbe, FixedConnectivity};
pub(crate) use local_movie_store::ensure_unique_ids;
#[cfg(test)]
pub use local_movie_store::MockLocalMovieStore;
pub use local_movie_store::{LocalMovieRecord, LocalMovieStore, LocalStoreError};
#[cfg(test)]
pub use movies_query::MockMoviesQuery;
pub use movies_query::MoviesQuery;
#[cfg(test)]
pub use remote_movie_source::MockRemoteMovieSource;
pub use remote_movie_source::{RemoteError, RemoteMovieRecord, RemoteMovieSource};
