//! Conversions between the remote, local, and domain movie shapes.
//!
//! Every function only relabels fields. Local and domain shapes round-trip
//! losslessly; remote records gain an identifier supplied by the caller.

use super::Movie;
use super::ports::{LocalMovieRecord, RemoteMovieRecord};

/// Map a remote record into the domain, injecting its identifier.
///
/// # Examples
/// ```
/// use movies::domain::mapper::remote_to_domain;
/// use movies::domain::ports::RemoteMovieRecord;
///
/// let record = RemoteMovieRecord {
///     title: "A".to_owned(),
///     description: "d1".to_owned(),
///     poster_path: "/p1".to_owned(),
/// };
/// assert_eq!(remote_to_domain(record, 7).id(), 7);
/// ```
#[must_use]
pub fn remote_to_domain(record: RemoteMovieRecord, assigned_id: i64) -> Movie {
    let RemoteMovieRecord {
        title,
        description,
        poster_path,
    } = record;
    Movie::new(assigned_id, title, description, poster_path)
}

/// Map a remote list into the domain, numbering records by position.
///
/// Identity follows list order only; a reordered or paginated payload will
/// assign different ids to the same movie.
#[must_use]
pub fn remote_list_to_domain(records: Vec<RemoteMovieRecord>) -> Vec<Movie> {
    (0_i64..)
        .zip(records)
        .map(|(id, record)| remote_to_domain(record, id))
        .collect()
}

/// Map a persisted row into the domain.
#[must_use]
pub fn local_to_domain(record: LocalMovieRecord) -> Movie {
    let LocalMovieRecord {
        id,
        title,
        description,
        poster_path,
    } = record;
    Movie::new(id, title, description, poster_path)
}

/// Map a domain movie into its persisted row.
#[must_use]
pub fn domain_to_local(movie: &Movie) -> LocalMovieRecord {
    LocalMovieRecord {
        id: movie.id(),
        title: movie.title().to_owned(),
        description: movie.description().to_owned(),
        poster_path: movie.poster_path().to_owned(),
    }
}
