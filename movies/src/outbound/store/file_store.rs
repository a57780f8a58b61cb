//! JSON snapshot store scoped to one cache directory.
//!
//! The whole collection lives in a single versioned document. Writes replace
//! the file atomically; a missing file means the store was never written.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::atomic_io::{validate_file_name, write_atomic};
use crate::domain::Movie;
use crate::domain::mapper::{domain_to_local, local_to_domain};
use crate::domain::ports::{LocalMovieRecord, LocalMovieStore, LocalStoreError, ensure_unique_ids};

/// File name used when none is configured.
pub const DEFAULT_SNAPSHOT_FILE: &str = "movies.json";

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotDocument {
    version: u32,
    movies: Vec<LocalMovieRecord>,
}

/// Local store persisting the movie snapshot as JSON on disk.
#[derive(Debug, Clone)]
pub struct FileMovieStore {
    dir: Arc<Dir>,
    file_name: String,
}

impl FileMovieStore {
    /// Open (creating if needed) `directory` and use the default file name.
    ///
    /// # Errors
    ///
    /// Returns [`LocalStoreError::Unavailable`] when the directory cannot be
    /// created or opened.
    pub fn open(directory: impl AsRef<Path>) -> Result<Self, LocalStoreError> {
        Self::open_with_file_name(directory, DEFAULT_SNAPSHOT_FILE)
    }

    /// Open (creating if needed) `directory` with an explicit file name.
    ///
    /// # Errors
    ///
    /// Returns [`LocalStoreError::Unavailable`] when the directory cannot be
    /// created or opened, or when `file_name` is not a bare file name.
    pub fn open_with_file_name(
        directory: impl AsRef<Path>,
        file_name: &str,
    ) -> Result<Self, LocalStoreError> {
        let path = directory.as_ref();
        validate_file_name(file_name).map_err(|error| unavailable(path, &error))?;
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(|error| unavailable(path, &error))?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(|error| unavailable(path, &error))?;
        Ok(Self {
            dir: Arc::new(dir),
            file_name: file_name.to_owned(),
        })
    }

    async fn run_blocking<T, F>(&self, operation: F) -> Result<T, LocalStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir, &str) -> Result<T, LocalStoreError> + Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        tokio::task::spawn_blocking(move || operation(&dir, &file_name))
            .await
            .map_err(|error| LocalStoreError::unavailable(format!("store task failed: {error}")))?
    }
}

#[async_trait]
impl LocalMovieStore for FileMovieStore {
    async fn read_all(&self) -> Result<Vec<Movie>, LocalStoreError> {
        let contents = self
            .run_blocking(|dir, file_name| match dir.read(file_name) {
                Ok(contents) => Ok(contents),
                Err(error) if error.kind() == io::ErrorKind::NotFound => {
                    Err(LocalStoreError::uninitialized())
                }
                Err(error) => Err(LocalStoreError::unavailable(format!(
                    "read {file_name}: {error}"
                ))),
            })
            .await?;

        let movies = decode_snapshot(&contents)?;
        debug!(count = movies.len(), file = %self.file_name, "read movie snapshot");
        Ok(movies)
    }

    async fn replace_all(&self, movies: &[Movie]) -> Result<(), LocalStoreError> {
        ensure_unique_ids(movies.iter().map(Movie::id))?;
        let contents = encode_snapshot(movies)?;
        let count = movies.len();

        self.run_blocking(move |dir, file_name| {
            write_atomic(dir, file_name, &contents).map_err(|error| {
                LocalStoreError::unavailable(format!("write {file_name}: {error}"))
            })
        })
        .await?;

        debug!(count, file = %self.file_name, "replaced movie snapshot");
        Ok(())
    }
}

fn encode_snapshot(movies: &[Movie]) -> Result<Vec<u8>, LocalStoreError> {
    let document = SnapshotDocument {
        version: SNAPSHOT_VERSION,
        movies: movies.iter().map(domain_to_local).collect(),
    };
    serde_json::to_vec_pretty(&document)
        .map_err(|error| LocalStoreError::unavailable(format!("encode snapshot: {error}")))
}

fn decode_snapshot(contents: &[u8]) -> Result<Vec<Movie>, LocalStoreError> {
    let document: SnapshotDocument = serde_json::from_slice(contents)
        .map_err(|error| LocalStoreError::corrupt(format!("invalid snapshot JSON: {error}")))?;
    if document.version != SNAPSHOT_VERSION {
        return Err(LocalStoreError::corrupt(format!(
            "unsupported snapshot version {}",
            document.version
        )));
    }
    ensure_unique_ids(document.movies.iter().map(|record| record.id)).map_err(|error| {
        LocalStoreError::corrupt(format!("snapshot keys are not unique: {error}"))
    })?;
    Ok(document.movies.into_iter().map(local_to_domain).collect())
}

fn unavailable(path: &Path, error: &io::Error) -> LocalStoreError {
    LocalStoreError::unavailable(format!("{}: {error}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::not_json(b"not json".as_slice(), "invalid snapshot JSON")]
    #[case::wrong_version(
        br#"{"version":2,"movies":[]}"#.as_slice(),
        "unsupported snapshot version 2"
    )]
    #[case::unknown_field(
        br#"{"version":1,"movies":[],"extra":true}"#.as_slice(),
        "invalid snapshot JSON"
    )]
    #[case::missing_field(
        br#"{"version":1,"movies":[{"id":0,"title":"A","description":"d"}]}"#.as_slice(),
        "invalid snapshot JSON"
    )]
    #[case::duplicate_ids(
        br#"{"version":1,"movies":[
            {"id":0,"title":"A","description":"d1","posterPath":"/p1"},
            {"id":0,"title":"B","description":"d2","posterPath":"/p2"}
        ]}"#.as_slice(),
        "snapshot keys are not unique"
    )]
    fn malformed_snapshots_are_corrupt(#[case] contents: &[u8], #[case] expected: &str) {
        let error = decode_snapshot(contents).expect_err("snapshot must be rejected");
        match error {
            LocalStoreError::Corrupt { message } => assert!(
                message.contains(expected),
                "unexpected corruption message: {message}"
            ),
            other => panic!("expected corruption, got {other:?}"),
        }
    }

    #[test]
    fn encoded_snapshot_decodes_to_the_same_movies() {
        let movies = vec![
            Movie::new(0, "A", "d1", "/p1"),
            Movie::new(1, "B", "d2", "/p2"),
        ];
        let encoded = encode_snapshot(&movies).expect("encode");
        let text = String::from_utf8(encoded.clone()).expect("utf-8");

        assert!(text.contains("\"posterPath\": \"/p1\""));
        assert_eq!(decode_snapshot(&encoded).expect("decode"), movies);
    }

    #[test]
    fn empty_snapshot_is_a_valid_collection() {
        let decoded = decode_snapshot(br#"{"version":1,"movies":[]}"#).expect("decode");
        assert!(decoded.is_empty());
    }

    #[test]
    fn nested_file_names_are_rejected() {
        let root = tempfile::tempdir().expect("temp dir");
        let error = FileMovieStore::open_with_file_name(root.path(), "nested/movies.json")
            .expect_err("nested names are invalid");
        assert!(error.is_unavailable());
    }
}
