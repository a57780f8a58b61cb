//! DTOs for decoding catalogue API responses.
//!
//! The adapter decodes into these transport DTOs first, then converts into
//! domain-owned [`RemoteMovieRecord`]s in one pass.

use serde::Deserialize;

use crate::domain::ports::RemoteMovieRecord;

/// List payload: either a bare array or an object wrapping `results`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum MovieListDto {
    Bare(Vec<MovieRecordDto>),
    Wrapped { results: Vec<MovieRecordDto> },
}

#[derive(Debug, Deserialize)]
pub(super) struct MovieRecordDto {
    title: String,
    #[serde(alias = "overview")]
    description: String,
    #[serde(rename = "posterPath", alias = "poster_path")]
    poster_path: String,
}

impl MovieListDto {
    pub(super) fn into_records(self) -> Vec<RemoteMovieRecord> {
        let items = match self {
            Self::Bare(items) | Self::Wrapped { results: items } => items,
        };
        items.into_iter().map(MovieRecordDto::into_record).collect()
    }
}

impl MovieRecordDto {
    pub(super) fn into_record(self) -> RemoteMovieRecord {
        RemoteMovieRecord {
            title: self.title,
            description: self.description,
            poster_path: self.poster_path,
        }
    }
}
