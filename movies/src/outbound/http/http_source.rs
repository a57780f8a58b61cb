//! Reqwest-backed catalogue source adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into remote records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{MovieListDto, MovieRecordDto};
use crate::domain::ports::{RemoteError, RemoteMovieRecord, RemoteMovieSource};

const DEFAULT_USER_AGENT: &str = concat!("movies-data/", env!("CARGO_PKG_VERSION"));
const MOVIES_PATH: &str = "movies";

/// Catalogue source performing HTTP GET requests against one API base URL.
#[derive(Debug, Clone)]
pub struct HttpMovieSource {
    client: Client,
    base_url: Url,
    bearer_token: Option<String>,
}

impl HttpMovieSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// ```rust,ignore
    /// let source = HttpMovieSource::new(base_url, Duration::from_secs(10))?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: ensure_trailing_slash(base_url),
            bearer_token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    fn list_url(&self) -> Result<Url, RemoteError> {
        join(&self.base_url, MOVIES_PATH)
    }

    fn detail_url(&self, id: i64) -> Result<Url, RemoteError> {
        join(&self.base_url, &format!("{MOVIES_PATH}/{id}"))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchFailure> {
        let mut request = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "catalogue response");
        if !status.is_success() {
            return Err(FetchFailure::Status(status, body_preview(body.as_ref())));
        }
        decode(body.as_ref()).map_err(FetchFailure::Remote)
    }
}

/// Failure before the port-level mapping, so callers can special-case 404.
enum FetchFailure {
    Remote(RemoteError),
    Status(StatusCode, String),
}

#[async_trait]
impl RemoteMovieSource for HttpMovieSource {
    async fn fetch_movie_list(&self) -> Result<Vec<RemoteMovieRecord>, RemoteError> {
        let url = self.list_url()?;
        match self.get_json::<MovieListDto>(url).await {
            Ok(list) => Ok(list.into_records()),
            Err(FetchFailure::Remote(error)) => Err(error),
            Err(FetchFailure::Status(status, preview)) => Err(map_status_error(status, preview)),
        }
    }

    async fn fetch_movie_detail(&self, id: i64) -> Result<RemoteMovieRecord, RemoteError> {
        let url = self.detail_url(id)?;
        match self.get_json::<MovieRecordDto>(url).await {
            Ok(record) => Ok(record.into_record()),
            Err(FetchFailure::Remote(error)) => Err(error),
            Err(FetchFailure::Status(StatusCode::NOT_FOUND, _)) => Err(RemoteError::not_found(id)),
            Err(FetchFailure::Status(status, preview)) => Err(map_status_error(status, preview)),
        }
    }
}

fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn join(base: &Url, path: &str) -> Result<Url, RemoteError> {
    base.join(path)
        .map_err(|error| RemoteError::transport(format!("invalid request URL for {path}: {error}")))
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, RemoteError> {
    serde_json::from_slice(body)
        .map_err(|error| RemoteError::decode(format!("invalid catalogue JSON payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> FetchFailure {
    let mapped = if error.is_timeout() {
        RemoteError::timeout(error.to_string())
    } else if error.is_decode() {
        RemoteError::decode(error.to_string())
    } else {
        RemoteError::transport(error.to_string())
    };
    FetchFailure::Remote(mapped)
}

fn map_status_error(status: StatusCode, preview: String) -> RemoteError {
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        preview
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            RemoteError::timeout(format!("status {}: {message}", status.as_u16()))
        }
        _ => RemoteError::status(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    fn source(base: &str) -> HttpMovieSource {
        let url = Url::parse(base).expect("valid base URL");
        HttpMovieSource::new(url, Duration::from_secs(5)).expect("client builds")
    }

    #[rstest]
    #[case::bare_host("https://api.example.test", "https://api.example.test/movies")]
    #[case::prefix_without_slash(
        "https://api.example.test/v1",
        "https://api.example.test/v1/movies"
    )]
    #[case::prefix_with_slash("https://api.example.test/v1/", "https://api.example.test/v1/movies")]
    fn list_url_is_relative_to_base_path(#[case] base: &str, #[case] expected: &str) {
        assert_eq!(source(base).list_url().expect("url").as_str(), expected);
    }

    #[test]
    fn detail_url_appends_identifier() {
        let url = source("https://api.example.test/v1").detail_url(12).expect("url");
        assert_eq!(url.as_str(), "https://api.example.test/v1/movies/12");
    }

    #[test]
    fn decodes_bare_array_payloads() {
        let body = br#"[
            {"title": "A", "description": "d1", "posterPath": "/p1"},
            {"title": "B", "description": "d2", "posterPath": "/p2"}
        ]"#;
        let list: MovieListDto = decode(body).expect("payload decodes");
        let records = list.into_records();

        assert_eq!(records.len(), 2);
        assert_eq!(records.first().map(|r| r.title.as_str()), Some("A"));
        assert_eq!(records.get(1).map(|r| r.poster_path.as_str()), Some("/p2"));
    }

    #[test]
    fn decodes_wrapped_payloads_with_tmdb_field_names() {
        let body = br#"{
            "page": 1,
            "results": [
                {
                    "title": "Heat",
                    "overview": "Cops and robbers.",
                    "poster_path": "/heat.jpg",
                    "id": 949
                }
            ]
        }"#;
        let list: MovieListDto = decode(body).expect("payload decodes");

        assert_eq!(
            list.into_records(),
            vec![RemoteMovieRecord {
                title: "Heat".to_owned(),
                description: "Cops and robbers.".to_owned(),
                poster_path: "/heat.jpg".to_owned(),
            }]
        );
    }

    #[rstest]
    #[case::not_json(b"<html>oops</html>".as_slice())]
    #[case::missing_poster(br#"[{"title": "A", "description": "d1"}]"#.as_slice())]
    #[case::wrong_shape(br#"{"movies": []}"#.as_slice())]
    fn rejects_undecodable_payloads(#[case] body: &[u8]) {
        let error = decode::<MovieListDto>(body).expect_err("decode should fail");
        assert!(error.is_decode(), "expected decode error, got {error:?}");
    }

    #[rstest]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT, true)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, true)]
    #[case::unauthorised(StatusCode::UNAUTHORIZED, false)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, false)]
    fn maps_statuses_to_timeout_or_status(#[case] status: StatusCode, #[case] is_timeout: bool) {
        let error = map_status_error(status, "backend unavailable".to_owned());
        assert_eq!(error.is_timeout(), is_timeout);
        assert_eq!(error.is_status(), !is_timeout);
    }

    #[test]
    fn empty_bodies_fall_back_to_the_reason_phrase() {
        let error = map_status_error(StatusCode::SERVICE_UNAVAILABLE, body_preview(b"  \n "));
        assert_eq!(error, RemoteError::status(503_u16, "Service Unavailable"));
    }

    #[test]
    fn previews_are_compacted_and_truncated() {
        let long = format!("{{\"error\":\n  \"{}\"}}", "x".repeat(400));
        let preview = body_preview(long.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
        assert!(!preview.contains('\n'));
    }
}
