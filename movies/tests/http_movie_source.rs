//! Integration tests for the reqwest catalogue adapter against a loopback
//! server.

use std::time::Duration;

use movies::domain::ports::{RemoteError, RemoteMovieRecord, RemoteMovieSource};
use movies::outbound::http::HttpMovieSource;
use rstest::rstest;

mod support;

use support::{CannedResponse, StubServer, refused_base_url};

const LIST_BODY: &str = r#"[
    {"title": "A", "description": "d1", "posterPath": "/p1"},
    {"title": "B", "description": "d2", "posterPath": "/p2"}
]"#;

fn source_for(server: &StubServer) -> HttpMovieSource {
    HttpMovieSource::new(server.base_url(), Duration::from_secs(5)).expect("client builds")
}

fn record(title: &str, description: &str, poster_path: &str) -> RemoteMovieRecord {
    RemoteMovieRecord {
        title: title.to_owned(),
        description: description.to_owned(),
        poster_path: poster_path.to_owned(),
    }
}

#[tokio::test]
async fn lists_movies_in_payload_order() {
    let server = StubServer::start([("/api/movies", CannedResponse::json(200, LIST_BODY))]).await;

    let records = source_for(&server)
        .fetch_movie_list()
        .await
        .expect("list succeeds");

    assert_eq!(records, vec![record("A", "d1", "/p1"), record("B", "d2", "/p2")]);
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests.iter().all(|head| head.starts_with("GET /api/movies HTTP/1.1")));
}

#[tokio::test]
async fn empty_lists_are_valid() {
    let server = StubServer::start([("/api/movies", CannedResponse::json(200, "[]"))]).await;

    let records = source_for(&server)
        .fetch_movie_list()
        .await
        .expect("list succeeds");

    assert!(records.is_empty());
}

#[tokio::test]
async fn fetches_one_detail_record() {
    let body = r#"{"title": "Heat", "overview": "Cops.", "poster_path": "/h.jpg"}"#;
    let server = StubServer::start([("/api/movies/7", CannedResponse::json(200, body))]).await;

    let detail = source_for(&server)
        .fetch_movie_detail(7)
        .await
        .expect("detail succeeds");

    assert_eq!(detail, record("Heat", "Cops.", "/h.jpg"));
}

#[tokio::test]
async fn missing_detail_maps_to_not_found() {
    let server = StubServer::start([]).await;

    let error = source_for(&server)
        .fetch_movie_detail(42)
        .await
        .expect_err("detail fails");

    assert_eq!(error, RemoteError::not_found(42_i64));
}

#[rstest]
#[case::server_error(500, "boom", RemoteError::status(500_u16, "boom"))]
#[case::missing_list(404, "", RemoteError::status(404_u16, "Not Found"))]
#[tokio::test]
async fn error_statuses_are_reported(
    #[case] status: u16,
    #[case] body: &'static str,
    #[case] expected: RemoteError,
) {
    let server = StubServer::start([("/api/movies", CannedResponse::json(status, body))]).await;

    let error = source_for(&server)
        .fetch_movie_list()
        .await
        .expect_err("list fails");

    assert_eq!(error, expected);
}

#[tokio::test]
async fn gateway_timeouts_map_to_timeout() {
    let server = StubServer::start([("/api/movies", CannedResponse::json(504, ""))]).await;

    let error = source_for(&server)
        .fetch_movie_list()
        .await
        .expect_err("list fails");

    assert!(error.is_timeout(), "expected timeout, got {error:?}");
}

#[rstest]
#[case::html("<html>maintenance</html>")]
#[case::missing_field(r#"[{"title": "A"}]"#)]
#[tokio::test]
async fn undecodable_bodies_map_to_decode(#[case] body: &'static str) {
    let server = StubServer::start([("/api/movies", CannedResponse::json(200, body))]).await;

    let error = source_for(&server)
        .fetch_movie_list()
        .await
        .expect_err("list fails");

    assert!(error.is_decode(), "expected decode error, got {error:?}");
}

#[tokio::test]
async fn bearer_tokens_are_sent_when_configured() {
    let server = StubServer::start([("/api/movies", CannedResponse::json(200, "[]"))]).await;

    source_for(&server)
        .with_bearer_token("s3cret")
        .fetch_movie_list()
        .await
        .expect("list succeeds");

    let requests = server.requests();
    assert!(
        requests
            .iter()
            .any(|head| head.to_ascii_lowercase().contains("authorization: bearer s3cret")),
        "missing bearer header in {requests:?}"
    );
}

#[tokio::test]
async fn refused_connections_map_to_transport() {
    let base_url = refused_base_url().await;
    let source = HttpMovieSource::new(base_url, Duration::from_secs(5)).expect("client builds");

    let error = source.fetch_movie_list().await.expect_err("list fails");

    assert!(error.is_transport(), "expected transport error, got {error:?}");
}
