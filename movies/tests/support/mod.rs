//! Shared helpers for integration tests: a canned loopback HTTP server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

/// Canned response for one request path.
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Loopback server answering each request path with a fixed response.
///
/// Unknown paths receive `404` with an empty body. Every request head is
/// recorded so tests can assert on headers.
pub struct StubServer {
    base_url: Url,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub async fn start(routes: impl IntoIterator<Item = (&'static str, CannedResponse)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener address");
        let routes: Arc<HashMap<String, CannedResponse>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, response)| (path.to_owned(), response))
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    serve(stream, &routes, &recorded).await;
                });
            }
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}/api/")).expect("base url"),
            requests,
        }
    }

    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("request log poisoned").clone()
    }
}

async fn serve(
    mut stream: TcpStream,
    routes: &HashMap<String, CannedResponse>,
    recorded: &Mutex<Vec<String>>,
) {
    let mut head = Vec::new();
    let mut chunk = [0_u8; 1024];
    while !head.windows(4).any(|window| window == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(read) => head.extend_from_slice(chunk.get(..read).unwrap_or_default()),
        }
    }
    let head = String::from_utf8_lossy(&head).into_owned();
    let path = head
        .split_whitespace()
        .nth(1)
        .unwrap_or_default()
        .to_owned();
    recorded.lock().expect("request log poisoned").push(head);

    let response = routes
        .get(&path)
        .cloned()
        .unwrap_or_else(|| CannedResponse::json(404, ""));
    let payload = format!(
        concat!(
            "HTTP/1.1 {} Stub\r\n",
            "Content-Type: application/json\r\n",
            "Content-Length: {}\r\n",
            "Connection: close\r\n\r\n{}",
        ),
        response.status,
        response.body.len(),
        response.body
    );
    if stream.write_all(payload.as_bytes()).await.is_ok() {
        drop(stream.shutdown().await);
    }
}

/// Address on which nothing is listening.
pub async fn refused_base_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    Url::parse(&format!("http://{addr}/api/")).expect("base url")
}
