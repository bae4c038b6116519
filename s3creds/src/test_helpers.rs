//! In-process metadata service stand-in for tests

use axum::{http::StatusCode, routing::get, Router};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::task::JoinHandle;

pub const ROLE_PATH: &str = "/latest/meta-data/iam/security-credentials/";

/// Running mock server; stops when dropped.
pub struct TestServer {
    hits: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// Serves a fixed (status, body) pair per path. Returns (endpoint, server).
pub async fn start(responses: HashMap<String, (StatusCode, String)>) -> (String, TestServer) {
    let hits = Arc::new(AtomicUsize::new(0));
    let mut app = Router::new();

    for (path, (code, body)) in responses {
        let counter = hits.clone();
        let handler = move || {
            counter.fetch_add(1, Ordering::SeqCst);
            let body = body.clone();
            async move { (code, body) }
        };
        app = app.route(&path, get(handler));
    }

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), TestServer { hits, handle })
}

/// Endpoint on a port nothing is listening on.
pub async fn unused_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Raw TCP server answering one connection per entry, in order.
///
/// `Some(reply)` is written verbatim after the request head is read; `None`
/// closes the connection without answering.
pub async fn start_raw(replies: Vec<Option<&'static str>>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        for reply in replies {
            let (mut stream, _) = listener.accept().await.unwrap();
            read_request_head(&mut stream).await;
            if let Some(reply) = reply {
                stream.write_all(reply.as_bytes()).await.unwrap();
                stream.flush().await.unwrap();
            }
        }
    });

    format!("http://{}", addr)
}

async fn read_request_head(stream: &mut tokio::net::TcpStream) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
}
