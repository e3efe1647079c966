//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceExt;

use readable_urls::config::RewriterConfig;
use readable_urls::store::{MemoryStore, Record};
use readable_urls::{HttpServer, Shutdown};

/// A small catalog covering every rule.
pub fn sample_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::from_records([
        Record::new("/books/OL10M", "/type/edition").with_field("title", "Вас ил"),
        Record::new("/books/OL1M", "/type/edition").with_field("title", "Dune"),
        Record::new("/books/OL2M", "/type/edition").with_field("title", "Hidden"),
        Record::new("/books/OL3M", "/type/edition"),
        Record::new("/authors/OL1A", "/type/author").with_field("name", "Ursula K. Le Guin"),
        Record::new("/works/OL1W", "/type/work").with_field("title", "Earthsea"),
        Record::new("/people/george", "/type/user"),
        Record::new("/people/george/lists/OL5L", "/type/list").with_field("name", "To read"),
    ]))
}

pub fn test_config() -> RewriterConfig {
    let mut config = RewriterConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.exclusion.keys = vec!["/books/OL2M".into()];
    config
}

pub fn router() -> Router {
    HttpServer::new(test_config(), sample_store())
        .expect("builtin rules compile")
        .router()
}

/// Send one request through the router without a socket.
pub async fn send(method: &str, uri: &str, accept: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(accept) = accept {
        builder = builder.header("accept", accept);
    }
    let request = builder.body(Body::empty()).unwrap();
    router().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Start a live server on an ephemeral port.
pub async fn start_server() -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(test_config(), sample_store()).unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}
