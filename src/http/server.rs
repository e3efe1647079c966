//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the site handler
//! - Wire up middleware (rewriter, request ID, timeout, tracing)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RewriterConfig;
use crate::http::encoding::decode_path;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::rewriter::{rewrite_middleware, ReadablePath, RequestRewriter};
use crate::policy::{ExcludedKeys, ExclusionPolicy, NoExclusion};
use crate::resolve::PathResolver;
use crate::routing::{PathMatcher, RuleError, RuleTable};
use crate::store::{ObjectStore, Record};

/// HTTP server for the site.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and store.
    pub fn new(config: RewriterConfig, store: Arc<dyn ObjectStore>) -> Result<Self, RuleError> {
        let rewriter = Arc::new(build_rewriter(&config, store.clone())?);
        let router = Self::build_router(&config, rewriter, store);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(
        config: &RewriterConfig,
        rewriter: Arc<RequestRewriter>,
        store: Arc<dyn ObjectStore>,
    ) -> Router {
        Router::new()
            .fallback(site_handler)
            .with_state(store)
            .layer(middleware::from_fn_with_state(rewriter, rewrite_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The router, for serving or for driving directly in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown signal is received.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Assemble the rewriter described by `config`.
pub fn build_rewriter(
    config: &RewriterConfig,
    store: Arc<dyn ObjectStore>,
) -> Result<RequestRewriter, RuleError> {
    let matcher = PathMatcher::new(RuleTable::builtin()?)
        .with_action_segments(config.rewrite.action_segments.iter().cloned());

    let policy: Arc<dyn ExclusionPolicy> = if config.exclusion.keys.is_empty() {
        Arc::new(NoExclusion)
    } else {
        Arc::new(ExcludedKeys::new(config.exclusion.keys.iter().cloned()))
    };
    tracing::debug!(policy = ?policy, "Exclusion policy selected");

    let resolver = PathResolver::new(matcher, store).with_policy(policy);
    Ok(RequestRewriter::new(resolver).with_legacy_redirects(config.rewrite.legacy_redirects))
}

#[derive(Serialize)]
struct RecordView {
    path: String,
    readable_path: Option<String>,
    record: Record,
}

/// Site handler: renders the record owning the (real) request path.
///
/// The record is the one stored under the longest existing key prefix of the
/// path, so `/books/OL1M/edit` renders `/books/OL1M`.
async fn site_handler(State(store): State<Arc<dyn ObjectStore>>, request: Request) -> Response {
    let path = decode_path(request.uri().path());
    let readable_path = request
        .extensions()
        .get::<ReadablePath>()
        .map(|p| p.0.clone());

    let key = strip_known_extension(&path);
    let mut candidate = key;
    loop {
        if let Some(record) = store.get(candidate) {
            return Json(RecordView {
                path,
                readable_path,
                record: Record::clone(&record),
            })
            .into_response();
        }
        match candidate.rfind('/') {
            Some(idx) if idx > 0 => candidate = &candidate[..idx],
            _ => break,
        }
    }

    (StatusCode::NOT_FOUND, Json(serde_json::json!({ "error": "notfound", "path": path })))
        .into_response()
}

fn strip_known_extension(path: &str) -> &str {
    [".json", ".rdf", ".yml"]
        .into_iter()
        .find_map(|ext| path.strip_suffix(ext))
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_known_extension() {
        assert_eq!(strip_known_extension("/books/OL1M.json"), "/books/OL1M");
        assert_eq!(strip_known_extension("/books/OL1M.txt"), "/books/OL1M.txt");
    }

    #[test]
    fn test_build_rewriter_selects_policy() {
        let store: Arc<dyn ObjectStore> = Arc::new(crate::store::MemoryStore::from_records([
            Record::new("/books/OL1M", "/type/edition"),
        ]));
        let mut config = RewriterConfig::default();
        config.exclusion.keys = vec!["/books/OL1M".into()];
        let rewriter = build_rewriter(&config, store).unwrap();
        assert!(rewriter.resolver().resolve("/books/OL1M", None).excluded);
    }
}
