//! Readable URL rewriting.
//!
//! # Responsibilities
//! - Redirect legacy shorthand prefixes (`/l/`, `/user/`)
//! - Resolve the real and readable path of every request
//! - Redirect GET requests to the readable path when it differs
//! - Otherwise hand the real path to the site and replace excluded responses with 404
//!
//! # Data Flow
//! ```text
//! START → legacy prefix? ──yes──→ 303 (terminal)
//!           │ no
//!           ▼
//!       NORMALIZE (decode, strip trailing `/`)
//!           ▼
//!       RESOLVE (PathResolver)
//!           ▼
//!       readable differs && GET? ──yes──→ 301 (terminal)
//!           │ no
//!           ▼
//!       DELEGATE (uri = real path, ReadablePath extension)
//!           ▼
//!       excluded? ──yes──→ 404 page
//!           ▼
//!       RESPONSE
//! ```

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{header, uri::PathAndQuery, Method, StatusCode, Uri},
    middleware::Next,
    response::Response,
};

use crate::http::encoding::{decode_path, encode_path};
use crate::http::response;
use crate::observability::metrics;
use crate::resolve::{Encoding, PathResolver};

/// Readable form of the current request path, for link generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadablePath(pub String);

/// What to do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Redirect {
        status: StatusCode,
        location: String,
        kind: &'static str,
    },
    Proceed {
        real_path: String,
        readable_path: String,
        excluded: bool,
    },
}

/// Per-request rewriting in front of the site handler.
pub struct RequestRewriter {
    resolver: PathResolver,
    legacy_redirects: bool,
}

impl RequestRewriter {
    pub fn new(resolver: PathResolver) -> Self {
        Self {
            resolver,
            legacy_redirects: true,
        }
    }

    /// Enable or disable the `/l/` and `/user/` shortcuts.
    pub fn with_legacy_redirects(mut self, enabled: bool) -> Self {
        self.legacy_redirects = enabled;
        self
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Decide how to handle a request.
    ///
    /// `raw_path` is the path as received (percent-encoded); `query` is the raw
    /// query string without the leading `?`.
    pub fn plan(
        &self,
        method: &Method,
        raw_path: &str,
        query: Option<&str>,
        encoding: Option<Encoding>,
    ) -> Plan {
        let path = decode_path(raw_path);
        let query = query.map(|q| format!("?{q}")).unwrap_or_default();

        if self.legacy_redirects {
            if let Some(plan) = self.legacy_redirect(&path) {
                return plan;
            }
        }

        let normalized = strip_trailing_slashes(&path);
        let resolution = self.resolver.resolve(normalized, encoding);

        let readable = strip_trailing_slashes(&resolution.readable_path);
        let readable_path = encode_path(readable);
        let real_path = encode_path(&resolution.real_path);

        tracing::debug!(
            path = %path,
            real_path = %real_path,
            readable_path = %readable_path,
            "Resolved request path"
        );

        if readable != path && readable_path != encode_path(&path) && *method == Method::GET {
            return Plan::Redirect {
                status: StatusCode::MOVED_PERMANENTLY,
                location: format!("{readable_path}{query}"),
                kind: "readable",
            };
        }

        Plan::Proceed {
            real_path,
            readable_path,
            excluded: resolution.excluded,
        }
    }

    fn legacy_redirect(&self, path: &str) -> Option<Plan> {
        if let Some(rest) = path.strip_prefix("/l/") {
            return Some(Plan::Redirect {
                status: StatusCode::SEE_OTHER,
                location: encode_path(&format!("/languages/{rest}")),
                kind: "legacy_language",
            });
        }

        if let Some(rest) = path.strip_prefix("/user/") {
            if self.resolver.store().get(path).is_none() {
                return Some(Plan::Redirect {
                    status: StatusCode::SEE_OTHER,
                    location: encode_path(&format!("/people/{rest}")),
                    kind: "legacy_user",
                });
            }
        }

        None
    }
}

/// Trailing slashes are dropped, but `/` stays `/`.
fn strip_trailing_slashes(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}

/// Axum middleware running [`RequestRewriter`] in front of the inner service.
pub async fn rewrite_middleware(
    State(rewriter): State<Arc<RequestRewriter>>,
    mut request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let encoding = request
        .headers()
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .and_then(Encoding::from_accept);

    let uri = request.uri().clone();
    let plan = rewriter.plan(request.method(), uri.path(), uri.query(), encoding);

    match plan {
        Plan::Redirect {
            status,
            location,
            kind,
        } => {
            tracing::info!(from = %uri, to = %location, kind, "Redirecting");
            metrics::record_redirect(kind);
            response::redirect(status, &location)
        }
        Plan::Proceed {
            real_path,
            readable_path,
            excluded,
        } => {
            let target = match uri.query() {
                Some(q) => format!("{real_path}?{q}"),
                None => real_path.clone(),
            };
            match rewrite_uri(&uri, &target) {
                Some(rewritten) => *request.uri_mut() = rewritten,
                None => tracing::warn!(path = %target, "Real path is not a valid URI; leaving request unchanged"),
            }
            request.extensions_mut().insert(ReadablePath(readable_path));

            let response = next.run(request).await;

            if excluded {
                metrics::record_request("excluded", start);
                return response::not_found(&real_path);
            }
            metrics::record_request("proceed", start);
            response
        }
    }
}

fn rewrite_uri(uri: &Uri, path_and_query: &str) -> Option<Uri> {
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query).ok()?);
    Uri::from_parts(parts).ok()
}
