//! Real and readable path resolution.
//!
//! # Responsibilities
//! - Match the path against the rule table
//! - Resolve the identifier through the fallback lookup
//! - Rebuild the real path (identifier only) and the readable path (with slug)
//! - Report whether the resolved record is excluded
//!
//! # Design Decisions
//! - Structured formats (`.json`, `.rdf`, `.yml`, or an explicit encoding)
//!   never carry a slug; real and readable paths are equal
//! - A record of the wrong type keeps its canonical key but gets no slug
//! - Nothing here fails; every miss degrades to passthrough

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::policy::{ExclusionPolicy, NoExclusion};
use crate::resolve::lookup::lookup;
use crate::resolve::slug::slugify;
use crate::routing::PathMatcher;
use crate::store::{ObjectStore, Record};

/// Structured representations a record can be requested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Json,
    Rdf,
    Yml,
}

impl Encoding {
    pub fn extension(&self) -> &'static str {
        match self {
            Encoding::Json => ".json",
            Encoding::Rdf => ".rdf",
            Encoding::Yml => ".yml",
        }
    }

    /// Encoding explicitly requested by an `Accept` header value.
    ///
    /// Media ranges sent with `q=0` are refused by the client and skipped.
    pub fn from_accept(accept: &str) -> Option<Self> {
        accept.split(',').find_map(|part| {
            let mut params = part.split(';');
            let media = params.next().unwrap_or_default().trim();
            if params.any(is_refused) {
                return None;
            }
            match media {
                "application/json" => Some(Encoding::Json),
                "application/rdf+xml" => Some(Encoding::Rdf),
                "text/x-yaml" | "application/x-yaml" | "application/yaml" => Some(Encoding::Yml),
                _ => None,
            }
        })
    }

    fn from_path(path: &str) -> Option<Self> {
        [Encoding::Json, Encoding::Rdf, Encoding::Yml]
            .into_iter()
            .find(|e| path.ends_with(e.extension()))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension()[1..])
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('.') {
            "json" => Ok(Encoding::Json),
            "rdf" => Ok(Encoding::Rdf),
            "yml" | "yaml" => Ok(Encoding::Yml),
            other => Err(format!("unknown encoding `{other}`")),
        }
    }
}

/// Result of resolving one path. Both paths are decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Identifier-based path used for lookups.
    pub real_path: String,
    /// Path shown to users, with the slug when one applies.
    pub readable_path: String,
    /// The resolved record must be answered with 404.
    pub excluded: bool,
}

impl Resolution {
    fn unchanged(path: &str) -> Self {
        Self {
            real_path: path.to_string(),
            readable_path: path.to_string(),
            excluded: false,
        }
    }
}

/// Resolves paths against a record store.
pub struct PathResolver {
    matcher: PathMatcher,
    store: Arc<dyn ObjectStore>,
    policy: Arc<dyn ExclusionPolicy>,
}

impl PathResolver {
    pub fn new(matcher: PathMatcher, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            matcher,
            store,
            policy: Arc::new(NoExclusion),
        }
    }

    pub fn with_policy(mut self, policy: Arc<dyn ExclusionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    /// Returns the real and readable forms of `path`.
    pub fn resolve(&self, path: &str, encoding: Option<Encoding>) -> Resolution {
        let Some(matched) = self.matcher.match_path(path) else {
            return Resolution::unchanged(path);
        };

        if encoding.is_some() || Encoding::from_path(path).is_some() {
            let (key, ext) = split_extension(path);
            let record = lookup(self.store(), key);
            let resolved = match &record {
                Some(record) => format!("{}{}", record.key, ext),
                None => path.to_string(),
            };
            return Resolution {
                real_path: resolved.clone(),
                readable_path: resolved,
                excluded: self.is_excluded(record.as_deref()),
            };
        }

        let rule = matched.rule;
        let record = lookup(self.store(), &matched.prefix);
        let prefix = record
            .as_ref()
            .map(|r| r.key.clone())
            .unwrap_or(matched.prefix);

        let middle = match &record {
            Some(record) if record.type_key() == rule.record_type.as_key() => {
                let title = record.get(&rule.title_field);
                format!("/{}", slugify(title, &rule.default_title))
            }
            _ => String::new(),
        };

        let excluded = self.is_excluded(record.as_deref());
        if excluded {
            tracing::info!(key = %prefix, "Record is excluded");
        }

        Resolution {
            real_path: format!("{prefix}{}", matched.suffix),
            readable_path: format!("{prefix}{middle}{}", matched.suffix),
            excluded,
        }
    }

    fn is_excluded(&self, record: Option<&Record>) -> bool {
        record.is_some_and(|r| self.policy.is_excluded(r))
    }
}

/// Splits a trailing extension off the last path segment.
///
/// Leading dots of the segment do not start an extension.
/// `q=0` (or `q=0.0`, `q=0.000`) marks a media range as not acceptable.
fn is_refused(param: &str) -> bool {
    param
        .trim()
        .strip_prefix("q=")
        .and_then(|q| q.trim().parse::<f32>().ok())
        .is_some_and(|q| q == 0.0)
}

fn split_extension(path: &str) -> (&str, &str) {
    let segment_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    let segment = &path[segment_start..];
    let leading_dots = segment.len() - segment.trim_start_matches('.').len();

    match segment[leading_dots..].rfind('.') {
        Some(dot) => path.split_at(segment_start + leading_dots + dot),
        None => (path, ""),
    }
}
