//! Record store subsystem.
//!
//! # Data Flow
//! ```text
//! records file (JSON array)
//!     → memory.rs (parse, index by key)
//!     → ArcSwap snapshot shared by all requests
//!
//! On file change:
//!     watcher.rs detects change
//!     → memory.rs reloads
//!     → atomic swap of the snapshot
//! ```
//!
//! # Design Decisions
//! - Lookups never fail: a missing key is simply `None`
//! - Records carry arbitrary fields; only string values are exposed to callers
//! - A failed reload keeps the previous snapshot

pub mod memory;
pub mod watcher;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub use memory::MemoryStore;
pub use watcher::StoreWatcher;

/// Key/value lookup the rewriter resolves paths against.
pub trait ObjectStore: Send + Sync {
    /// Returns the record stored under `key`.
    fn get(&self, key: &str) -> Option<Arc<Record>>;
}

impl<T: ObjectStore + ?Sized> ObjectStore for Arc<T> {
    fn get(&self, key: &str) -> Option<Arc<Record>> {
        (**self).get(key)
    }
}

/// Reference to a record's type, e.g. `{"key": "/type/edition"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub key: String,
}

/// A stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: TypeRef,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(key: impl Into<String>, type_key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: TypeRef {
                key: type_key.into(),
            },
            fields: Map::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), Value::String(value.into()));
        self
    }

    pub fn type_key(&self) -> &str {
        &self.kind.key
    }

    /// String value of `field`; non-string values read as absent.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}

/// Error type for loading records from disk.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
