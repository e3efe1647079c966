//! In-memory record store backed by a swappable snapshot.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::store::{ObjectStore, Record, StoreError};

type Snapshot = HashMap<String, Arc<Record>>;

/// A thread-safe store of records keyed by path.
pub struct MemoryStore {
    records: ArcSwap<Snapshot>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let store = Self::new();
        store.replace(records);
        store
    }

    /// Load records from a JSON array file.
    pub fn load_from_file(path: &Path) -> Result<Self, StoreError> {
        let store = Self::new();
        store.reload_from_file(path)?;
        Ok(store)
    }

    /// Re-read `path` and swap it in. On error the current snapshot is kept.
    pub fn reload_from_file(&self, path: &Path) -> Result<usize, StoreError> {
        let shown = path.display().to_string();
        let file = File::open(path).map_err(|source| StoreError::Io {
            path: shown.clone(),
            source,
        })?;
        let records: Vec<Record> =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| StoreError::Parse {
                path: shown.clone(),
                source,
            })?;

        let count = self.replace(records);
        tracing::info!(path = %shown, records = count, "Loaded records");
        Ok(count)
    }

    /// Replace the whole snapshot atomically. Returns the new record count.
    pub fn replace(&self, records: impl IntoIterator<Item = Record>) -> usize {
        let snapshot: Snapshot = records
            .into_iter()
            .map(|r| (r.key.clone(), Arc::new(r)))
            .collect();
        let count = snapshot.len();
        self.records.store(Arc::new(snapshot));
        count
    }

    pub fn len(&self) -> usize {
        self.records.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.load().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Arc<Record>> {
        self.records.load().get(key).cloned()
    }
}
