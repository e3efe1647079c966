//! Records file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::store::MemoryStore;

/// A watcher that reloads the store when its records file changes.
pub struct StoreWatcher {
    path: PathBuf,
    store: Arc<MemoryStore>,
}

impl StoreWatcher {
    pub fn new(path: &Path, store: Arc<MemoryStore>) -> Self {
        Self {
            path: path.to_path_buf(),
            store,
        }
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for as long as reloads are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let store = self.store.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Records file change detected, reloading...");
                        if let Err(e) = store.reload_from_file(&path) {
                            tracing::error!(
                                "Failed to reload records: {}. Keeping current snapshot.",
                                e
                            );
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Records watcher started");
        Ok(watcher)
    }
}
