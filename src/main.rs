//! Readable URL server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id ─▶ rewriter ──────────▶ site handler
//!                                     │   │ (real path)
//!                                     │   └─ PathResolver ─▶ PathMatcher
//!                                     │            │
//!                                     │            └─▶ MemoryStore ◀── records.json
//!                                     ▼                                 (watched)
//!     ◀────────────── 301 / 303 redirect, or site response (404 if excluded)
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use readable_urls::config::{load_config, RewriterConfig};
use readable_urls::lifecycle::{spawn_signal_listener, Shutdown};
use readable_urls::observability::{logging, metrics};
use readable_urls::store::{MemoryStore, StoreWatcher};
use readable_urls::HttpServer;

#[derive(Parser)]
#[command(name = "readable-urls")]
#[command(about = "Serves catalog records under readable URLs", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RewriterConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!("readable-urls v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        data_path = ?config.store.data_path,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = match &config.store.data_path {
        Some(path) => Arc::new(MemoryStore::load_from_file(Path::new(path))?),
        None => Arc::new(MemoryStore::new()),
    };
    if store.is_empty() {
        tracing::warn!("Record store is empty; every path passes through unchanged");
    } else {
        tracing::info!(records = store.len(), "Record store ready");
    }

    // Held for the lifetime of the server; dropping it stops the watcher.
    let _watcher = match (&config.store.data_path, config.store.watch) {
        (Some(path), true) => Some(StoreWatcher::new(Path::new(path), store.clone()).run()?),
        _ => None,
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config, store)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
