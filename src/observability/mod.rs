//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Rewriter, resolver and store produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout log aggregation
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the tower-http trace spans
//! - Metric updates are cheap; the exporter is optional

pub mod logging;
pub mod metrics;
