//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup)
//!     → request.rs (request ID)
//!     → rewriter.rs (legacy redirects, resolve, readable redirect or delegate)
//!     → site handler (sees the real path)
//!     → response.rs (redirects, not-found override)
//!     → Send to client
//! ```

pub mod encoding;
pub mod request;
pub mod response;
pub mod rewriter;
pub mod server;

pub use request::X_REQUEST_ID;
pub use rewriter::{rewrite_middleware, Plan, ReadablePath, RequestRewriter};
pub use server::{build_rewriter, HttpServer};
