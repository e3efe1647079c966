//! Readable URL rewriting for a bibliographic catalog.
//!
//! Identifier paths such as `/books/OL1M` are served under readable forms
//! such as `/books/OL1M/Title_of_the_book`, and requests are transparently
//! mapped back to the identifier path before the site handler runs.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod policy;
pub mod resolve;
pub mod routing;
pub mod store;

pub use config::RewriterConfig;
pub use http::{HttpServer, RequestRewriter};
pub use lifecycle::Shutdown;
pub use resolve::{PathResolver, Resolution};
