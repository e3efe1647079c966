//! Path resolution subsystem.
//!
//! # Data Flow
//! ```text
//! path
//!     → routing::PathMatcher (rule, prefix, middle, suffix)
//!     → lookup.rs (direct key, legacy prefixes, bare identifiers)
//!     → slug.rs (title → sanitized, decoded segment)
//!     → resolver.rs: Resolution { real_path, readable_path, excluded }
//! ```
//!
//! # Design Decisions
//! - Lookups are sequential; candidate order defines precedence
//! - The real path never contains a slug
//! - No errors: every miss falls back to the identifier-only path

pub mod lookup;
pub mod resolver;
pub mod slug;

pub use lookup::lookup;
pub use resolver::{Encoding, PathResolver, Resolution};
