//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path
//!     → matcher.rs (first rule whose pattern matches the path start)
//!     → Return: MatchResult (rule, prefix, middle, suffix) or no match
//!
//! Rule Compilation (at startup):
//!     Rule[] (declared order)
//!     → Validate (no duplicates, non-empty fields)
//!     → Compile anchored regexes
//!     → Freeze as immutable RuleTable
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same rule
//! - First match wins (declared order is a correctness invariant)

pub mod matcher;
pub mod rules;

pub use matcher::{MatchResult, PathMatcher};
pub use rules::{RecordType, Rule, RuleError, RuleTable};
