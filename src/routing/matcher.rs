//! Path matching against the rule table.
//!
//! # Responsibilities
//! - Find the first rule whose pattern matches the start of a path
//! - Decompose the path into prefix, middle (slug position) and suffix
//! - Recognize action segments that sit where a slug would
//!
//! # Design Decisions
//! - First match wins; no scoring or longest-match
//! - An action segment is only recognized when it is the last segment, so a
//!   slug equal to an action name still round-trips

use std::collections::HashSet;

use crate::routing::rules::{CompiledRule, Rule, RuleTable};

/// Outcome of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'r> {
    pub rule: &'r Rule,
    /// Substring matched by the rule pattern.
    pub prefix: String,
    /// Segment following the prefix, where the slug lives.
    pub middle: String,
    /// Everything after `middle`, re-prefixed with `/` when present.
    pub suffix: String,
}

/// Matches paths against an ordered rule table.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    table: RuleTable,
    action_segments: HashSet<String>,
}

impl PathMatcher {
    pub fn new(table: RuleTable) -> Self {
        Self {
            table,
            action_segments: HashSet::new(),
        }
    }

    /// Treat these trailing segments as actions rather than slugs.
    pub fn with_action_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.action_segments = segments.into_iter().map(Into::into).collect();
        self
    }

    pub fn rules(&self) -> &RuleTable {
        &self.table
    }

    /// Returns the first matching rule and the decomposed path, or `None`.
    pub fn match_path(&self, path: &str) -> Option<MatchResult<'_>> {
        self.table
            .iter()
            .find_map(|compiled| self.decompose(compiled, path))
    }

    fn decompose<'r>(&'r self, compiled: &'r CompiledRule, path: &str) -> Option<MatchResult<'r>> {
        let prefix = compiled.match_prefix(path)?;
        let extra = &path[prefix.len()..];

        // The first token is whatever precedes the first `/` and is dropped.
        let mut tokens = extra.splitn(3, '/').skip(1);
        let mut middle = tokens.next().unwrap_or_default().to_string();
        let mut suffix = match tokens.next() {
            Some(rest) if !rest.is_empty() => format!("/{rest}"),
            _ => String::new(),
        };

        if suffix.is_empty() && self.action_segments.contains(&middle) {
            suffix = format!("/{middle}");
            middle = String::new();
        }

        Some(MatchResult {
            rule: &compiled.rule,
            prefix: prefix.to_string(),
            middle,
            suffix,
        })
    }
}
