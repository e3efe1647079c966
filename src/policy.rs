//! Exclusion policy.
//!
//! Records flagged by the policy are still resolved, but the response for
//! them is replaced with a 404 after the site handler runs.

use std::collections::HashSet;

use crate::store::Record;

/// Decides whether a record must be hidden.
pub trait ExclusionPolicy: Send + Sync + std::fmt::Debug {
    fn is_excluded(&self, record: &Record) -> bool;
}

/// Policy that never excludes anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExclusion;

impl ExclusionPolicy for NoExclusion {
    fn is_excluded(&self, _record: &Record) -> bool {
        false
    }
}

/// Excludes a fixed set of record keys.
#[derive(Debug, Clone, Default)]
pub struct ExcludedKeys {
    keys: HashSet<String>,
}

impl ExcludedKeys {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

impl ExclusionPolicy for ExcludedKeys {
    fn is_excluded(&self, record: &Record) -> bool {
        self.keys.contains(&record.key)
    }
}
