//! Fallback record lookup.
//!
//! A key that is not stored as-is is retried under the modern prefix for the
//! legacy shorthands, then under the canonical collection for its basename's
//! identifier scheme. Candidates are tried strictly in order.

use std::sync::Arc;

use crate::observability::metrics;
use crate::store::{ObjectStore, Record};

const LEGACY_PREFIXES: [(&str, &str); 3] = [
    ("/a/", "/authors/"),
    ("/b/", "/books/"),
    ("/user/", "/people/"),
];

/// `OL<digits><kind>`, e.g. `OL12W` for kind `W`.
fn is_olid(name: &str, kind: char) -> bool {
    name.strip_prefix("OL")
        .and_then(|rest| rest.strip_suffix(kind))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Returns the record for `key`, following legacy prefixes and bare identifiers.
pub fn lookup(store: &dyn ObjectStore, key: &str) -> Option<Arc<Record>> {
    if let Some(record) = store.get(key) {
        return Some(record);
    }

    let mut key = key.to_string();
    for (legacy, modern) in LEGACY_PREFIXES {
        if let Some(rest) = key.strip_prefix(legacy) {
            key = format!("{modern}{rest}");
            if let Some(record) = store.get(&key) {
                return hit("legacy_prefix", record);
            }
        }
    }

    let basename = key.rsplit('/').next().unwrap_or_default();
    let candidates = [
        (basename.starts_with("ia:"), "/books/", "ia"),
        (is_olid(basename, 'W'), "/works/", "work_olid"),
        (is_olid(basename, 'M'), "/books/", "edition_olid"),
        (is_olid(basename, 'A'), "/authors/", "author_olid"),
    ];

    for (applies, collection, step) in candidates {
        if !applies {
            continue;
        }
        let candidate = format!("{collection}{basename}");
        if let Some(record) = store.get(&candidate) {
            return hit(step, record);
        }
    }

    None
}

fn hit(step: &'static str, record: Arc<Record>) -> Option<Arc<Record>> {
    tracing::debug!(step, key = %record.key, "Fallback lookup hit");
    metrics::record_fallback_hit(step);
    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn store() -> MemoryStore {
        MemoryStore::from_records([
            Record::new("/books/OL1M", "/type/edition"),
            Record::new("/authors/OL1A", "/type/author"),
            Record::new("/works/OL1W", "/type/work"),
            Record::new("/people/george", "/type/user"),
            Record::new("/books/ia:homer00", "/type/edition"),
        ])
    }

    #[test]
    fn test_is_olid() {
        assert!(is_olid("OL12W", 'W'));
        assert!(!is_olid("OLW", 'W'));
        assert!(!is_olid("OL1x2W", 'W'));
        assert!(!is_olid("OL12M", 'W'));
    }

    #[test]
    fn test_direct_hit() {
        let s = store();
        assert_eq!(lookup(&s, "/books/OL1M").unwrap().key, "/books/OL1M");
    }

    #[test]
    fn test_legacy_prefixes() {
        let s = store();
        assert_eq!(lookup(&s, "/a/OL1A").unwrap().key, "/authors/OL1A");
        assert_eq!(lookup(&s, "/b/OL1M").unwrap().key, "/books/OL1M");
        assert_eq!(lookup(&s, "/user/george").unwrap().key, "/people/george");
    }

    #[test]
    fn test_basename_schemes() {
        let s = store();
        assert_eq!(lookup(&s, "/anything/OL1W").unwrap().key, "/works/OL1W");
        assert_eq!(lookup(&s, "/works/OL1M").unwrap().key, "/books/OL1M");
        assert_eq!(lookup(&s, "/books/OL1A").unwrap().key, "/authors/OL1A");
        assert_eq!(
            lookup(&s, "/editions/ia:homer00").unwrap().key,
            "/books/ia:homer00"
        );
    }

    #[test]
    fn test_identifier_must_be_numeric() {
        let s = MemoryStore::from_records([Record::new("/works/OLxW", "/type/work")]);
        assert!(lookup(&s, "/books/OLxW").is_none());
    }

    #[test]
    fn test_not_found() {
        let s = store();
        assert!(lookup(&s, "/books/OL99M").is_none());
        assert!(lookup(&s, "/search").is_none());
        assert!(lookup(&s, "").is_none());
    }
}
