//! URL rule table.
//!
//! # Responsibilities
//! - Define the closed set of record types a rule can expect
//! - Compile rule patterns once at startup
//! - Reject tables that are ambiguous or malformed
//!
//! # Design Decisions
//! - Rule order is significant: the first matching rule wins, so more
//!   specific patterns must come before generic ones
//! - Patterns are anchored at the start of the path but not at the end
//! - Duplicate patterns are a startup error, never silently shadowed

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Record types that readable URLs are generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum RecordType {
    Edition,
    Author,
    Work,
    List,
}

impl RecordType {
    /// The type key as stored on records (e.g. `/type/edition`).
    pub fn as_key(&self) -> &'static str {
        match self {
            RecordType::Edition => "/type/edition",
            RecordType::Author => "/type/author",
            RecordType::Work => "/type/work",
            RecordType::List => "/type/list",
        }
    }
}

impl From<RecordType> for &'static str {
    fn from(value: RecordType) -> Self {
        value.as_key()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for RecordType {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "/type/edition" => Ok(RecordType::Edition),
            "/type/author" => Ok(RecordType::Author),
            "/type/work" => Ok(RecordType::Work),
            "/type/list" => Ok(RecordType::List),
            other => Err(RuleError::UnknownRecordType(other.to_string())),
        }
    }
}

/// Errors raised while building a rule table.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("pattern `{0}` is declared more than once")]
    DuplicatePattern(String),

    #[error("rule `{0}` has an empty title field")]
    EmptyTitleField(String),

    #[error("rule `{0}` has an empty default title")]
    EmptyDefaultTitle(String),

    #[error("unknown record type `{0}`")]
    UnknownRecordType(String),
}

/// A single rule as declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub pattern: String,
    pub record_type: RecordType,
    pub title_field: String,
    pub default_title: String,
}

impl Rule {
    pub fn new(
        pattern: impl Into<String>,
        record_type: RecordType,
        title_field: impl Into<String>,
        default_title: impl Into<String>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            record_type,
            title_field: title_field.into(),
            default_title: default_title.into(),
        }
    }
}

/// A rule together with its anchored regex.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub rule: Rule,
    regex: Regex,
}

impl CompiledRule {
    /// Returns the prefix of `path` matched by this rule, if any.
    pub fn match_prefix<'p>(&self, path: &'p str) -> Option<&'p str> {
        self.regex.find(path).map(|m| m.as_str())
    }
}

/// Ordered, immutable list of compiled rules.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<CompiledRule>,
}

impl RuleTable {
    /// Compile and validate `rules`, keeping their order.
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleError> {
        let mut seen = HashSet::new();
        let mut compiled = Vec::with_capacity(rules.len());

        for rule in rules {
            if !seen.insert(rule.pattern.clone()) {
                return Err(RuleError::DuplicatePattern(rule.pattern));
            }
            if rule.title_field.trim().is_empty() {
                return Err(RuleError::EmptyTitleField(rule.pattern));
            }
            if rule.default_title.trim().is_empty() {
                return Err(RuleError::EmptyDefaultTitle(rule.pattern));
            }

            let regex = Regex::new(&format!("^(?:{})", rule.pattern)).map_err(|source| {
                RuleError::InvalidPattern {
                    pattern: rule.pattern.clone(),
                    source,
                }
            })?;
            compiled.push(CompiledRule { rule, regex });
        }

        Ok(Self { rules: compiled })
    }

    /// The table compiled into the site.
    pub fn builtin() -> Result<Self, RuleError> {
        Self::new(default_rules())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter()
    }
}

/// Editions, IA-identifier editions, authors, works and lists, most specific first.
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(r"/\w+/OL\d+M", RecordType::Edition, "title", "untitled"),
        Rule::new(r"/\w+/ia:[a-zA-Z0-9_\.-]+", RecordType::Edition, "title", "untitled"),
        Rule::new(r"/\w+/OL\d+A", RecordType::Author, "name", "noname"),
        Rule::new(r"/\w+/OL\d+W", RecordType::Work, "title", "untitled"),
        Rule::new(r"/[/\w\-]+/OL\d+L", RecordType::List, "name", "unnamed"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_compiles_in_order() {
        let table = RuleTable::builtin().unwrap();
        let types: Vec<_> = table.iter().map(|r| r.rule.record_type).collect();
        assert_eq!(
            types,
            vec![
                RecordType::Edition,
                RecordType::Edition,
                RecordType::Author,
                RecordType::Work,
                RecordType::List,
            ]
        );
    }

    #[test]
    fn test_duplicate_pattern_rejected() {
        let rules = vec![
            Rule::new(r"/\w+/OL\d+M", RecordType::Edition, "title", "untitled"),
            Rule::new(r"/\w+/OL\d+M", RecordType::Work, "title", "untitled"),
        ];
        assert!(matches!(
            RuleTable::new(rules),
            Err(RuleError::DuplicatePattern(_))
        ));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let rules = vec![Rule::new(r"/books/(", RecordType::Edition, "title", "untitled")];
        assert!(matches!(
            RuleTable::new(rules),
            Err(RuleError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_empty_fields_rejected() {
        let rules = vec![Rule::new(r"/x/OL\d+M", RecordType::Edition, " ", "untitled")];
        assert!(matches!(
            RuleTable::new(rules),
            Err(RuleError::EmptyTitleField(_))
        ));

        let rules = vec![Rule::new(r"/x/OL\d+M", RecordType::Edition, "title", "")];
        assert!(matches!(
            RuleTable::new(rules),
            Err(RuleError::EmptyDefaultTitle(_))
        ));
    }

    #[test]
    fn test_pattern_is_anchored_at_start() {
        let table = RuleTable::builtin().unwrap();
        let edition = table.iter().next().unwrap();
        assert_eq!(edition.match_prefix("/books/OL1M/edit"), Some("/books/OL1M"));
        assert_eq!(edition.match_prefix("/x/books/OL1M"), None);
    }

    #[test]
    fn test_record_type_round_trips_through_key() {
        for ty in [
            RecordType::Edition,
            RecordType::Author,
            RecordType::Work,
            RecordType::List,
        ] {
            assert_eq!(ty.as_key().parse::<RecordType>().unwrap(), ty);
        }
        assert!("/type/redirect".parse::<RecordType>().is_err());
    }
}
