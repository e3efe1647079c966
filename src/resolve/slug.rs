//! Slug derivation from record titles.

use once_cell::sync::Lazy;
use regex::Regex;

/// Longest sanitized title kept, in characters.
const MAX_SLUG_CHARS: usize = 100;

/// Runs of characters RFC 2396 considers reserved, delimiters, unwise, or whitespace.
static UNSAFE_RUN: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r#"[;/?:@&=+$,<>#%"{}|\\^\[\]` \n\r]+"#));

/// Replaces unsafe characters with underscores.
pub fn urlsafe(text: &str) -> String {
    let replaced = match UNSAFE_RUN.as_ref() {
        Ok(regex) => regex.replace_all(text, "_"),
        Err(err) => {
            tracing::error!("Slug regex failed to compile: {}", err);
            return text.to_string();
        }
    };
    replaced
        .trim_matches('_')
        .chars()
        .take(MAX_SLUG_CHARS)
        .collect()
}

/// Slug for `title`, falling back to `default_title` when the title is
/// missing, blank, or sanitizes to nothing.
///
/// The slug is returned decoded; callers percent-encode the whole path once.
pub fn slugify(title: Option<&str>, default_title: &str) -> String {
    title
        .map(|t| urlsafe(t.trim()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| urlsafe(default_title.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlsafe_collapses_runs() {
        assert_eq!(urlsafe("The Lord of the Rings"), "The_Lord_of_the_Rings");
        assert_eq!(urlsafe("What? Why: How!"), "What_Why_How!");
        assert_eq!(urlsafe("  [draft] "), "draft");
        assert_eq!(urlsafe("a/b\\c"), "a_b_c");
    }

    #[test]
    fn test_urlsafe_truncates_by_characters() {
        let long = "ж".repeat(150);
        assert_eq!(urlsafe(&long).chars().count(), 100);
    }

    #[test]
    fn test_slug_has_no_spaces_or_percent() {
        let slug = slugify(Some("100% Pure\tJoy + more"), "untitled");
        assert_eq!(slug, "100_Pure\tJoy_more");
        assert!(!slug.contains(' ') && !slug.contains('%'));
    }

    #[test]
    fn test_slugify_defaults() {
        assert_eq!(slugify(Some("Вас ил"), "untitled"), "Вас_ил");
        assert_eq!(slugify(None, "untitled"), "untitled");
        assert_eq!(slugify(Some(""), "noname"), "noname");
        assert_eq!(slugify(Some("   "), "noname"), "noname");
        assert_eq!(slugify(Some("???"), "unnamed"), "unnamed");
    }
}
