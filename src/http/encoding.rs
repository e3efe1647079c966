//! Percent-encoding of URL paths.
//!
//! Paths are handled decoded inside the rewriter and encoded exactly once
//! before they are compared with the request or written into a `Location`
//! header. A literal `%` is always written as `%25`, so
//! `decode_path(&encode_path(p)) == p` for every decoded path.

/// Percent-encodes every `/`-separated segment of `path`.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

/// Decodes a raw request path. Invalid UTF-8 is replaced, never rejected.
pub fn decode_path(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path() {
        assert_eq!(
            encode_path("/books/OL10M/Вас_ил/edit"),
            "/books/OL10M/%D0%92%D0%B0%D1%81_%D0%B8%D0%BB/edit"
        );
        assert_eq!(encode_path(""), "");
        assert_eq!(encode_path("/"), "/");
        assert_eq!(
            encode_path("/books/OL11M/进入该海域"),
            "/books/OL11M/%E8%BF%9B%E5%85%A5%E8%AF%A5%E6%B5%B7%E5%9F%9F"
        );
    }

    #[test]
    fn test_percent_is_always_escaped() {
        assert_eq!(encode_path("/100%/x%2"), "/100%25/x%252");
        assert_eq!(encode_path("/search/%41"), "/search/%2541");
    }

    #[test]
    fn test_reserved_characters_in_segments() {
        assert_eq!(encode_path("/books/ia:foo"), "/books/ia%3Afoo");
        assert_eq!(encode_path("/a+b"), "/a%2Bb");
        assert_eq!(encode_path("/a?b#c"), "/a%3Fb%23c");
    }

    #[test]
    fn test_decode_then_encode_round_trips() {
        for raw in [
            "/search/%2541",
            "/books/OL1M/Dune/x%2541",
            "/l/a%3Fb",
            "/user/a%23b",
            "/books/OL10M/%D0%92%D0%B0%D1%81_%D0%B8%D0%BB",
        ] {
            assert_eq!(encode_path(&decode_path(raw)), raw);
        }
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(
            decode_path("/books/OL10M/%D0%92%D0%B0%D1%81_%D0%B8%D0%BB"),
            "/books/OL10M/Вас_ил"
        );
        assert_eq!(decode_path("/plain"), "/plain");
        assert_eq!(decode_path("/bad/%FF"), "/bad/\u{FFFD}");
    }
}
