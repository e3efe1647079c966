//! Responses produced by the rewrite layer itself.
//!
//! # Responsibilities
//! - Build redirects with a percent-encoded `Location`
//! - Render the not-found page used for excluded records

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};

/// Redirect to `location`, which must already be percent-encoded.
pub fn redirect(status: StatusCode, location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => {
            let mut response = Response::new(Body::empty());
            *response.status_mut() = status;
            response.headers_mut().insert(header::LOCATION, value);
            response
        }
        Err(_) => {
            tracing::warn!(location = %location, "Redirect target is not a valid header value");
            (StatusCode::BAD_REQUEST, "Invalid redirect target").into_response()
        }
    }
}

/// 404 page naming `path`.
pub fn not_found(path: &str) -> Response {
    let body = format!(
        "<!doctype html>\n<html><head><title>Not Found</title></head>\
         <body><h1>Not Found</h1><p>{} was not found.</p></body></html>\n",
        escape_html(path)
    );
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_sets_location() {
        let res = redirect(StatusCode::MOVED_PERMANENTLY, "/books/OL1M/Title?x=1");
        assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(res.headers()[header::LOCATION], "/books/OL1M/Title?x=1");
    }

    #[test]
    fn test_invalid_location_rejected() {
        let res = redirect(StatusCode::SEE_OTHER, "/bad\nheader");
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_escapes_path() {
        let res = not_found("/books/<script>");
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(escape_html("/books/<x>&\""), "/books/&lt;x&gt;&amp;&quot;");
    }
}
