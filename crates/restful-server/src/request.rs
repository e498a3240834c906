// File: src/request.rs
// Purpose: Pull the routing-relevant parts out of an HTTP request

use axum::http::{header, HeaderMap};
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use std::collections::HashMap;

/// Decodes a request path, keeping the raw path if it is not valid UTF-8
pub fn decode_path(path: &str) -> Cow<'_, str> {
    urlencoding::decode(path).unwrap_or(Cow::Borrowed(path))
}

/// Parses a request body into flat form fields
///
/// Understands `application/x-www-form-urlencoded` and JSON objects; any other
/// content type yields no fields.
pub fn parse_form(headers: &HeaderMap, body: &[u8]) -> HashMap<String, String> {
    let Some(content_type) = header_value(headers, header::CONTENT_TYPE.as_str()) else {
        return HashMap::new();
    };

    if content_type.contains("application/json") {
        match serde_json::from_slice::<JsonValue>(body) {
            Ok(JsonValue::Object(map)) => map
                .into_iter()
                .map(|(key, value)| match value {
                    JsonValue::String(s) => (key, s),
                    other => (key, other.to_string()),
                })
                .collect(),
            _ => HashMap::new(),
        }
    } else if content_type.contains("application/x-www-form-urlencoded") {
        let form_str = String::from_utf8_lossy(body);
        form_str
            .split('&')
            .filter_map(|pair| {
                pair.split_once('=').map(|(k, v)| (decode_form_part(k), decode_form_part(v)))
            })
            .collect()
    } else {
        HashMap::new()
    }
}

fn decode_form_part(part: &str) -> String {
    let part = part.replace('+', " ");
    urlencoding::decode(&part).unwrap_or_default().into_owned()
}

/// A header as text; missing or non-ASCII headers read as `None`
pub fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn test_urlencoded_form() {
        let form = parse_form(
            &headers("application/x-www-form-urlencoded"),
            b"_method=DELETE&title=Hello+World&note=a%26b",
        );
        assert_eq!(form.get("_method").map(String::as_str), Some("DELETE"));
        assert_eq!(form.get("title").map(String::as_str), Some("Hello World"));
        assert_eq!(form.get("note").map(String::as_str), Some("a&b"));
    }

    #[test]
    fn test_json_form() {
        let form = parse_form(
            &headers("application/json; charset=utf-8"),
            br#"{"_method": "PUT", "count": 3}"#,
        );
        assert_eq!(form.get("_method").map(String::as_str), Some("PUT"));
        assert_eq!(form.get("count").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_unknown_content_type() {
        assert!(parse_form(&headers("text/plain"), b"_method=PUT").is_empty());
        assert!(parse_form(&HeaderMap::new(), b"_method=PUT").is_empty());
    }

    #[test]
    fn test_invalid_json() {
        assert!(parse_form(&headers("application/json"), b"[1, 2]").is_empty());
        assert!(parse_form(&headers("application/json"), b"{oops").is_empty());
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/blogs/hello%20world"), "/blogs/hello world");
        assert_eq!(decode_path("/blogs/5"), "/blogs/5");
    }

    #[test]
    fn test_header_value() {
        let mut headers = HeaderMap::new();
        headers.insert("x-http-method-override", HeaderValue::from_static("PUT"));
        assert_eq!(header_value(&headers, "X-HTTP-Method-Override"), Some("PUT"));
        assert_eq!(header_value(&headers, "X-Other"), None);
    }
}
