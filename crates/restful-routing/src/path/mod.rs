//! Path utilities for route prefixes and request paths
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;

/// Turns a configured path prefix into the base path routes are built on
///
/// Trailing separators are stripped and a single `/` appended, so the result
/// is either empty (root-level resources) or ends in exactly one `/`.
/// Nothing else about the prefix is checked.
///
/// # Examples
///
/// ```
/// use restful_routing::path::base_path;
///
/// assert_eq!(base_path(""), "");
/// assert_eq!(base_path("admin"), "admin/");
/// assert_eq!(base_path("admin/"), "admin/");
/// assert_eq!(base_path("blogs/{blogId}"), "blogs/{blogId}/");
/// ```
pub fn base_path(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}

/// Validates if a request path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
pub fn is_valid_path(path: &str) -> bool {
    if !path.starts_with('/') || path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Normalize a request path to canonical form
///
/// Returns `Cow::Borrowed` when the input is already canonical.
///
/// # Examples
///
/// ```
/// use restful_routing::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/blogs/5"), Cow::Borrowed("/blogs/5")));
/// assert_eq!(normalize_path("blogs/5/"), "/blogs/5");
/// assert_eq!(normalize_path("\\blogs\\5"), "/blogs/5");
/// assert_eq!(normalize_path("//blogs///new"), "/blogs/new");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let normalized = path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// Splits a path into its non-empty segments
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
