//! Route templates: `blogs/{blogId}/comments/{id}/{action}`
//!
//! Literal segments and `{name}` placeholders separated by `/`. The source
//! string is kept verbatim so composed templates stay bit-exact.

use std::collections::BTreeMap;
use std::fmt;

use crate::path;

/// One `/`-separated piece of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSegment {
    /// Text that must appear in the request path
    Literal(String),
    /// A named value bound from the request path
    Placeholder(String),
}

/// Classifies a template segment (pure function)
///
/// # Examples
///
/// ```
/// use restful_routing::route::template::{classify_segment, TemplateSegment};
///
/// assert_eq!(classify_segment("blogs"), TemplateSegment::Literal("blogs".into()));
/// assert_eq!(classify_segment("{id}"), TemplateSegment::Placeholder("id".into()));
/// assert_eq!(classify_segment("{}"), TemplateSegment::Literal("{}".into()));
/// ```
pub fn classify_segment(segment: &str) -> TemplateSegment {
    match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        Some(name) if !name.is_empty() => TemplateSegment::Placeholder(name.to_string()),
        _ => TemplateSegment::Literal(segment.to_string()),
    }
}

/// A parsed route template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    raw: String,
    segments: Vec<TemplateSegment>,
}

impl RouteTemplate {
    /// Parses a template string. Never fails: anything that is not a
    /// `{name}` placeholder is taken as literal text.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = path::segments(&raw).map(classify_segment).collect();
        Self { raw, segments }
    }

    /// The template exactly as it was composed
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[TemplateSegment] {
        &self.segments
    }

    /// Placeholder names in template order
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            TemplateSegment::Placeholder(name) => Some(name.as_str()),
            TemplateSegment::Literal(_) => None,
        })
    }

    pub fn has_placeholder(&self, name: &str) -> bool {
        self.placeholders().any(|p| p == name)
    }

    /// Matches a request path, binding placeholders
    ///
    /// Trailing placeholders that have a default may be left out of the path,
    /// so `blogs/{id}/{action}` with an `action` default matches `/blogs/5`.
    /// Defaults are not copied into the result; only bound values are.
    ///
    /// # Examples
    ///
    /// ```
    /// use restful_routing::route::RouteTemplate;
    /// use std::collections::BTreeMap;
    ///
    /// let template = RouteTemplate::parse("blogs/{id}/{action}");
    /// let defaults = BTreeMap::from([("action".to_string(), "show".to_string())]);
    ///
    /// let values = template.match_path("/blogs/5/edit", &defaults, true).unwrap();
    /// assert_eq!(values.get("action").map(String::as_str), Some("edit"));
    ///
    /// let values = template.match_path("/blogs/5", &defaults, true).unwrap();
    /// assert_eq!(values.get("id").map(String::as_str), Some("5"));
    /// assert!(values.get("action").is_none());
    ///
    /// assert!(template.match_path("/blogs", &defaults, true).is_none());
    /// ```
    pub fn match_path(
        &self,
        path: &str,
        defaults: &BTreeMap<String, String>,
        case_insensitive: bool,
    ) -> Option<BTreeMap<String, String>> {
        let path_segments: Vec<&str> = path::segments(path).collect();

        fn match_segments(
            template: &[TemplateSegment],
            path: &[&str],
            defaults: &BTreeMap<String, String>,
            mut values: BTreeMap<String, String>,
            case_insensitive: bool,
        ) -> Option<BTreeMap<String, String>> {
            match (template.split_first(), path.split_first()) {
                (None, None) => Some(values),
                (None, Some(_)) => None,
                // Path exhausted: only defaulted placeholders may remain
                (Some((TemplateSegment::Placeholder(name), rest)), None) => {
                    if defaults.contains_key(name) {
                        match_segments(rest, path, defaults, values, case_insensitive)
                    } else {
                        None
                    }
                }
                (Some((TemplateSegment::Literal(_), _)), None) => None,
                (Some((TemplateSegment::Literal(literal), rest)), Some((segment, path_rest))) => {
                    let matches = if case_insensitive {
                        literal.eq_ignore_ascii_case(segment)
                    } else {
                        literal.as_str() == *segment
                    };
                    if !matches {
                        return None;
                    }
                    match_segments(rest, path_rest, defaults, values, case_insensitive)
                }
                (Some((TemplateSegment::Placeholder(name), rest)), Some((segment, path_rest))) => {
                    values.insert(name.clone(), segment.to_string());
                    match_segments(rest, path_rest, defaults, values, case_insensitive)
                }
            }
        }

        match_segments(
            &self.segments,
            &path_segments,
            defaults,
            BTreeMap::new(),
            case_insensitive,
        )
    }

    /// Builds a `/`-rooted URL from route values
    ///
    /// Every placeholder needs a value, either supplied or defaulted.
    /// Trailing placeholders whose value equals their default (ignoring case)
    /// are dropped, the way `/blogs/5` is generated for the `show` action.
    ///
    /// # Examples
    ///
    /// ```
    /// use restful_routing::route::RouteTemplate;
    /// use std::collections::BTreeMap;
    ///
    /// let template = RouteTemplate::parse("blogs/{blogId}/comments/{id}/{action}");
    /// let defaults = BTreeMap::from([("action".to_string(), "show".to_string())]);
    /// let values = BTreeMap::from([
    ///     ("blogId".to_string(), "1".to_string()),
    ///     ("id".to_string(), "9".to_string()),
    ///     ("action".to_string(), "edit".to_string()),
    /// ]);
    ///
    /// assert_eq!(template.generate(&values, &defaults).unwrap(), "/blogs/1/comments/9/edit");
    /// ```
    pub fn generate(
        &self,
        values: &BTreeMap<String, String>,
        defaults: &BTreeMap<String, String>,
    ) -> Option<String> {
        let resolved: Vec<(String, bool)> = self
            .segments
            .iter()
            .map(|segment| match segment {
                TemplateSegment::Literal(literal) => Some((literal.clone(), false)),
                TemplateSegment::Placeholder(name) => {
                    let default = defaults.get(name);
                    values
                        .get(name)
                        .or(default)
                        .map(|value| {
                            let is_default =
                                default.map_or(false, |d| d.eq_ignore_ascii_case(value));
                            (value.clone(), is_default)
                        })
                }
            })
            .collect::<Option<Vec<_>>>()?;

        let keep = resolved
            .iter()
            .rposition(|(_, is_default)| !is_default)
            .map(|idx| idx + 1)
            .unwrap_or(0);

        let url = resolved[..keep]
            .iter()
            .map(|(segment, _)| segment.as_str())
            .collect::<Vec<_>>()
            .join("/");

        Some(format!("/{}", url))
    }
}

impl fmt::Display for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
