// File: src/method_override.rs
// Purpose: Translate form-posted method overrides into member actions

use tracing::trace;

use crate::{Action, RoutingError};

/// Default form field carrying the intended verb
pub const DEFAULT_FIELD: &str = "_method";

/// Default header carrying the intended verb
pub const DEFAULT_HEADER: &str = "X-HTTP-Method-Override";

/// Decides which action a POST to `{resource}/{id}` really meant
///
/// HTML forms can only GET or POST, so edit and delete forms post to the
/// member URL with an override value of `PUT` or `DELETE`.
///
/// Stateless: safe to call from any number of request tasks at once.
///
/// # Examples
///
/// ```
/// use restful_routing::{method_override, Action, RoutingError};
///
/// assert_eq!(method_override::translate(Some("put")), Ok(Action::Update));
/// assert_eq!(method_override::translate(Some("DELETE")), Ok(Action::Destroy));
/// assert!(matches!(
///     method_override::translate(Some("PATCH")),
///     Err(RoutingError::UnrecognizedOverride(_))
/// ));
/// ```
pub fn translate(value: Option<&str>) -> Result<Action, RoutingError> {
    let verb = value.map(str::trim);
    trace!(override_value = ?verb, "translating method override");

    match verb {
        Some(v) if v.eq_ignore_ascii_case("PUT") => Ok(Action::Update),
        Some(v) if v.eq_ignore_ascii_case("DELETE") => Ok(Action::Destroy),
        other => Err(RoutingError::UnrecognizedOverride(other.map(str::to_string))),
    }
}

/// Where a request carries its override value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodOverride {
    /// Form field name, `_method` by default
    pub field: String,
    /// Header name, `X-HTTP-Method-Override` by default
    pub header: String,
}

impl MethodOverride {
    pub fn new(field: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header: header.into(),
        }
    }

    /// Chooses the override value: the form field wins over the header
    pub fn pick<'a>(
        &self,
        form_value: Option<&'a str>,
        header_value: Option<&'a str>,
    ) -> Option<&'a str> {
        form_value
            .filter(|v| !v.trim().is_empty())
            .or(header_value)
    }

    /// Picks the override value and translates it
    pub fn resolve(
        &self,
        form_value: Option<&str>,
        header_value: Option<&str>,
    ) -> Result<Action, RoutingError> {
        translate(self.pick(form_value, header_value))
    }
}

impl Default for MethodOverride {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD, DEFAULT_HEADER)
    }
}
