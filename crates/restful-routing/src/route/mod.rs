//! Route entries: the unit a route table is made of
//!
//! A [`RouteEntry`] is a template, its default route values, the constraints a
//! request must satisfy and how a match is handed off. Entries are built once
//! during registration and never change afterwards.

pub mod template;

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{HttpMethod, RoutingError};

pub use template::{classify_segment, RouteTemplate, TemplateSegment};

/// Route value key naming the controller
pub const CONTROLLER_KEY: &str = "controller";
/// Route value key naming the action
pub const ACTION_KEY: &str = "action";
/// Route value key for a member id
pub const ID_KEY: &str = "id";

/// Actions reachable through the `{id}/{action}` member route
pub const MEMBER_ACTIONS: &str = "show|edit|delete";

static MEMBER_ACTION_PATTERN: Lazy<ActionPattern> = Lazy::new(|| {
    ActionPattern::new(MEMBER_ACTIONS).expect("member action alternation is a valid regex")
});

/// An alternation of action names, e.g. `show|edit|delete`
///
/// The whole action value must match one alternative, ignoring case.
///
/// # Examples
///
/// ```
/// use restful_routing::ActionPattern;
///
/// let pattern = ActionPattern::new("show|edit|delete").unwrap();
/// assert!(pattern.accepts("edit"));
/// assert!(pattern.accepts("SHOW"));
/// assert!(!pattern.accepts("destroy"));
/// assert!(!pattern.accepts("showcase"));
/// ```
#[derive(Debug, Clone)]
pub struct ActionPattern {
    source: String,
    regex: Regex,
}

impl ActionPattern {
    pub fn new(pattern: &str) -> Result<Self, RoutingError> {
        Regex::new(&format!("^(?i:{})$", pattern))
            .map(|regex| Self {
                source: pattern.to_string(),
                regex,
            })
            .map_err(|e| RoutingError::InvalidActionPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    /// The `show|edit|delete` pattern used by the member route
    pub fn member_actions() -> Self {
        MEMBER_ACTION_PATTERN.clone()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn accepts(&self, action: &str) -> bool {
        self.regex.is_match(action)
    }
}

impl PartialEq for ActionPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for ActionPattern {}

/// Conditions a request must meet besides the template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteConstraints {
    /// Required HTTP verb; `None` accepts any verb
    pub method: Option<HttpMethod>,
    /// Allowed values of the `action` route value
    pub action: Option<ActionPattern>,
}

impl RouteConstraints {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn accepts_method(&self, method: HttpMethod) -> bool {
        self.method.map_or(true, |required| required == method)
    }

    /// Checks the action constraint against resolved route values
    pub fn accepts_values(&self, values: &BTreeMap<String, String>) -> bool {
        match &self.action {
            Some(pattern) => values
                .get(ACTION_KEY)
                .map_or(false, |action| pattern.accepts(action)),
            None => true,
        }
    }
}

/// What the dispatcher does with a matched entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// Invoke the action named by the route values
    Action,
    /// Ask the method-override translator which action was meant
    MethodOverride,
}

/// A single registered route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub template: RouteTemplate,
    pub defaults: BTreeMap<String, String>,
    pub constraints: RouteConstraints,
    pub handler: HandlerKind,
}

impl RouteEntry {
    /// Creates an unconstrained action route for a template
    ///
    /// # Examples
    ///
    /// ```
    /// use restful_routing::{HandlerKind, HttpMethod, RouteEntry};
    ///
    /// let entry = RouteEntry::new("blogs")
    ///     .with_default("controller", "blogs")
    ///     .with_default("action", "index")
    ///     .with_method(HttpMethod::Get);
    ///
    /// assert_eq!(entry.template.as_str(), "blogs");
    /// assert_eq!(entry.controller(), Some("blogs"));
    /// assert_eq!(entry.handler, HandlerKind::Action);
    /// ```
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: RouteTemplate::parse(template),
            defaults: BTreeMap::new(),
            constraints: RouteConstraints::none(),
            handler: HandlerKind::Action,
        }
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.constraints.method = Some(method);
        self
    }

    pub fn with_action_constraint(mut self, pattern: ActionPattern) -> Self {
        self.constraints.action = Some(pattern);
        self
    }

    pub fn with_handler(mut self, handler: HandlerKind) -> Self {
        self.handler = handler;
        self
    }

    /// Verb constraint, if any
    pub fn method(&self) -> Option<HttpMethod> {
        self.constraints.method
    }

    pub fn controller(&self) -> Option<&str> {
        self.defaults.get(CONTROLLER_KEY).map(String::as_str)
    }

    /// Default action; the override route has none
    pub fn action(&self) -> Option<&str> {
        self.defaults.get(ACTION_KEY).map(String::as_str)
    }

    /// Matches a request against this entry
    ///
    /// Returns every route value (defaults overlaid by the placeholders bound
    /// from the path) when the verb, the template and the action constraint
    /// all accept the request.
    pub fn match_request(
        &self,
        method: HttpMethod,
        path: &str,
        case_insensitive: bool,
    ) -> Option<BTreeMap<String, String>> {
        if !self.constraints.accepts_method(method) {
            return None;
        }

        let bound = self
            .template
            .match_path(path, &self.defaults, case_insensitive)?;

        let mut values = self.defaults.clone();
        values.extend(bound);

        self.constraints.accepts_values(&values).then_some(values)
    }

    /// Whether this entry can produce a URL for the given action
    pub fn serves_action(&self, action: &str) -> bool {
        match self.action() {
            Some(default) if default.eq_ignore_ascii_case(action) => true,
            _ => {
                self.template.has_placeholder(ACTION_KEY)
                    && self
                        .constraints
                        .action
                        .as_ref()
                        .map_or(true, |pattern| pattern.accepts(action))
            }
        }
    }

    /// Generates a URL for this entry from route values
    pub fn generate_url(&self, values: &BTreeMap<String, String>) -> Option<String> {
        self.template.generate(values, &self.defaults)
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = self.method().map_or("*", |m| m.as_str());
        let controller = self.controller().unwrap_or("?");
        let target = match self.handler {
            HandlerKind::MethodOverride => "(method override)".to_string(),
            HandlerKind::Action => self.action().unwrap_or("?").to_string(),
        };

        write!(f, "{:<7} {} -> {}#{}", verb, self.template, controller, target)?;
        if let Some(pattern) = &self.constraints.action {
            write!(f, " [action={}]", pattern.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_route() -> RouteEntry {
        RouteEntry::new("blogs/{id}/{action}")
            .with_default(CONTROLLER_KEY, "blogs")
            .with_default(ACTION_KEY, "show")
            .with_method(HttpMethod::Get)
            .with_action_constraint(ActionPattern::member_actions())
    }

    #[test]
    fn test_member_route_binds_action() {
        let values = member_route()
            .match_request(HttpMethod::Get, "/blogs/5/edit", true)
            .unwrap();
        assert_eq!(values.get("action").unwrap(), "edit");
        assert_eq!(values.get("id").unwrap(), "5");
        assert_eq!(values.get("controller").unwrap(), "blogs");
    }

    #[test]
    fn test_member_route_defaults_to_show() {
        let values = member_route()
            .match_request(HttpMethod::Get, "/blogs/5", true)
            .unwrap();
        assert_eq!(values.get("action").unwrap(), "show");
    }

    #[test]
    fn test_member_route_rejects_other_actions() {
        assert!(member_route()
            .match_request(HttpMethod::Get, "/blogs/5/destroy", true)
            .is_none());
    }

    #[test]
    fn test_member_route_rejects_other_verbs() {
        assert!(member_route()
            .match_request(HttpMethod::Post, "/blogs/5/edit", true)
            .is_none());
    }

    #[test]
    fn test_unconstrained_verb() {
        let entry = RouteEntry::new("blogs/new").with_default(ACTION_KEY, "new");
        assert!(entry.match_request(HttpMethod::Get, "/blogs/new", true).is_some());
        assert!(entry.match_request(HttpMethod::Post, "/blogs/new", true).is_some());
    }

    #[test]
    fn test_invalid_action_pattern() {
        let err = ActionPattern::new("show|(edit").unwrap_err();
        assert!(matches!(err, RoutingError::InvalidActionPattern { .. }));
    }

    #[test]
    fn test_serves_action() {
        let route = member_route();
        assert!(route.serves_action("show"));
        assert!(route.serves_action("delete"));
        assert!(!route.serves_action("update"));

        let index = RouteEntry::new("blogs").with_default(ACTION_KEY, "index");
        assert!(index.serves_action("index"));
        assert!(!index.serves_action("show"));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            member_route().to_string(),
            "GET     blogs/{id}/{action} -> blogs#show [action=show|edit|delete]"
        );

        let override_route = RouteEntry::new("blogs/{id}")
            .with_default(CONTROLLER_KEY, "blogs")
            .with_method(HttpMethod::Post)
            .with_handler(HandlerKind::MethodOverride);
        assert_eq!(
            override_route.to_string(),
            "POST    blogs/{id} -> blogs#(method override)"
        );
    }
}
