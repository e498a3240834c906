// File: src/action.rs
// Purpose: HTTP verbs and the conventional controller actions

use std::fmt;
use std::str::FromStr;

use crate::RoutingError;

/// HTTP methods a route can be constrained to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// Upper-case wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Check if a raw method string names this verb
    pub fn matches_method(&self, http_method: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(http_method.trim())
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
            HttpMethod::Head,
            HttpMethod::Options,
        ]
        .into_iter()
        .find(|method| method.matches_method(s))
        .ok_or_else(|| RoutingError::UnsupportedMethod(s.to_string()))
    }
}

/// The conventional actions a resource controller exposes
///
/// `Delete` is the confirmation page reached with `GET blogs/{id}/delete`;
/// `Destroy` is the one that removes the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Index,
    New,
    Create,
    Show,
    Edit,
    Delete,
    Update,
    Destroy,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Index,
        Action::New,
        Action::Create,
        Action::Show,
        Action::Edit,
        Action::Delete,
        Action::Update,
        Action::Destroy,
    ];

    /// Route value written into the `action` key
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Index => "index",
            Action::New => "new",
            Action::Create => "create",
            Action::Show => "show",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Update => "update",
            Action::Destroy => "destroy",
        }
    }

    /// Case-insensitive lookup of an action route value
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| RoutingError::UnknownAction(s.to_string()))
    }
}
