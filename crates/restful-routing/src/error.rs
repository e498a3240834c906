// File: src/error.rs
// Purpose: Dispatch-time routing errors

use thiserror::Error;

use crate::HttpMethod;

/// Errors raised while resolving a request against a route table
///
/// Registration never fails; these only surface at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// No entry in the table accepted the request
    #[error("no route matched {method} {path}")]
    NoRouteMatched { method: HttpMethod, path: String },

    /// A POST reached a method-override route without a usable `PUT`/`DELETE` value
    #[error("unrecognized method override: {}", .0.as_deref().unwrap_or("<missing>"))]
    UnrecognizedOverride(Option<String>),

    /// The request verb is not one the router knows
    #[error("unsupported HTTP method `{0}`")]
    UnsupportedMethod(String),

    /// An action route value that names none of the conventional actions
    #[error("unknown action `{0}`")]
    UnknownAction(String),

    /// An action constraint could not be compiled
    #[error("invalid action pattern `{pattern}`: {message}")]
    InvalidActionPattern { pattern: String, message: String },
}

impl RoutingError {
    /// Whether the error means "the path exists but the verb does not fit"
    pub fn is_method_mismatch(&self) -> bool {
        matches!(
            self,
            RoutingError::UnrecognizedOverride(_) | RoutingError::UnsupportedMethod(_)
        )
    }
}
