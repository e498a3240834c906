// File: src/app.rs
// Purpose: axum application resolving every request against the route table

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    Router,
};
use restful_routing::{
    HttpMethod, MethodOverride, RouteMatch, RouteRequest, RoutingError, SharedRouteTable,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::request;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub table: SharedRouteTable,
    pub overrides: Arc<MethodOverride>,
}

impl AppState {
    pub fn new(table: SharedRouteTable, overrides: MethodOverride) -> Self {
        Self {
            table,
            overrides: Arc::new(overrides),
        }
    }
}

/// JSON body describing a resolved route
#[derive(Debug, Serialize)]
struct RouteResponse {
    controller: String,
    action: String,
    values: BTreeMap<String, String>,
    entry: usize,
}

impl From<RouteMatch> for RouteResponse {
    fn from(matched: RouteMatch) -> Self {
        Self {
            controller: matched.controller,
            action: matched.action,
            values: matched.values,
            entry: matched.entry_index,
        }
    }
}

/// Builds the router: every path falls through to the route table
pub fn router(state: AppState) -> Router {
    Router::new()
        .fallback(resolve_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn resolve_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match resolve(&state, &method, uri.path(), &headers, &body) {
        Ok(matched) => {
            debug!(controller = %matched.controller, action = %matched.action, "request resolved");
            Json(RouteResponse::from(matched)).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// Resolves a request; the override value is only read for POSTs
fn resolve(
    state: &AppState,
    method: &Method,
    path: &str,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<RouteMatch, RoutingError> {
    let verb: HttpMethod = method.as_str().parse()?;
    let path = request::decode_path(path);

    let form = if verb == HttpMethod::Post {
        request::parse_form(headers, body)
    } else {
        HashMap::new()
    };

    let overrides = &state.overrides;
    let override_value = overrides.pick(
        form.get(&overrides.field).map(String::as_str),
        request::header_value(headers, &overrides.header),
    );

    let route_request = RouteRequest::new(verb, &path).with_override(override_value);
    state.table.resolve(&route_request)
}

fn status_for(err: &RoutingError) -> StatusCode {
    if matches!(err, RoutingError::NoRouteMatched { .. }) {
        StatusCode::NOT_FOUND
    } else if err.is_method_mismatch() {
        StatusCode::METHOD_NOT_ALLOWED
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn error_response(err: RoutingError) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        warn!(error = %err, "routing failed");
    } else {
        debug!(error = %err, "request not routed");
    }

    let body = serde_json::json!({
        "error": err.to_string(),
        "status": status.as_u16(),
    });
    (status, Json(body)).into_response()
}
