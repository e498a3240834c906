// File: src/table.rs
// Purpose: Ordered route table and first-match-wins request resolution

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::path::normalize_path;
use crate::route::{HandlerKind, RouteEntry, ACTION_KEY, CONTROLLER_KEY, ID_KEY};
use crate::{method_override, HttpMethod, RoutingError};

/// A route table after registration: shared read-only between request tasks
pub type SharedRouteTable = Arc<RouteTable>;

/// Append-only, ordered collection of route entries
///
/// Order is the tie-break between entries that accept the same request: the
/// first one wins. Entries are never removed or reordered.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    case_insensitive: bool,
}

/// The parts of a request the router looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequest<'a> {
    pub method: HttpMethod,
    pub path: &'a str,
    /// Value of the override field or header, if the request carried one
    pub method_override: Option<&'a str>,
}

impl<'a> RouteRequest<'a> {
    pub fn new(method: HttpMethod, path: &'a str) -> Self {
        Self {
            method,
            path,
            method_override: None,
        }
    }

    pub fn with_override(mut self, value: Option<&'a str>) -> Self {
        self.method_override = value;
        self
    }
}

/// Result of resolving a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Position of the matched entry in the table
    pub entry_index: usize,
    pub controller: String,
    pub action: String,
    /// All route values: defaults, bound placeholders, controller and action
    pub values: BTreeMap<String, String>,
}

impl RouteMatch {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The `{id}` value of member routes
    pub fn id(&self) -> Option<&str> {
        self.get(ID_KEY)
    }
}

impl RouteTable {
    /// Creates an empty table matching literal segments case-insensitively
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            case_insensitive: true,
        }
    }

    /// Configures case sensitivity of literal segments (functional builder)
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Appends an entry at the end of the table
    pub fn add(&mut self, entry: RouteEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }

    /// Ends registration
    ///
    /// The returned handle can be cloned into every request task; nothing can
    /// append to the table any more.
    pub fn freeze(self) -> SharedRouteTable {
        debug!(routes = self.entries.len(), "route table frozen");
        Arc::new(self)
    }

    /// Resolves a request to a controller action, first match wins
    ///
    /// A matching method-override entry always answers: either with the
    /// translated action or with [`RoutingError::UnrecognizedOverride`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use restful_routing::{EnglishInflector, HttpMethod, ResourcesMapper, RouteRequest, RouteTable};
    ///
    /// let mut table = RouteTable::new();
    /// ResourcesMapper::new(&mut table, Arc::new(EnglishInflector::new())).map("blogs");
    ///
    /// let request = RouteRequest::new(HttpMethod::Post, "/blogs/5").with_override(Some("DELETE"));
    /// let matched = table.resolve(&request).unwrap();
    /// assert_eq!(matched.action, "destroy");
    /// assert_eq!(matched.id(), Some("5"));
    /// ```
    pub fn resolve(&self, request: &RouteRequest<'_>) -> Result<RouteMatch, RoutingError> {
        let path = normalize_path(request.path);

        let found = self.entries.iter().enumerate().find_map(|(idx, entry)| {
            entry
                .match_request(request.method, &path, self.case_insensitive)
                .map(|values| (idx, entry, values))
        });

        let Some((entry_index, entry, mut values)) = found else {
            debug!(method = %request.method, path = %path, "no route matched");
            return Err(RoutingError::NoRouteMatched {
                method: request.method,
                path: path.into_owned(),
            });
        };

        if entry.handler == HandlerKind::MethodOverride {
            let action = method_override::translate(request.method_override)?;
            values.insert(ACTION_KEY.to_string(), action.as_str().to_string());
        }

        let controller = values.get(CONTROLLER_KEY).cloned().unwrap_or_default();
        let action = values.get(ACTION_KEY).cloned().unwrap_or_default();
        trace!(entry_index, %controller, %action, "route matched");

        Ok(RouteMatch {
            entry_index,
            controller,
            action,
            values,
        })
    }

    /// Generates a URL for a controller action
    ///
    /// Picks the first entry of the controller that serves the action and can
    /// be filled from `values`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use std::sync::Arc;
    /// use restful_routing::{EnglishInflector, ResourcesMapper, RouteTable};
    ///
    /// let mut table = RouteTable::new();
    /// ResourcesMapper::new(&mut table, Arc::new(EnglishInflector::new())).map("blogs");
    ///
    /// let id = BTreeMap::from([("id".to_string(), "5".to_string())]);
    /// assert_eq!(table.url_for("blogs", "index", &BTreeMap::new()).unwrap(), "/blogs");
    /// assert_eq!(table.url_for("blogs", "edit", &id).unwrap(), "/blogs/5/edit");
    /// assert_eq!(table.url_for("blogs", "show", &id).unwrap(), "/blogs/5");
    /// ```
    pub fn url_for(
        &self,
        controller: &str,
        action: &str,
        values: &BTreeMap<String, String>,
    ) -> Option<String> {
        let mut values = values.clone();
        values.insert(CONTROLLER_KEY.to_string(), controller.to_string());
        values.insert(ACTION_KEY.to_string(), action.to_string());

        self.entries
            .iter()
            .filter(|entry| entry.handler == HandlerKind::Action)
            .filter(|entry| {
                entry
                    .controller()
                    .map_or(false, |c| c.eq_ignore_ascii_case(controller))
            })
            .filter(|entry| entry.serves_action(action))
            .find_map(|entry| entry.generate_url(&values))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.entries
            .iter()
            .try_for_each(|entry| writeln!(f, "{}", entry))
    }
}
