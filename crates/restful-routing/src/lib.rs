//! # Restful Routing
//!
//! Convention-based resource routing. One call registers the seven
//! conventional routes of a resource:
//!
//! | Verb     | Template                   | Action                      |
//! |----------|----------------------------|-----------------------------|
//! | `GET`    | `blogs`                    | `index`                     |
//! | `POST`   | `blogs`                    | `create`                    |
//! | any      | `blogs/new`                | `new`                       |
//! | `GET`    | `blogs/{id}/{action}`      | `show`, `edit` or `delete`  |
//! | `PUT`    | `blogs/{id}`               | `update`                    |
//! | `DELETE` | `blogs/{id}`               | `destroy`                   |
//! | `POST`   | `blogs/{id}`               | method override             |
//!
//! Resources can be nested (`blogs/{blogId}/comments/...`) through a callback
//! that receives a child mapper, and HTML forms can reach `update`/`destroy`
//! by posting a `_method` field of `PUT` or `DELETE`.
//!
//! Registration happens once at startup against a [`RouteTable`]. Freezing the
//! table hands out a [`SharedRouteTable`] that request tasks resolve against
//! concurrently without locks.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use restful_routing::{EnglishInflector, HttpMethod, ResourcesMapper, RouteRequest, RouteTable};
//!
//! let mut table = RouteTable::new();
//! let inflector = Arc::new(EnglishInflector::new());
//!
//! {
//!     let mut mapper = ResourcesMapper::new(&mut table, inflector);
//!     mapper.map_nested("blogs", |blogs| blogs.map("comments"));
//! }
//!
//! let table = table.freeze();
//! let matched = table
//!     .resolve(&RouteRequest::new(HttpMethod::Get, "/blogs/5/comments/7/edit"))
//!     .unwrap();
//!
//! assert_eq!(matched.controller, "comments");
//! assert_eq!(matched.action, "edit");
//! assert_eq!(matched.get("blogId"), Some("5"));
//! assert_eq!(matched.get("id"), Some("7"));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod action;
pub mod config;
mod error;
mod inflector;
pub mod mapper;
pub mod method_override;
pub mod path;
pub mod route;
mod table;

pub use action::{Action, HttpMethod};
pub use config::Config;
pub use error::RoutingError;
pub use inflector::{EnglishInflector, Inflector};
pub use mapper::{Model, ResourcesMapper, RouteConfiguration};
pub use method_override::MethodOverride;
pub use route::{ActionPattern, HandlerKind, RouteConstraints, RouteEntry, RouteTemplate};
pub use table::{RouteMatch, RouteRequest, RouteTable, SharedRouteTable};
