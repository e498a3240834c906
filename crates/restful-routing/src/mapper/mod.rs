//! Resource mapping: the seven conventional routes of a resource
//!
//! [`ResourcesMapper`] appends entries to a [`RouteTable`] it borrows but
//! never owns. Nested resources are described by a callback receiving a child
//! mapper scoped under `{resource}/{singularId}`.

mod configuration;

use std::sync::Arc;

use tracing::{debug, info};

use crate::route::{ActionPattern, HandlerKind, RouteEntry, ACTION_KEY, CONTROLLER_KEY};
use crate::{Action, HttpMethod, Inflector, RouteTable};

pub use configuration::RouteConfiguration;

/// Explicit type descriptor for models mapped by type
///
/// # Examples
///
/// ```
/// use restful_routing::Model;
///
/// struct Blog;
///
/// impl Model for Blog {
///     const MODEL_NAME: &'static str = "Blog";
/// }
/// ```
pub trait Model {
    const MODEL_NAME: &'static str;
}

/// Registers conventional resource routes into a shared table
pub struct ResourcesMapper<'t> {
    table: &'t mut RouteTable,
    inflector: Arc<dyn Inflector>,
    configuration: RouteConfiguration,
    base_path: String,
}

impl<'t> ResourcesMapper<'t> {
    /// Creates a root mapper with the default configuration
    pub fn new(table: &'t mut RouteTable, inflector: Arc<dyn Inflector>) -> Self {
        Self::with_configuration(table, inflector, RouteConfiguration::default())
    }

    /// Creates a mapper with an explicit prefix and/or controller
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use restful_routing::{EnglishInflector, ResourcesMapper, RouteConfiguration, RouteTable};
    ///
    /// let mut table = RouteTable::new();
    /// let config = RouteConfiguration::new().with_path_prefix("admin/");
    /// {
    ///     let mut mapper =
    ///         ResourcesMapper::with_configuration(&mut table, Arc::new(EnglishInflector::new()), config);
    ///     mapper.map("users");
    /// }
    ///
    /// assert_eq!(table.entries()[0].template.as_str(), "admin/users");
    /// ```
    pub fn with_configuration(
        table: &'t mut RouteTable,
        inflector: Arc<dyn Inflector>,
        configuration: RouteConfiguration,
    ) -> Self {
        let base_path = configuration.base_path();
        Self {
            table,
            inflector,
            configuration,
            base_path,
        }
    }

    pub fn configuration(&self) -> &RouteConfiguration {
        &self.configuration
    }

    /// The table this mapper appends to
    pub fn table(&self) -> &RouteTable {
        &*self.table
    }

    pub(crate) fn table_mut(&mut self) -> &mut RouteTable {
        &mut *self.table
    }

    /// Normalized prefix every template starts with (empty or ending in `/`)
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Resource name for a type name: pluralized, then lowercased
    pub fn resource_name(&self, type_name: &str) -> String {
        self.inflector.pluralize(type_name).to_lowercase()
    }

    /// Maps a resource given by name; the name is used exactly as passed
    ///
    /// Appends, in order:
    ///
    /// 1. `GET {base}{resource}` → `index`
    /// 2. `POST {base}{resource}` → `create`
    /// 3. `{base}{resource}/new` → `new`
    /// 4. `GET {base}{resource}/{id}/{action}` → `show` (action ∈ show|edit|delete)
    /// 5. `PUT {base}{resource}/{id}` → `update`
    /// 6. `DELETE {base}{resource}/{id}` → `destroy`
    /// 7. `POST {base}{resource}/{id}` → method override
    pub fn map(&mut self, resource: &str) {
        let controller = self.configuration.controller_for(resource).to_string();
        let collection = format!("{}{}", self.base_path, resource);
        let member = format!("{}/{{id}}", collection);

        info!(resource, %controller, base_path = %self.base_path, "mapping resource");

        let entries = [
            RouteEntry::new(collection.clone())
                .with_default(ACTION_KEY, Action::Index.as_str())
                .with_method(HttpMethod::Get),
            RouteEntry::new(collection.clone())
                .with_default(ACTION_KEY, Action::Create.as_str())
                .with_method(HttpMethod::Post),
            RouteEntry::new(format!("{}/new", collection))
                .with_default(ACTION_KEY, Action::New.as_str()),
            RouteEntry::new(format!("{}/{{action}}", member))
                .with_default(ACTION_KEY, Action::Show.as_str())
                .with_method(HttpMethod::Get)
                .with_action_constraint(ActionPattern::member_actions()),
            RouteEntry::new(member.clone())
                .with_default(ACTION_KEY, Action::Update.as_str())
                .with_method(HttpMethod::Put),
            RouteEntry::new(member.clone())
                .with_default(ACTION_KEY, Action::Destroy.as_str())
                .with_method(HttpMethod::Delete),
            // Forms can only POST; the override value picks update or destroy
            RouteEntry::new(member)
                .with_method(HttpMethod::Post)
                .with_handler(HandlerKind::MethodOverride),
        ];

        for entry in entries {
            let entry = entry.with_default(CONTROLLER_KEY, controller.as_str());
            debug!(route = %entry, "adding route");
            self.table.add(entry);
        }
    }

    /// Maps a model type: `Blog` becomes the `blogs` resource
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use restful_routing::{EnglishInflector, Model, ResourcesMapper, RouteTable};
    ///
    /// struct Blog;
    /// impl Model for Blog {
    ///     const MODEL_NAME: &'static str = "Blog";
    /// }
    ///
    /// let mut table = RouteTable::new();
    /// ResourcesMapper::new(&mut table, Arc::new(EnglishInflector::new())).map_model::<Blog>();
    ///
    /// assert_eq!(table.entries()[0].template.as_str(), "blogs");
    /// ```
    pub fn map_model<M: Model>(&mut self) {
        self.map_type(M::MODEL_NAME);
    }

    /// Maps a resource derived from a type name
    pub fn map_type(&mut self, type_name: &str) {
        let resource = self.resource_name(type_name);
        self.map(&resource);
    }

    /// Maps a resource, then lets `nested` map children under it
    ///
    /// The child mapper writes to the same table with the prefix
    /// `{base}{resource}/{singularId}`; it does not inherit the controller
    /// override.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use restful_routing::{EnglishInflector, ResourcesMapper, RouteTable};
    ///
    /// let mut table = RouteTable::new();
    /// ResourcesMapper::new(&mut table, Arc::new(EnglishInflector::new())).map_nested("blogs", |blogs| {
    ///     blogs.map_nested("posts", |posts| posts.map("comments"));
    /// });
    ///
    /// assert_eq!(table.len(), 21);
    /// assert_eq!(table.entries()[14].template.as_str(), "blogs/{blogId}/posts/{postId}/comments");
    /// ```
    pub fn map_nested<F>(&mut self, resource: &str, nested: F)
    where
        F: FnOnce(&mut ResourcesMapper<'_>),
    {
        self.map(resource);

        let singular = self.inflector.singularize(resource).to_lowercase();
        let configuration = RouteConfiguration::new().with_path_prefix(format!(
            "{}{}/{{{}Id}}",
            self.base_path, resource, singular
        ));
        debug!(resource, prefix = %configuration.path_prefix, "entering nested resources");

        let mut child =
            ResourcesMapper::with_configuration(&mut *self.table, self.inflector.clone(), configuration);
        nested(&mut child);
    }

    /// Maps a model type with nested resources
    pub fn map_model_nested<M, F>(&mut self, nested: F)
    where
        M: Model,
        F: FnOnce(&mut ResourcesMapper<'_>),
    {
        let resource = self.resource_name(M::MODEL_NAME);
        self.map_nested(&resource, nested);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EnglishInflector;

    fn inflector() -> Arc<dyn Inflector> {
        Arc::new(EnglishInflector::new())
    }

    #[test]
    fn test_map_appends_seven_entries() {
        let mut table = RouteTable::new();
        ResourcesMapper::new(&mut table, inflector()).map("blogs");
        assert_eq!(table.len(), 7);
    }

    #[test]
    fn test_controller_defaults_to_resource() {
        let mut table = RouteTable::new();
        ResourcesMapper::new(&mut table, inflector()).map("blogs");
        assert!(table.iter().all(|e| e.controller() == Some("blogs")));
    }

    #[test]
    fn test_controller_override() {
        let mut table = RouteTable::new();
        let config = RouteConfiguration::new().with_controller("articles");
        ResourcesMapper::with_configuration(&mut table, inflector(), config).map("blogs");
        assert!(table.iter().all(|e| e.controller() == Some("articles")));
        assert_eq!(table.entries()[0].template.as_str(), "blogs");
    }

    #[test]
    fn test_resource_name_is_used_verbatim() {
        let mut table = RouteTable::new();
        ResourcesMapper::new(&mut table, inflector()).map("Blogs");
        assert_eq!(table.entries()[0].template.as_str(), "Blogs");
    }

    #[test]
    fn test_resource_name_from_type() {
        let mut table = RouteTable::new();
        let mapper = ResourcesMapper::new(&mut table, inflector());
        assert_eq!(mapper.resource_name("Blog"), "blogs");
        assert_eq!(mapper.resource_name("Person"), "people");
        assert_eq!(mapper.resource_name("Category"), "categories");
    }

    #[test]
    fn test_base_path_normalization() {
        let mut table = RouteTable::new();
        let config = RouteConfiguration::new().with_path_prefix("admin///");
        let mapper = ResourcesMapper::with_configuration(&mut table, inflector(), config);
        assert_eq!(mapper.base_path(), "admin/");
    }

    #[test]
    fn test_nested_controller_is_not_inherited() {
        let mut table = RouteTable::new();
        let config = RouteConfiguration::new().with_controller("articles");
        ResourcesMapper::with_configuration(&mut table, inflector(), config)
            .map_nested("blogs", |blogs| blogs.map("comments"));

        assert_eq!(table.entries()[0].controller(), Some("articles"));
        assert_eq!(table.entries()[7].controller(), Some("comments"));
    }

    #[test]
    fn test_nested_callback_receives_scoped_mapper() {
        let mut table = RouteTable::new();
        let mut seen = String::new();
        ResourcesMapper::new(&mut table, inflector()).map_nested("blogs", |blogs| {
            seen = blogs.base_path().to_string();
        });
        assert_eq!(seen, "blogs/{blogId}/");
        assert_eq!(table.len(), 7);
    }
}
