/// Per-mapping route configuration
///
/// `path_prefix` is prepended to every template the mapper builds; an empty
/// prefix maps resources at the root. `controller` overrides the controller
/// name, which otherwise is the resource name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteConfiguration {
    pub path_prefix: String,
    pub controller: Option<String>,
}

impl RouteConfiguration {
    /// Creates the default configuration: empty prefix, no controller override
    ///
    /// # Examples
    ///
    /// ```
    /// use restful_routing::RouteConfiguration;
    ///
    /// let config = RouteConfiguration::new();
    /// assert_eq!(config.path_prefix, "");
    /// assert_eq!(config.controller, None);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    pub fn with_controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    /// Controller name for a resource: the override when set and non-empty
    pub fn controller_for<'a>(&'a self, resource: &'a str) -> &'a str {
        self.controller
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(resource)
    }

    /// Prefix with trailing `/` stripped and one `/` appended, or empty
    pub fn base_path(&self) -> String {
        crate::path::base_path(&self.path_prefix)
    }
}
