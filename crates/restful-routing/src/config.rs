// File: src/config.rs
// Purpose: Configuration parsing from restful.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::method_override::{self, MethodOverride};
use crate::{Inflector, ResourcesMapper, RouteConfiguration, RouteTable};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    /// Resources registered at startup, in order
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Whether literal path segments ignore case (default: true)
    #[serde(default = "default_true")]
    pub case_insensitive: bool,

    /// Form field carrying the override verb (default: "_method")
    #[serde(default = "default_override_field")]
    pub override_field: String,

    /// Header carrying the override verb (default: "X-HTTP-Method-Override")
    #[serde(default = "default_override_header")]
    pub override_header: String,
}

/// A resource declaration, possibly with nested resources
///
/// Either `name` (used verbatim) or `model` (pluralized and lowercased) must
/// be given; `name` wins when both are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceConfig {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub controller: Option<String>,

    #[serde(default)]
    pub path_prefix: Option<String>,

    #[serde(default)]
    pub nested: Vec<ResourceConfig>,
}

// Default values
fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_true() -> bool {
    true
}

fn default_override_field() -> String {
    method_override::DEFAULT_FIELD.to_string()
}

fn default_override_header() -> String {
    method_override::DEFAULT_HEADER.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            override_field: default_override_field(),
            override_header: default_override_header(),
        }
    }
}

impl RoutingConfig {
    pub fn method_override(&self) -> MethodOverride {
        MethodOverride::new(&self.override_field, &self.override_header)
    }
}

impl ResourceConfig {
    /// Resource name under a mapper: explicit name, else the model pluralized
    fn resource_name(&self, mapper: &ResourcesMapper<'_>) -> Option<String> {
        self.name
            .clone()
            .or_else(|| self.model.as_deref().map(|model| mapper.resource_name(model)))
    }

    fn route_configuration(&self, base: &RouteConfiguration) -> RouteConfiguration {
        let mut configuration = base.clone();
        if let Some(prefix) = &self.path_prefix {
            configuration.path_prefix = format!("{}{}", base.base_path(), prefix);
        }
        if let Some(controller) = &self.controller {
            configuration.controller = Some(controller.clone());
        }
        configuration
    }

    /// Maps this resource and its children through `mapper`'s table
    fn register(&self, mapper: &mut ResourcesMapper<'_>, inflector: &Arc<dyn Inflector>) {
        let Some(resource) = self.resource_name(mapper) else {
            warn!(resource = ?self, "resource without name or model skipped");
            return;
        };

        let configuration = self.route_configuration(mapper.configuration());
        let mut scoped = ResourcesMapper::with_configuration(
            mapper.table_mut(),
            inflector.clone(),
            configuration,
        );

        if self.nested.is_empty() {
            scoped.map(&resource);
        } else {
            scoped.map_nested(&resource, |child| {
                for nested in &self.nested {
                    nested.register(child, inflector);
                }
            });
        }
    }
}

impl Config {
    /// Load configuration from restful.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./restful.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("restful.toml")
    }

    /// Empty route table honouring the routing settings
    pub fn route_table(&self) -> RouteTable {
        RouteTable::new().with_case_insensitive(self.routing.case_insensitive)
    }

    /// Registers every declared resource into `table`
    pub fn register(&self, table: &mut RouteTable, inflector: Arc<dyn Inflector>) {
        let before = table.len();
        let mut root = ResourcesMapper::new(table, inflector.clone());
        for resource in &self.resources {
            resource.register(&mut root, &inflector);
        }
        info!(routes = root.table().len() - before, "registered configured resources");
    }
}
