//! Resource Registry - Load resource definitions from JSON
//!
//! This module loads all Terraform resource type definitions from embedded
//! JSON files and provides lookup functions for the rest of the application.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded resource JSON files (compiled into the binary)
const RESOURCE_FILES: &[&str] = &[
    include_str!("../resources/dns.json"),
    include_str!("../resources/security.json"),
    include_str!("../resources/traffic.json"),
    include_str!("../resources/zero_trust.json"),
    include_str!("../resources/developer.json"),
    include_str!("../resources/account.json"),
];

/// Shape of the `result` field of a collection response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// `result` is an array of items
    #[default]
    List,
    /// `result` is a single settings-like object
    Object,
}

/// Attribute definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeDef {
    /// Terraform attribute name
    pub name: String,
    /// Dot-notation path in the API item, defaults to `name`
    #[serde(default)]
    pub source: Option<String>,
}

impl AttributeDef {
    pub fn source_path(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.name)
    }
}

/// Resource definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDef {
    pub display_name: String,
    /// Scopes the resource can be listed in: `zone`, `account`
    pub scopes: Vec<String>,
    /// Collection path template, `{scope_path}` expands to `zones/<id>` or
    /// `accounts/<id>`
    pub path: String,
    #[serde(default)]
    pub response: ResponseKind,
    #[serde(default)]
    pub paginated: bool,
    /// Path template fetched once per listed item, `{id}` is the item id
    #[serde(default)]
    pub detail_path: Option<String>,
    /// Field the detail result is stored under; without it a detail object
    /// is merged into the listed item
    #[serde(default)]
    pub detail_field: Option<String>,
    /// Field holding the item identifier; the scope id is used when absent
    #[serde(default)]
    pub id_field: Option<String>,
    /// Import id template. Placeholders: `{scope_kind}`, `{scope_id}`, `{id}`
    #[serde(default = "default_import_id")]
    pub import_id: String,
    /// Whether `zone_id`/`account_id` is written into the generated block
    #[serde(default = "default_true")]
    pub scope_attribute: bool,
    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
}

fn default_import_id() -> String {
    "{scope_id}/{id}".to_string()
}

fn default_true() -> bool {
    true
}

impl ResourceDef {
    /// Check whether the resource can be listed in a scope (`zone`/`account`)
    pub fn supports_scope(&self, kind: &str) -> bool {
        self.scopes.iter().any(|s| s == kind)
    }
}

/// Root structure of resources/*.json
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig {
    #[serde(default)]
    pub resources: HashMap<String, ResourceDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<ResourceConfig> = OnceLock::new();

/// Get the resource registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static ResourceConfig {
    REGISTRY.get_or_init(|| {
        let mut final_config = ResourceConfig {
            resources: HashMap::new(),
        };

        for content in RESOURCE_FILES {
            let partial: ResourceConfig = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded resource JSON: {}", e));
            final_config.resources.extend(partial.resources);
        }

        final_config
    })
}

/// Get a resource definition by Terraform resource type
pub fn get_resource(resource_type: &str) -> Option<&'static ResourceDef> {
    get_registry().resources.get(resource_type)
}

/// Whether generation/import is implemented for a resource type
pub fn is_supported(resource_type: &str) -> bool {
    get_resource(resource_type).is_some()
}

/// Get all supported resource types, sorted
pub fn get_all_resource_types() -> Vec<&'static str> {
    let mut types: Vec<&'static str> = get_registry()
        .resources
        .keys()
        .map(|s| s.as_str())
        .collect();
    types.sort_unstable();
    types
}
