//! `generate` - emit Terraform resource blocks for existing resources

use crate::cloudflare::{CloudflareClient, Scope};
use crate::hcl::{resource_block, resource_name};
use crate::resource::{extract_json_value, item_id, ResourceDef};
use anyhow::Result;
use serde_json::{Map, Value};

/// Message printed for resource types without a definition
pub fn not_supported_message(resource_type: &str) -> String {
    format!("{:?} is not yet supported for automatic generation", resource_type)
}

/// Generate configuration for each requested resource type.
///
/// `connect` is only called when at least one requested type is supported,
/// so unsupported types never require credentials or a scope.
pub async fn run<F>(resource_types: &[String], connect: F) -> Result<String>
where
    F: FnOnce() -> Result<(CloudflareClient, Scope)>,
{
    super::dispatch(
        resource_types,
        connect,
        not_supported_message,
        render_resources,
        "\n\n",
    )
    .await
}

/// Render one resource block per item, separated by blank lines
pub fn render_resources(
    resource_type: &str,
    resource_def: &ResourceDef,
    items: &[Value],
    scope: &Scope,
) -> Result<String> {
    let blocks = items
        .iter()
        .map(|item| {
            let name = resource_name(&item_id(resource_def, item, scope));
            let attributes = build_attributes(resource_def, item, scope);
            resource_block(resource_type, &name, &attributes)
        })
        .collect::<hcl::Result<Vec<_>>>()?;

    Ok(blocks.join("\n").trim_end().to_string())
}

/// Map an API item to Terraform attributes using the resource's table.
///
/// Attributes are sorted by name, matching the provider schema order.
pub fn build_attributes(resource_def: &ResourceDef, item: &Value, scope: &Scope) -> Map<String, Value> {
    let mut attributes: Vec<(String, Value)> = resource_def
        .attributes
        .iter()
        .filter_map(|attr| {
            extract_json_value(item, attr.source_path())
                .filter(|v| !v.is_null())
                .map(|v| (attr.name.clone(), v.clone()))
        })
        .collect();

    if resource_def.scope_attribute {
        attributes.retain(|(name, _)| name != scope.attribute());
        attributes.push((
            scope.attribute().to_string(),
            Value::String(scope.id().to_string()),
        ));
    }

    attributes.sort_by(|a, b| a.0.cmp(&b.0));
    attributes.into_iter().collect()
}
