//! `import` - emit commands or import blocks binding existing resources to
//! Terraform state

use crate::cloudflare::{CloudflareClient, Scope};
use crate::hcl::{import_block, import_command, resource_address, resource_name};
use crate::resource::{import_id, item_id, ResourceDef};
use anyhow::Result;
use serde_json::Value;

/// Message printed for resource types without a definition
pub fn not_supported_message(resource_type: &str) -> String {
    format!("{:?} is not yet supported for state import", resource_type)
}

/// Output style of the import statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportStyle {
    /// `terraform import <address> <id>`, one per line
    #[default]
    Command,
    /// Terraform 1.5+ `import { ... }` blocks
    Block,
}

pub async fn run<F>(resource_types: &[String], style: ImportStyle, connect: F) -> Result<String>
where
    F: FnOnce() -> Result<(CloudflareClient, Scope)>,
{
    let separator = match style {
        ImportStyle::Command => "\n",
        ImportStyle::Block => "\n\n",
    };
    super::dispatch(
        resource_types,
        connect,
        not_supported_message,
        |resource_type, resource_def, items, scope| {
            render_imports(resource_type, resource_def, items, scope, style)
        },
        separator,
    )
    .await
}

/// Render one import statement per item
pub fn render_imports(
    resource_type: &str,
    resource_def: &ResourceDef,
    items: &[Value],
    scope: &Scope,
    style: ImportStyle,
) -> Result<String> {
    let statements = items
        .iter()
        .map(|item| {
            let id = item_id(resource_def, item, scope);
            let state_id = import_id(resource_def, item, scope);
            match style {
                ImportStyle::Command => Ok(import_command(&resource_address(resource_type, &id), &state_id)),
                ImportStyle::Block => import_block(resource_type, &resource_name(&id), &state_id),
            }
        })
        .collect::<hcl::Result<Vec<_>>>()?;

    Ok(statements.join("\n").trim_end().to_string())
}
