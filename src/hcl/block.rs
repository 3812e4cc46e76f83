//! Resource and import block rendering

use super::format::align_attributes;
use super::writer::{body_structures, to_hcl};
use hcl::expr::{Traversal, Variable};
use hcl::{Block, Identifier};
use serde_json::{Map, Value};

/// Prefix of every generated resource name
pub const RESOURCE_NAME_PREFIX: &str = "terraform_managed_resource";

/// Name used for the resource block of an item with the given identifier.
///
/// Characters that are not valid in an HCL identifier are replaced with `_`.
pub fn resource_name(id: &str) -> String {
    Identifier::sanitized(format!("{}_{}", RESOURCE_NAME_PREFIX, id)).into_inner()
}

/// Address of a resource, e.g. `cloudflare_record.terraform_managed_resource_abc`
pub fn resource_address(resource_type: &str, id: &str) -> String {
    format!("{}.{}", resource_type, resource_name(id))
}

/// Render a `resource` block with aligned attributes
pub fn resource_block(
    resource_type: &str,
    name: &str,
    attributes: &Map<String, Value>,
) -> hcl::Result<String> {
    let block = Block::builder("resource")
        .add_label(resource_type)
        .add_label(name)
        .add_structures(body_structures(attributes))
        .build();
    Ok(align_attributes(&to_hcl(&block)?))
}

/// Render a Terraform 1.5+ `import` block for the resource `name` of
/// `resource_type`
pub fn import_block(resource_type: &str, name: &str, id: &str) -> hcl::Result<String> {
    let to = Traversal::builder(Variable::sanitized(resource_type))
        .attr(Identifier::sanitized(name))
        .build();
    let block = Block::builder("import")
        .add_attribute(("to", to))
        .add_attribute(("id", id))
        .build();
    Ok(align_attributes(&to_hcl(&block)?))
}

/// Render a `terraform import` CLI invocation
pub fn import_command(address: &str, id: &str) -> String {
    format!("terraform import {} {}", address, id)
}
