//! HCL output
//!
//! Turns JSON values returned by the Cloudflare API into Terraform
//! configuration text. Values are classified into `hcl` crate structures and
//! printed with its formatter; `=` alignment is applied afterwards since the
//! formatter does not align.
//!
//! # Module Structure
//!
//! - [`writer`] - JSON value to HCL attribute, block and expression
//! - [`format`] - `terraform fmt` style alignment of `=` signs
//! - [`block`] - `resource` and `import` blocks, resource naming
//!
//! # Example
//!
//! ```
//! use cf_terraforming::hcl::write_attr_line;
//! use serde_json::json;
//!
//! let mut out = String::new();
//! write_attr_line("a", &json!(["b", "c", "d"]), "", &mut out).unwrap();
//! assert_eq!(out, "a = [\"b\", \"c\", \"d\"]\n");
//! ```

pub mod block;
pub mod format;
pub mod writer;

pub use block::{
    import_block, import_command, resource_address, resource_block, resource_name,
    RESOURCE_NAME_PREFIX,
};
pub use format::align_attributes;
pub use writer::{body_structures, expression, to_hcl, write_attr_line, write_serializable_attr};
