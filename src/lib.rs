//! Generate Terraform configuration and import statements for resources that
//! already exist in a Cloudflare account or zone.

pub mod cloudflare;
pub mod commands;
pub mod config;
pub mod hcl;
pub mod resource;

/// Version injected at compile time via CF_TERRAFORMING_VERSION env var (set
/// by CI/CD), or "dev" for local builds.
pub const VERSION: &str = match option_env!("CF_TERRAFORMING_VERSION") {
    Some(v) => v,
    None => "dev",
};
