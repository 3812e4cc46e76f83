//! Resource abstraction layer
//!
//! This module provides a data-driven approach to reading Cloudflare
//! resources. Resource definitions are loaded from JSON files at compile time,
//! so supporting a new resource type is mostly a matter of adding a table
//! entry.
//!
//! # Architecture
//!
//! - [`registry`] - Loads and caches resource definitions from embedded JSON
//! - [`fetcher`] - Fetches resources from the API with pagination support
//! - [`transform`] - Per-type adjustments of API items
//!
//! # Resource Definitions
//!
//! Resources are defined in JSON files under `src/resources/`:
//! - `dns.json` - DNS records, zones, custom hostnames
//! - `security.json` - Firewall, rulesets, access rules, bot management
//! - `traffic.json` - Load balancing, health checks, caching, page rules
//! - `zero_trust.json` - Access and Gateway
//! - `developer.json` - Workers, KV, D1, Queues
//! - `account.json` - Accounts, members, lists, logpush
//!
//! # Example
//!
//! ```ignore
//! use crate::resource::fetch_resources;
//! use crate::cloudflare::{CloudflareClient, Scope};
//!
//! async fn list_records(client: &CloudflareClient) -> anyhow::Result<Vec<serde_json::Value>> {
//!     let scope = Scope::Zone("0da42c8d2132a9ddaf714f9e7c920711".to_string());
//!     fetch_resources("cloudflare_record", client, &scope).await
//! }
//! ```

mod fetcher;
mod registry;
pub mod transform;

pub use fetcher::{
    expand_path, extract_json_value, fetch_resources, fetch_resources_paginated, import_id,
    item_id, PageToken, PaginatedResult, PER_PAGE,
};
pub use registry::*;
