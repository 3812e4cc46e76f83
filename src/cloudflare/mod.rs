//! Cloudflare API interaction module
//!
//! This module provides the core functionality for reading resources from the
//! Cloudflare v4 REST API: credentials, the HTTP client and scoping.
//!
//! # Module Structure
//!
//! - [`auth`] - API token or API key + email credentials
//! - [`client`] - Main client and the zone/account [`Scope`](client::Scope)
//! - [`http`] - HTTP utilities and the v4 response envelope
//!
//! # Example
//!
//! ```ignore
//! use crate::cloudflare::{Credentials, CloudflareClient};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = CloudflareClient::new(Credentials::api_token("token"))?;
//!     let records = client.get("zones/0da42c8d2132a9ddaf714f9e7c920711/dns_records", &[]).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;

pub use auth::{Credentials, SENSITIVE_HEADERS};
pub use client::{base_url_for_hostname, format_api_error, CloudflareClient, Scope, DEFAULT_BASE_URL};
