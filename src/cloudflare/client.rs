//! Cloudflare Client
//!
//! Main client for the Cloudflare v4 API, combining credentials and HTTP
//! functionality.

use super::auth::Credentials;
use super::http::{ApiResponse, CloudflareHttpClient};
use anyhow::{Context, Result};
use std::fmt;
use url::Url;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// The account or zone a command operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Zone(String),
    Account(String),
}

impl Scope {
    /// Build a scope from the mutually exclusive zone/account settings
    pub fn from_ids(zone: Option<&str>, account: Option<&str>) -> Result<Self> {
        let zone = zone.filter(|z| !z.is_empty());
        let account = account.filter(|a| !a.is_empty());
        match (zone, account) {
            (Some(_), Some(_)) => anyhow::bail!("--zone and --account cannot be used together"),
            (Some(zone), None) => Ok(Self::Zone(zone.to_string())),
            (None, Some(account)) => Ok(Self::Account(account.to_string())),
            (None, None) => anyhow::bail!("you must define either --zone or --account"),
        }
    }

    /// The zone or account identifier
    pub fn id(&self) -> &str {
        match self {
            Self::Zone(id) | Self::Account(id) => id,
        }
    }

    /// Short scope name as used in resource definitions
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Zone(_) => "zone",
            Self::Account(_) => "account",
        }
    }

    /// Path prefix of the scope, e.g. `zones/<id>`
    pub fn path(&self) -> String {
        match self {
            Self::Zone(id) => format!("zones/{}", id),
            Self::Account(id) => format!("accounts/{}", id),
        }
    }

    /// Name of the Terraform attribute holding the scope identifier
    pub fn attribute(&self) -> &'static str {
        match self {
            Self::Zone(_) => "zone_id",
            Self::Account(_) => "account_id",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.id())
    }
}

/// Main Cloudflare client
#[derive(Clone)]
pub struct CloudflareClient {
    pub credentials: Credentials,
    pub http: CloudflareHttpClient,
    base_url: String,
}

impl CloudflareClient {
    /// Create a client against the default API endpoint
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, credentials)
    }

    /// Create a client against a custom endpoint (full URL including `/client/v4`)
    pub fn with_base_url(base_url: &str, credentials: Credentials) -> Result<Self> {
        let parsed = Url::parse(base_url).with_context(|| format!("Invalid API URL: {}", base_url))?;
        let http = CloudflareHttpClient::new()?;

        Ok(Self {
            credentials,
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL for an API path with query parameters
    pub fn url(&self, path: &str, query: &[(&str, String)]) -> String {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        add_query_params(&url, query)
    }

    /// Make a GET request to the Cloudflare API
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse> {
        let url = self.url(path, query);
        self.http.get(&url, &self.credentials).await
    }
}

/// Base URL for an API hostname, e.g. `api.cloudflare.com`
pub fn base_url_for_hostname(hostname: &str) -> String {
    if hostname.starts_with("http://") || hostname.starts_with("https://") {
        hostname.trim_end_matches('/').to_string()
    } else {
        format!("https://{}/client/v4", hostname.trim_end_matches('/'))
    }
}

/// Format a Cloudflare API error for display
pub fn format_api_error(error: &anyhow::Error) -> String {
    super::http::format_api_error(error)
}

fn add_query_params(url: &str, query: &[(&str, String)]) -> String {
    let query_parts: Vec<String> = query
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect();

    if query_parts.is_empty() {
        url.to_string()
    } else if url.contains('?') {
        format!("{}&{}", url, query_parts.join("&"))
    } else {
        format!("{}?{}", url, query_parts.join("&"))
    }
}
