//! Subcommand implementations
//!
//! Both commands share the same shape: resource types without a definition
//! produce a fixed message, everything else is fetched from the API once a
//! client and scope are available.

pub mod generate;
pub mod import;

pub use import::ImportStyle;

use crate::cloudflare::{base_url_for_hostname, CloudflareClient, Credentials, Scope};
use crate::config::Config;
use crate::resource::{fetch_resources, get_resource, ResourceDef};
use anyhow::Result;
use serde_json::Value;

/// Run `render` over the fetched items of each requested resource type.
///
/// Unknown types contribute `not_supported(type)` and are logged at debug
/// level only. `connect` is called once, at the first supported type, so a
/// run made only of unknown types needs neither credentials nor a scope.
/// Non-empty sections are joined with `separator`.
pub async fn dispatch<C, U, R>(
    resource_types: &[String],
    connect: C,
    not_supported: U,
    render: R,
    separator: &str,
) -> Result<String>
where
    C: FnOnce() -> Result<(CloudflareClient, Scope)>,
    U: Fn(&str) -> String,
    R: Fn(&str, &ResourceDef, &[Value], &Scope) -> Result<String>,
{
    let mut connect = Some(connect);
    let mut session: Option<(CloudflareClient, Scope)> = None;
    let mut sections = Vec::new();

    for resource_type in resource_types {
        let Some(resource_def) = get_resource(resource_type) else {
            tracing::debug!("resource type {} is not supported", resource_type);
            sections.push(not_supported(resource_type));
            continue;
        };

        if session.is_none() {
            if let Some(connect) = connect.take() {
                session = Some(connect()?);
            }
        }
        let Some((client, scope)) = session.as_ref() else {
            continue;
        };

        let items = fetch_resources(resource_type, client, scope).await?;
        let rendered = render(resource_type, resource_def, &items, scope)?;
        if !rendered.is_empty() {
            sections.push(rendered);
        }
    }

    Ok(sections.join(separator))
}

/// Build the API client and scope from resolved settings.
///
/// The scope is checked first so a missing `--zone`/`--account` is reported
/// even when credentials are also missing.
pub fn connect(settings: &Config) -> Result<(CloudflareClient, Scope)> {
    let scope = Scope::from_ids(settings.zone.as_deref(), settings.account.as_deref())?;
    let credentials = Credentials::resolve(
        settings.token.as_deref(),
        settings.email.as_deref(),
        settings.key.as_deref(),
    )?;
    tracing::debug!("Using {} credentials for {}", credentials.kind(), scope);

    let client = match settings.hostname.as_deref().filter(|h| !h.is_empty()) {
        Some(hostname) => {
            CloudflareClient::with_base_url(&base_url_for_hostname(hostname), credentials)?
        }
        None => CloudflareClient::new(credentials)?,
    };
    Ok((client, scope))
}
