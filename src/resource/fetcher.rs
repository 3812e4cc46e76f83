//! Resource Fetcher
//!
//! Handles fetching resources from the Cloudflare API based on resource
//! definitions.

use super::registry::{get_resource, ResourceDef, ResponseKind};
use super::transform;
use crate::cloudflare::{CloudflareClient, Scope};
use anyhow::{Context, Result};
use serde_json::Value;

/// Page size requested from paginated endpoints
pub const PER_PAGE: u32 = 50;

/// Where the next page starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageToken {
    Page(u64),
    Cursor(String),
}

/// Result of paginated fetch
pub struct PaginatedResult {
    pub items: Vec<Value>,
    pub next_token: Option<PageToken>,
}

/// Fetch all items of a resource type in a scope (auto-paginate), with
/// per-type post-processing applied
pub async fn fetch_resources(
    resource_type: &str,
    client: &CloudflareClient,
    scope: &Scope,
) -> Result<Vec<Value>> {
    let Some(resource_def) = get_resource(resource_type) else {
        return Err(anyhow::anyhow!("Unknown resource: {}", resource_type));
    };

    if !resource_def.supports_scope(scope.kind()) {
        let expected = if scope.kind() == "zone" { "--account" } else { "--zone" };
        anyhow::bail!(
            "{} cannot be listed by {}; use {} instead",
            resource_type,
            scope.kind(),
            expected
        );
    }

    tracing::info!("Fetching {} for {}", resource_def.display_name, scope);

    let path = expand_path(&resource_def.path, scope, None);
    let mut all_items = Vec::new();
    let mut page_token = if resource_def.paginated {
        Some(PageToken::Page(1))
    } else {
        None
    };

    loop {
        let result =
            fetch_resources_paginated(client, resource_def, &path, page_token.as_ref()).await?;
        all_items.extend(result.items);

        if result.next_token.is_none() {
            break;
        }
        page_token = result.next_token;
    }

    let mut items = Vec::with_capacity(all_items.len());
    for item in all_items {
        if !transform::keep_item(resource_type, &item) {
            continue;
        }
        let item = match &resource_def.detail_path {
            Some(detail_path) => fetch_detail(client, resource_def, detail_path, scope, item).await?,
            None => item,
        };
        items.push(transform::post_process_item(resource_type, item));
    }

    tracing::debug!("Fetched {} {} item(s)", items.len(), resource_type);
    Ok(items)
}

/// Fetch one page of resources
pub async fn fetch_resources_paginated(
    client: &CloudflareClient,
    resource_def: &ResourceDef,
    path: &str,
    page_token: Option<&PageToken>,
) -> Result<PaginatedResult> {
    let mut query: Vec<(&str, String)> = Vec::new();
    match page_token {
        Some(PageToken::Page(page)) => {
            query.push(("page", page.to_string()));
            query.push(("per_page", PER_PAGE.to_string()));
        }
        Some(PageToken::Cursor(cursor)) => {
            query.push(("per_page", PER_PAGE.to_string()));
            query.push(("cursor", cursor.clone()));
        }
        None => {}
    }

    let response = client
        .get(path, &query)
        .await
        .with_context(|| format!("Failed to list {}", resource_def.display_name))?;

    let items = extract_items(response.result, resource_def.response);

    let next_token = match (page_token, response.result_info) {
        _ if !resource_def.paginated || items.is_empty() => None,
        (_, Some(info)) if info.cursor.as_deref().is_some_and(|c| !c.is_empty()) => {
            info.cursor.map(PageToken::Cursor)
        }
        (Some(PageToken::Page(page)), Some(info)) => match info.total_pages {
            Some(total) if *page < total => Some(PageToken::Page(page + 1)),
            _ => None,
        },
        _ => None,
    };

    Ok(PaginatedResult { items, next_token })
}

/// Replace a listed item with its detailed representation
async fn fetch_detail(
    client: &CloudflareClient,
    resource_def: &ResourceDef,
    detail_path: &str,
    scope: &Scope,
    item: Value,
) -> Result<Value> {
    let id = item_id(resource_def, &item, scope);
    let path = expand_path(detail_path, scope, Some(&id));
    let response = client
        .get(&path, &[])
        .await
        .with_context(|| format!("Failed to read {} {}", resource_def.display_name, id))?;

    match (item, response.result) {
        (Value::Object(mut listed), detail) if resource_def.detail_field.is_some() => {
            if let Some(field) = &resource_def.detail_field {
                listed.insert(field.clone(), detail);
            }
            Ok(Value::Object(listed))
        }
        (Value::Object(mut listed), Value::Object(detail)) => {
            listed.extend(detail);
            Ok(Value::Object(listed))
        }
        (listed, Value::Null) => Ok(listed),
        (_, detail) => Ok(detail),
    }
}

/// Extract items from the `result` field of a response
fn extract_items(result: Value, kind: ResponseKind) -> Vec<Value> {
    match (kind, result) {
        (_, Value::Null) => vec![],
        (ResponseKind::List, Value::Array(items)) => items,
        (ResponseKind::Object, Value::Array(items)) => items.into_iter().take(1).collect(),
        (_, single) => vec![single],
    }
}

/// Expand `{scope_path}` and `{id}` in a path template
pub fn expand_path(template: &str, scope: &Scope, id: Option<&str>) -> String {
    let path = template.replace("{scope_path}", &scope.path());
    match id {
        Some(id) => path.replace("{id}", id),
        None => path,
    }
}

/// Identifier of an item: the configured id field, or the scope id for
/// singleton settings
pub fn item_id(resource_def: &ResourceDef, item: &Value, scope: &Scope) -> String {
    resource_def
        .id_field
        .as_deref()
        .and_then(|field| extract_json_value(item, field))
        .and_then(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| scope.id().to_string())
}

/// Import identifier built from the resource's template
pub fn import_id(resource_def: &ResourceDef, item: &Value, scope: &Scope) -> String {
    resource_def
        .import_id
        .replace("{scope_kind}", scope.kind())
        .replace("{scope_id}", scope.id())
        .replace("{id}", &item_id(resource_def, item, scope))
}

/// Extract a value from JSON using a dot-notation path.
///
/// Numeric segments index into arrays.
pub fn extract_json_value<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = item;

    for part in path.split('.') {
        current = match current {
            Value::Array(arr) => arr.get(part.parse::<usize>().ok()?)?,
            Value::Object(map) => map.get(part)?,
            _ => return None,
        };
    }

    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn zone() -> Scope {
        Scope::Zone("z1".to_string())
    }

    #[test]
    fn test_extract_json_value() {
        let item = json!({"targets": [{"constraint": {"value": "example.com/*"}}], "a": {"b": 1}});
        assert_eq!(
            extract_json_value(&item, "targets.0.constraint.value"),
            Some(&json!("example.com/*"))
        );
        assert_eq!(extract_json_value(&item, "a.b"), Some(&json!(1)));
        assert_eq!(extract_json_value(&item, "a.c"), None);
        assert_eq!(extract_json_value(&item, "targets.5"), None);
        assert_eq!(extract_json_value(&item, "a.b.c"), None);
    }

    #[test]
    fn test_expand_path() {
        assert_eq!(
            expand_path("{scope_path}/rulesets/{id}", &zone(), Some("r1")),
            "zones/z1/rulesets/r1"
        );
        let account = Scope::Account("a1".to_string());
        assert_eq!(expand_path("{scope_path}", &account, None), "accounts/a1");
    }

    #[test]
    fn test_extract_items() {
        assert_eq!(extract_items(json!([1, 2]), ResponseKind::List), vec![json!(1), json!(2)]);
        assert_eq!(
            extract_items(json!({"a": 1}), ResponseKind::Object),
            vec![json!({"a": 1})]
        );
        assert!(extract_items(Value::Null, ResponseKind::List).is_empty());
    }

    #[test]
    fn test_item_id_falls_back_to_scope() {
        let record = get_resource("cloudflare_record").unwrap();
        assert_eq!(item_id(record, &json!({"id": "abc"}), &zone()), "abc");

        let dnssec = get_resource("cloudflare_zone_dnssec").unwrap();
        assert_eq!(item_id(dnssec, &json!({"status": "active"}), &zone()), "z1");
    }

    #[test]
    fn test_import_id_templates() {
        let record = get_resource("cloudflare_record").unwrap();
        assert_eq!(import_id(record, &json!({"id": "abc"}), &zone()), "z1/abc");

        let rule = get_resource("cloudflare_access_rule").unwrap();
        let account = Scope::Account("a1".to_string());
        assert_eq!(
            import_id(rule, &json!({"id": "r"}), &account),
            "account/a1/r"
        );

        let zone_def = get_resource("cloudflare_zone").unwrap();
        assert_eq!(import_id(zone_def, &json!({"id": "z1"}), &zone()), "z1");
    }
}
