//! Per-resource-type adjustments of API items before they are mapped to
//! Terraform attributes.

use serde_json::{Map, Value};

/// Whether a listed item should be generated at all
pub fn keep_item(resource_type: &str, item: &Value) -> bool {
    match resource_type {
        // Managed rulesets belong to Cloudflare and cannot be declared.
        "cloudflare_ruleset" => item.get("kind").and_then(|v| v.as_str()) != Some("managed"),
        "cloudflare_tunnel" => item.get("deleted_at").map_or(true, |v| v.is_null()),
        _ => true,
    }
}

/// Post-process an item to match the provider schema
pub fn post_process_item(resource_type: &str, mut item: Value) -> Value {
    if let Some(map) = item.as_object_mut() {
        match resource_type {
            "cloudflare_record" => {
                // Structured records (CAA, SRV, LOC, ...) are described by `data`.
                if map.get("data").is_some_and(|d| d.as_object().is_some_and(|o| !o.is_empty())) {
                    map.shift_remove("content");
                } else {
                    map.shift_remove("data");
                }
                if map.get("type").and_then(|v| v.as_str()) != Some("MX") {
                    map.shift_remove("priority");
                }
            }
            "cloudflare_account_member" => {
                let role_ids: Vec<Value> = map
                    .get("roles")
                    .and_then(|v| v.as_array())
                    .map(|roles| {
                        roles
                            .iter()
                            .filter_map(|r| r.get("id").cloned())
                            .collect()
                    })
                    .unwrap_or_default();
                map.insert("role_ids".to_string(), Value::Array(role_ids));
            }
            "cloudflare_page_rule" => {
                let actions = map
                    .get("actions")
                    .and_then(|v| v.as_array())
                    .map(|actions| collapse_actions(actions));
                if let Some(actions) = actions {
                    map.insert("actions".to_string(), Value::Object(actions));
                }
            }
            "cloudflare_tiered_cache" => {
                let cache_type = match map.get("value").and_then(|v| v.as_str()) {
                    Some("on") => "smart",
                    _ => "off",
                };
                map.insert("cache_type".to_string(), Value::String(cache_type.to_string()));
            }
            "cloudflare_ruleset" => {
                if let Some(rules) = map.get_mut("rules").and_then(|v| v.as_array_mut()) {
                    for rule in rules.iter_mut().filter_map(|r| r.as_object_mut()) {
                        for field in ["id", "version", "last_updated", "ref"] {
                            rule.shift_remove(field);
                        }
                    }
                }
            }
            "cloudflare_load_balancer_pool" => {
                if let Some(origins) = map.get_mut("origins").and_then(|v| v.as_array_mut()) {
                    for origin in origins.iter_mut().filter_map(|o| o.as_object_mut()) {
                        for field in ["healthy", "disabled_at", "failure_reason"] {
                            origin.shift_remove(field);
                        }
                    }
                }
            }
            "cloudflare_teams_list" => {
                let values: Option<Vec<Value>> = map
                    .get("items")
                    .and_then(|v| v.as_array())
                    .map(|items| items.iter().filter_map(|i| i.get("value").cloned()).collect());
                if let Some(values) = values {
                    map.insert("items".to_string(), Value::Array(values));
                }
            }
            _ => {}
        }
    }

    item
}

/// Page rule actions arrive as `[{"id": "cache_level", "value": "bypass"}]`.
/// Actions without a value are switches and become `true`.
fn collapse_actions(actions: &[Value]) -> Map<String, Value> {
    let mut collapsed = Map::new();
    for action in actions {
        let Some(id) = action.get("id").and_then(|v| v.as_str()) else {
            continue;
        };
        let value = match action.get("value") {
            None | Some(Value::Null) => Value::Bool(true),
            Some(v) => v.clone(),
        };
        collapsed.insert(id.to_string(), value);
    }
    collapsed
}
