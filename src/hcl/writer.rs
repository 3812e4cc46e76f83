//! Attribute Writer
//!
//! Classifies dynamically typed JSON values into `hcl` structures and
//! expressions, then renders them with the `hcl` formatter.

use hcl::expr::Variable;
use hcl::format::{Format, Formatter};
use hcl::{Attribute, Block, Body, Expression, Identifier, Number, Object, ObjectKey, Structure};
use serde::Serialize;
use serde_json::{Map, Value};

/// Render any `hcl` structure: scalar lists on one line, no blank lines
/// between blocks.
pub fn to_hcl<T: Format>(value: &T) -> hcl::Result<String> {
    let mut formatter = Formatter::builder()
        .compact_arrays(true)
        .dense(true)
        .build_vec();
    value.format_string(&mut formatter)
}

/// Append the HCL lines for `key = value` to `out`, each prefixed by
/// `indent`.
///
/// Null values, empty sequences and mappings with nothing to render produce
/// no output at all.
pub fn write_attr_line(key: &str, value: &Value, indent: &str, out: &mut String) -> hcl::Result<()> {
    let body = Body::builder().add_structures(structures(key, value)).build();
    for line in to_hcl(&body)?.lines() {
        out.push_str(indent);
        out.push_str(line);
        out.push('\n');
    }
    Ok(())
}

/// Same as [`write_attr_line`] for any serializable value.
///
/// Values that cannot be represented as JSON (for example maps with
/// non-string keys) are skipped.
pub fn write_serializable_attr<T: Serialize + ?Sized>(
    key: &str,
    value: &T,
    indent: &str,
    out: &mut String,
) -> hcl::Result<()> {
    match serde_json::to_value(value) {
        Ok(value) => write_attr_line(key, &value, indent, out),
        Err(e) => {
            tracing::debug!("skipping attribute {} with unsupported value: {}", key, e);
            Ok(())
        }
    }
}

/// Block body with one entry per attribute, in map order
pub fn body_structures(attributes: &Map<String, Value>) -> Vec<Structure> {
    attributes
        .iter()
        .flat_map(|(key, value)| structures(key, value))
        .collect()
}

/// Body-context classification of one entry.
///
/// Sequences whose elements are all mappings become one nested block per
/// element; everything else is a single attribute. Keys that are not HCL
/// identifiers cannot appear in a body and are skipped.
pub fn structures(key: &str, value: &Value) -> Vec<Structure> {
    if !is_renderable(value) {
        return Vec::new();
    }

    let Ok(ident) = Identifier::new(key) else {
        tracing::warn!("skipping attribute with non-identifier name {:?}", key);
        return Vec::new();
    };

    match value {
        Value::Array(items) if items.iter().filter(|v| is_renderable(v)).all(Value::is_object) => items
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|map| {
                let body = body_structures(map);
                (!body.is_empty()).then(|| Block::builder(ident.clone()).add_structures(body).build())
            })
            .map(Structure::from)
            .collect(),
        value => vec![Attribute::new(ident, expression(value)).into()],
    }
}

/// Expression-context classification: mappings become object constructors
/// and sequences become tuples, whatever their elements.
pub fn expression(value: &Value) -> Expression {
    match value {
        Value::Null => Expression::Null,
        Value::Bool(b) => Expression::Bool(*b),
        Value::Number(n) => number(n),
        Value::String(s) => Expression::String(s.clone()),
        Value::Array(items) => Expression::Array(
            items
                .iter()
                .filter(|v| is_renderable(v))
                .map(expression)
                .collect(),
        ),
        Value::Object(map) => {
            let object: Object<ObjectKey, Expression> = map
                .iter()
                .filter(|(_, v)| is_renderable(v))
                .map(|(k, v)| (object_key(k), expression(v)))
                .collect();
            Expression::Object(object)
        }
    }
}

fn object_key(key: &str) -> ObjectKey {
    match Identifier::new(key) {
        Ok(ident) => ObjectKey::Identifier(ident),
        Err(_) => ObjectKey::Expression(Expression::String(key.to_string())),
    }
}

/// Whether a value produces any output
fn is_renderable(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Array(items) => items.iter().any(is_renderable),
        Value::Object(map) => map.values().any(is_renderable),
        _ => true,
    }
}

/// HCL number literal for a JSON number.
///
/// Floats with no fractional part are written as integers.
pub fn number(n: &serde_json::Number) -> Expression {
    if let Some(i) = n.as_i64() {
        return Number::from(i).into();
    }
    if let Some(u) = n.as_u64() {
        return Number::from(u).into();
    }

    let Some(f) = n.as_f64().filter(|f| f.is_finite()) else {
        return Expression::Null;
    };
    if f.fract() != 0.0 {
        return Number::from_f64(f).map_or(Expression::Null, Expression::Number);
    }

    let whole = format!("{:.0}", f);
    if let Ok(i) = whole.parse::<i64>() {
        Number::from(i).into()
    } else if let Ok(u) = whole.parse::<u64>() {
        Number::from(u).into()
    } else {
        // hcl::Number saturates whole floats outside the 64-bit range
        Variable::unchecked(whole).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn render(key: &str, value: Value) -> String {
        let mut out = String::new();
        write_attr_line(key, &value, "", &mut out).unwrap();
        out
    }

    fn render_expr(value: Value) -> String {
        to_hcl(&expression(&value)).unwrap()
    }

    #[test]
    fn test_string_value() {
        assert_eq!(render("a", json!("b")), "a = \"b\"\n");
    }

    #[test]
    fn test_int_value() {
        assert_eq!(render("a", json!(1)), "a = 1\n");
    }

    #[test]
    fn test_whole_float_renders_as_integer() {
        assert_eq!(render("a", json!(1.0)), "a = 1\n");
        assert_eq!(render("a", json!(-300.0)), "a = -300\n");
    }

    #[test]
    fn test_fractional_float() {
        assert_eq!(render("a", json!(0.25)), "a = 0.25\n");
    }

    #[test]
    fn test_bool_value() {
        assert_eq!(render("a", json!(true)), "a = true\n");
        assert_eq!(render("a", json!(false)), "a = false\n");
    }

    #[test]
    fn test_list_of_strings() {
        assert_eq!(render("a", json!(["b", "c", "d"])), "a = [\"b\", \"c\", \"d\"]\n");
    }

    #[test]
    fn test_list_of_numbers_and_mixed_scalars() {
        assert_eq!(render("ports", json!([80, 443.0])), "ports = [80, 443]\n");
        assert_eq!(render("a", json!(["x", 1, true])), "a = [\"x\", 1, true]\n");
    }

    #[test]
    fn test_block_of_strings_keeps_insertion_order() {
        let want = "a = {\n  c = \"d\"\n  e = \"f\"\n}\n";
        assert_eq!(render("a", json!({"c": "d", "e": "f"})), want);

        let want = "a = {\n  e = \"f\"\n  c = \"d\"\n}\n";
        assert_eq!(render("a", json!({"e": "f", "c": "d"})), want);
    }

    #[test]
    fn test_nil_value_produces_nothing() {
        assert_eq!(render("a", Value::Null), "");
    }

    #[test]
    fn test_empty_collections_are_omitted() {
        assert_eq!(render("a", json!([])), "");
        assert_eq!(render("a", json!([null])), "");
        assert_eq!(render("a", json!({})), "");
        assert_eq!(render("a", json!({"b": null})), "");
        assert_eq!(render("a", json!([{}, {"b": null}])), "");
    }

    #[test]
    fn test_nulls_inside_mapping_are_skipped() {
        let want = "a = {\n  c = \"d\"\n}\n";
        assert_eq!(render("a", json!({"b": null, "c": "d"})), want);
    }

    #[test]
    fn test_nested_mapping() {
        let value = json!({"outer": {"inner": 1}, "flag": true});
        let want = "a = {\n  outer = {\n    inner = 1\n  }\n  flag = true\n}\n";
        assert_eq!(render("a", value), want);
    }

    #[test]
    fn test_list_of_mappings_becomes_blocks() {
        let value = json!([{"address": "192.0.2.1", "weight": 1}, {"address": "192.0.2.2"}]);
        let want = "origins {\n  address = \"192.0.2.1\"\n  weight = 1\n}\norigins {\n  address = \"192.0.2.2\"\n}\n";
        assert_eq!(render("origins", value), want);
    }

    #[test]
    fn test_empty_mappings_in_block_list_are_dropped() {
        let value = json!([{}, {"address": "192.0.2.1"}, {"weight": null}]);
        assert_eq!(render("origins", value), "origins {\n  address = \"192.0.2.1\"\n}\n");
    }

    #[test]
    fn test_list_of_mappings_inside_object_is_a_tuple() {
        let value = json!({"rules": [{"a": "b"}, {"c": 2}]});
        let want = "x = {\n  rules = [{\n    a = \"b\"\n  }, {\n    c = 2\n  }]\n}\n";
        assert_eq!(render("x", value), want);
    }

    #[test]
    fn test_object_keys_are_quoted_when_needed() {
        let value = json!({"Content-Type": "text/html", "x.y": "z", "ok_key": 1});
        let want = "headers = {\n  Content-Type = \"text/html\"\n  \"x.y\" = \"z\"\n  ok_key = 1\n}\n";
        assert_eq!(render("headers", value), want);
    }

    #[test]
    fn test_body_key_that_is_not_identifier_is_skipped() {
        assert_eq!(render("1abc", json!("x")), "");
        assert_eq!(render("a b", json!("x")), "");
    }

    #[test]
    fn test_indent_is_prefixed() {
        let mut out = String::new();
        write_attr_line("a", &json!({"b": "c"}), "  ", &mut out).unwrap();
        assert_eq!(out, "  a = {\n    b = \"c\"\n  }\n");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(render_expr(json!("say \"hi\"")), "\"say \\\"hi\\\"\"");
        assert_eq!(render_expr(json!("a\\b")), "\"a\\\\b\"");
        assert_eq!(render_expr(json!("line\nnext\ttab")), "\"line\\nnext\\ttab\"");
        assert_eq!(render_expr(json!("${var}")), "\"$${var}\"");
        assert_eq!(render_expr(json!("%{if}")), "\"%%{if}\"");
        assert_eq!(render_expr(json!("cost $5 or 5%")), "\"cost $5 or 5%\"");
        assert_eq!(render_expr(json!("\u{1}")), "\"\\u0001\"");
    }

    #[test]
    fn test_output_parses_back() {
        let value = json!({
            "Content-Type": "text/html",
            "template": "${var} and %{if}",
            "rules": [{"a": "b"}, {"c": [1, 2.5]}]
        });
        let mut out = String::new();
        write_attr_line("headers", &value, "", &mut out).unwrap();
        write_attr_line("origins", &json!([{"address": "192.0.2.1"}]), "", &mut out).unwrap();

        let body = hcl::parse(&out).unwrap();
        let keys: Vec<&str> = body.attributes().map(|attr| attr.key()).collect();
        assert_eq!(keys, vec!["headers"]);
        let blocks: Vec<&str> = body.blocks().map(|block| block.identifier()).collect();
        assert_eq!(blocks, vec!["origins"]);
    }

    #[test]
    fn test_serializable_value() {
        let mut out = String::new();
        write_serializable_attr("a", &vec!["b", "c"], "", &mut out).unwrap();
        assert_eq!(out, "a = [\"b\", \"c\"]\n");
    }

    #[test]
    fn test_unsupported_serializable_value_is_skipped() {
        let mut map = HashMap::new();
        map.insert((1, 2), "x");
        let mut out = String::new();
        write_serializable_attr("a", &map, "", &mut out).unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_format_large_numbers() {
        let n: serde_json::Number = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(render_expr(Value::Number(n)), "18446744073709551615");
        let n: serde_json::Number = serde_json::from_str("1e3").unwrap();
        assert_eq!(render_expr(Value::Number(n)), "1000");
    }

    #[test]
    fn test_whole_floats_beyond_64_bits_stay_integers() {
        let n: serde_json::Number = serde_json::from_str("1e20").unwrap();
        assert_eq!(render_expr(Value::Number(n)), "100000000000000000000");
        let n: serde_json::Number = serde_json::from_str("-1e19").unwrap();
        assert_eq!(render_expr(Value::Number(n)), "-10000000000000000000");
        let n: serde_json::Number = serde_json::from_str("1.5e300").unwrap();
        assert_eq!(render_expr(Value::Number(n)), format!("{:.0}", 1.5e300));
    }
}
