//! # Value Serializer
//!
//! Converts one [`GraphValue`] into a JSON-safe `serde_json::Value`.
//!
//! Cycles cannot occur: nodes and relationships descend only into their
//! declared properties, never into adjacent graph elements, so no
//! recursion limit is needed.

use serde_json::{json, Map, Value};

use crate::graph::value::{GraphValue, Node, Path, Relationship};

/// Serialize a single value.
///
/// Scalars pass through unchanged; lists and maps recurse; graph entities
/// take their structured `{id, ...}` shape; temporals render as ISO-8601;
/// unknown values fall back to their display string and never fail.
pub fn to_json(value: &GraphValue) -> Value {
    match value {
        GraphValue::Null => Value::Null,
        GraphValue::Bool(b) => Value::Bool(*b),
        GraphValue::Int(i) => json!(i),
        GraphValue::Float(f) => json!(f),
        GraphValue::String(s) => Value::String(s.clone()),
        GraphValue::List(items) => Value::Array(items.iter().map(to_json).collect()),
        GraphValue::Map(entries) => {
            let mut map = Map::new();
            for (key, entry) in entries {
                map.insert(key.clone(), to_json(entry));
            }
            Value::Object(map)
        }
        GraphValue::Node(node) => node_to_json(node),
        GraphValue::Relationship(rel) => relationship_to_json(rel),
        // Paths are normally unpacked by the projector; one reached through
        // nesting serializes to the same shape.
        GraphValue::Path(path) => path_to_json(path),
        GraphValue::Date(date) => Value::String(date.format("%Y-%m-%d").to_string()),
        GraphValue::DateTime(dt) => Value::String(dt.to_rfc3339()),
        GraphValue::Unknown(display) => Value::String(display.clone()),
    }
}

/// `{id, labels, properties}` with properties recursively serialized.
pub fn node_to_json(node: &Node) -> Value {
    json!({
        "id": node.id,
        "labels": node.labels,
        "properties": properties_to_json(node),
    })
}

/// `{id, type, start_node_id, end_node_id, properties}`.
pub fn relationship_to_json(rel: &Relationship) -> Value {
    let mut properties = Map::new();
    for (key, value) in &rel.properties {
        properties.insert(key.clone(), to_json(value));
    }
    json!({
        "id": rel.id,
        "type": rel.rel_type,
        "start_node_id": rel.start_node_id,
        "end_node_id": rel.end_node_id,
        "properties": properties,
    })
}

/// `{nodes, relationships}` in traversal order.
pub fn path_to_json(path: &Path) -> Value {
    json!({
        "nodes": path.nodes.iter().map(node_to_json).collect::<Vec<_>>(),
        "relationships": path
            .relationships
            .iter()
            .map(relationship_to_json)
            .collect::<Vec<_>>(),
    })
}

fn properties_to_json(node: &Node) -> Value {
    let mut map = Map::new();
    for (key, value) in &node.properties {
        map.insert(key.clone(), to_json(value));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::value::Properties;
    use chrono::{DateTime, NaiveDate};
    use serde_json::json;

    fn props(entries: &[(&str, GraphValue)]) -> Properties {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(to_json(&GraphValue::Null), json!(null));
        assert_eq!(to_json(&GraphValue::Bool(true)), json!(true));
        assert_eq!(to_json(&GraphValue::Int(-3)), json!(-3));
        assert_eq!(to_json(&GraphValue::Float(2.5)), json!(2.5));
        assert_eq!(to_json(&GraphValue::String("s".into())), json!("s"));
    }

    #[test]
    fn test_list_recurses_in_order() {
        let value = GraphValue::List(vec![
            GraphValue::Int(1),
            GraphValue::List(vec![GraphValue::String("x".into())]),
        ]);
        assert_eq!(to_json(&value), json!([1, ["x"]]));
    }

    #[test]
    fn test_map_recurses() {
        let value = GraphValue::Map(props(&[
            ("a", GraphValue::Int(1)),
            ("b", GraphValue::List(vec![GraphValue::Null])),
        ]));
        assert_eq!(to_json(&value), json!({"a": 1, "b": [null]}));
    }

    #[test]
    fn test_node_shape() {
        let node = Node::new(
            11,
            vec!["Person".into(), "Admin".into()],
            props(&[("name", GraphValue::String("Ada".into()))]),
        );
        let value = to_json(&GraphValue::Node(node));

        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(value["id"], json!(11));
        assert_eq!(value["labels"], json!(["Person", "Admin"]));
        assert_eq!(value["properties"], json!({"name": "Ada"}));
    }

    #[test]
    fn test_relationship_shape() {
        let rel = Relationship::new(5, "KNOWS", 1, 2, props(&[("since", GraphValue::Int(2020))]));
        let value = to_json(&GraphValue::Relationship(rel));

        assert_eq!(
            value,
            json!({
                "id": 5,
                "type": "KNOWS",
                "start_node_id": 1,
                "end_node_id": 2,
                "properties": {"since": 2020},
            })
        );
    }

    #[test]
    fn test_node_properties_recurse() {
        let inner = Node::new(1, vec![], props(&[("deep", GraphValue::Bool(true))]));
        let node = Node::new(
            2,
            vec!["Wrapper".into()],
            props(&[("nested", GraphValue::List(vec![GraphValue::Node(inner)]))]),
        );

        let value = to_json(&GraphValue::Node(node));
        assert_eq!(
            value["properties"]["nested"][0]["properties"]["deep"],
            json!(true)
        );
    }

    #[test]
    fn test_temporal_iso8601() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 24).unwrap();
        assert_eq!(to_json(&GraphValue::Date(date)), json!("2023-12-24"));

        let dt = DateTime::parse_from_rfc3339("2023-12-24T08:15:00+02:00").unwrap();
        assert_eq!(
            to_json(&GraphValue::DateTime(dt)),
            json!("2023-12-24T08:15:00+02:00")
        );
    }

    #[test]
    fn test_unknown_falls_back_to_display_string() {
        let value = GraphValue::Unknown("POINT(1 2)".into());
        assert_eq!(to_json(&value), json!("POINT(1 2)"));
    }

    #[test]
    fn test_nested_path_uses_projector_shape() {
        let path = Path::new(
            vec![Node::new(1, vec![], props(&[])), Node::new(2, vec![], props(&[]))],
            vec![Relationship::new(9, "LINKS", 1, 2, props(&[]))],
        );
        let value = to_json(&GraphValue::List(vec![GraphValue::Path(path)]));

        assert_eq!(value[0]["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(value[0]["relationships"].as_array().unwrap().len(), 1);
    }
}
