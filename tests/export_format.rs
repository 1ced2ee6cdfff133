//! Export Format Tests
//!
//! - Header is the union of property keys plus synthetic columns
//! - Missing properties render as empty fields
//! - The size guard rejects oversize documents without a partial body

use graph_gateway::export::{CsvExporter, ExportError};
use graph_gateway::graph::value::{GraphValue, Node, Properties, Relationship};

// =============================================================================
// Helper Functions
// =============================================================================

fn props(entries: &[(&str, GraphValue)]) -> Properties {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn sections(document: &str) -> (String, String) {
    let marker = "\nRelationships\n";
    let at = document.find(marker).expect("relationships section");
    (
        document["Nodes\n".len()..at].to_string(),
        document[at + marker.len()..].to_string(),
    )
}

// =============================================================================
// Header derivation
// =============================================================================

#[test]
fn test_union_header_and_empty_fields() {
    let nodes = vec![
        Node::new(
            1,
            vec!["Person".to_string()],
            props(&[("name", GraphValue::String("A".to_string()))]),
        ),
        Node::new(2, vec!["Person".to_string()], props(&[])),
    ];

    let document = CsvExporter::default().export(&nodes, &[]).unwrap();
    let (node_table, _) = sections(&document);
    let mut lines = node_table.lines();

    let header = lines.next().unwrap();
    assert_eq!(header, "id,labels,name");

    assert_eq!(lines.next(), Some("1,Person,A"));
    // Missing property renders as an empty field, not an omitted one
    assert_eq!(lines.next(), Some("2,Person,"));
}

#[test]
fn test_header_is_identical_for_every_row() {
    let nodes: Vec<Node> = (0..20)
        .map(|i| {
            let key = format!("k{}", i % 5);
            Node::new(i, vec![], props(&[(key.as_str(), GraphValue::Int(i))]))
        })
        .collect();

    let document = CsvExporter::default().export(&nodes, &[]).unwrap();
    let (node_table, _) = sections(&document);
    let mut lines = node_table.lines();

    let header = lines.next().unwrap();
    let columns = header.split(',').count();
    for line in lines {
        assert_eq!(line.split(',').count(), columns, "row: {}", line);
    }
}

#[test]
fn test_node_and_relationship_headers_are_independent() {
    let nodes = vec![Node::new(
        1,
        vec![],
        props(&[("only_on_nodes", GraphValue::Int(1))]),
    )];
    let rels = vec![Relationship::new(
        2,
        "REL",
        1,
        1,
        props(&[("only_on_rels", GraphValue::Int(2))]),
    )];

    let document = CsvExporter::default().export(&nodes, &rels).unwrap();
    let (node_table, rel_table) = sections(&document);

    assert!(node_table.starts_with("id,labels,only_on_nodes"));
    assert!(!node_table.contains("only_on_rels"));
    assert!(rel_table.starts_with("id,type,start_node_id,end_node_id,only_on_rels"));
    assert!(!rel_table.contains("only_on_nodes"));
}

// =============================================================================
// Value rendering
// =============================================================================

#[test]
fn test_temporal_properties_render_iso8601() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    let nodes = vec![Node::new(
        1,
        vec![],
        props(&[("born", GraphValue::Date(date))]),
    )];

    let document = CsvExporter::default().export(&nodes, &[]).unwrap();
    assert!(document.contains("2024-06-30"));
}

#[test]
fn test_map_property_collapses_to_json() {
    let nodes = vec![Node::new(
        1,
        vec![],
        props(&[(
            "meta",
            GraphValue::Map(props(&[("a", GraphValue::Int(1))])),
        )]),
    )];

    let document = CsvExporter::default().export(&nodes, &[]).unwrap();
    // Quoted because the JSON form contains a comma-free object with quotes
    assert!(document.contains(r#""{""a"":1}""#));
}

// =============================================================================
// Size guard
// =============================================================================

#[test]
fn test_oversize_rejection_has_no_partial_body() {
    let nodes: Vec<Node> = (0..50)
        .map(|i| {
            Node::new(
                i,
                vec!["Big".to_string()],
                props(&[("payload", GraphValue::String("y".repeat(100)))]),
            )
        })
        .collect();

    let exporter = CsvExporter::new(1024);
    match exporter.export(&nodes, &[]) {
        Err(ExportError::TooLarge { size, limit }) => {
            assert!(size > limit);
            assert_eq!(limit, 1024);
        }
        Ok(_) => panic!("export should have been rejected"),
        Err(other) => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_default_ceiling_is_six_mebibytes() {
    use graph_gateway::export::DEFAULT_MAX_EXPORT_BYTES;
    assert_eq!(DEFAULT_MAX_EXPORT_BYTES, 6 * 1024 * 1024);
}
