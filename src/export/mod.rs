//! # Tabular Exporter
//!
//! Flattens node and relationship sets into one CSV document with two
//! labelled sections (`Nodes`, `Relationships`).
//!
//! Header derivation per table: synthetic columns first (`id`, `labels`
//! for nodes; `id`, `type`, `start_node_id`, `end_node_id` for
//! relationships), then the union of property keys in sorted order. The
//! header is stable within one export; missing properties render as empty
//! fields. Quoting follows RFC 4180 via the csv crate.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::graph::value::{Node, Properties, Relationship};

/// Default ceiling on the rendered document, matching a 6 MiB transport
/// payload limit. Policy, not structure: configurable per gateway.
pub const DEFAULT_MAX_EXPORT_BYTES: usize = 6 * 1024 * 1024;

/// Separator used when a node carries several labels.
const LABEL_SEPARATOR: &str = ";";

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Failures while rendering an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Rendered document exceeds the configured ceiling
    #[error("CSV data size {size} exceeds the maximum allowed size of {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    /// The CSV writer itself failed
    #[error("CSV rendering failed: {0}")]
    Render(String),
}

/// CSV exporter with a configurable size ceiling.
pub struct CsvExporter {
    max_bytes: usize,
}

impl CsvExporter {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Render nodes and relationships into one sectioned document.
    ///
    /// Fails without a partial body when the result exceeds the ceiling.
    pub fn export(&self, nodes: &[Node], relationships: &[Relationship]) -> ExportResult<String> {
        let nodes_csv = render_nodes(nodes)?;
        let relationships_csv = render_relationships(relationships)?;

        let document = format!("Nodes\n{}\nRelationships\n{}", nodes_csv, relationships_csv);

        if document.len() > self.max_bytes {
            return Err(ExportError::TooLarge {
                size: document.len(),
                limit: self.max_bytes,
            });
        }
        Ok(document)
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_EXPORT_BYTES)
    }
}

/// Node table: id, labels, then sorted property union.
fn render_nodes(nodes: &[Node]) -> ExportResult<String> {
    if nodes.is_empty() {
        return Ok(String::new());
    }

    let property_columns = property_union(nodes.iter().map(|n| &n.properties));
    let mut header = vec!["id".to_string(), "labels".to_string()];
    header.extend(property_columns.iter().cloned());

    let rows = nodes.iter().map(|node| {
        let mut row = vec![node.id.to_string(), node.labels.join(LABEL_SEPARATOR)];
        row.extend(property_columns.iter().map(|key| field(&node.properties, key)));
        row
    });

    render_table(&header, rows)
}

/// Relationship table: id, type, endpoints, then sorted property union.
fn render_relationships(relationships: &[Relationship]) -> ExportResult<String> {
    if relationships.is_empty() {
        return Ok(String::new());
    }

    let property_columns = property_union(relationships.iter().map(|r| &r.properties));
    let mut header = vec![
        "id".to_string(),
        "type".to_string(),
        "start_node_id".to_string(),
        "end_node_id".to_string(),
    ];
    header.extend(property_columns.iter().cloned());

    let rows = relationships.iter().map(|rel| {
        let mut row = vec![
            rel.id.to_string(),
            rel.rel_type.clone(),
            rel.start_node_id.to_string(),
            rel.end_node_id.to_string(),
        ];
        row.extend(property_columns.iter().map(|key| field(&rel.properties, key)));
        row
    });

    render_table(&header, rows)
}

/// Union of property keys across the collection, sorted for a stable
/// header.
fn property_union<'a>(property_maps: impl Iterator<Item = &'a Properties>) -> Vec<String> {
    let mut keys = BTreeSet::new();
    for properties in property_maps {
        for key in properties.keys() {
            keys.insert(key.clone());
        }
    }
    keys.into_iter().collect()
}

/// A missing property is an empty field, not an omitted one; non-scalar
/// values collapse to their display form (compact JSON).
fn field(properties: &Properties, key: &str) -> String {
    match properties.get(key) {
        Some(value) => value.to_string(),
        None => String::new(),
    }
}

fn render_table(
    header: &[String],
    rows: impl Iterator<Item = Vec<String>>,
) -> ExportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(header)
        .map_err(|e| ExportError::Render(e.to_string()))?;
    for row in rows {
        writer
            .write_record(&row)
            .map_err(|e| ExportError::Render(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Render(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Render(e.to_string()))
}
