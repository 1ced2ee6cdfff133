//! # Record Projector
//!
//! Applies the value serializer across every column of every result
//! record, producing an ordered sequence of JSON row objects.
//!
//! Paths get a record-level special case: traversal order matters for
//! reconstruction, so a path column emits `{nodes, relationships}` rather
//! than going through generic serialization.

use serde_json::{Map, Value};

use crate::graph::record::GraphRecord;
use crate::graph::value::GraphValue;

use super::value::{path_to_json, to_json};

/// Project a full result set, preserving row and column order.
pub fn project_records(records: &[GraphRecord]) -> Vec<Value> {
    records.iter().map(project_record).collect()
}

/// Project one record into a JSON object keyed by output column.
pub fn project_record(record: &GraphRecord) -> Value {
    let mut row = Map::new();
    for (column, value) in record.columns() {
        let projected = match value {
            GraphValue::Path(path) => path_to_json(path),
            other => to_json(other),
        };
        row.insert(column.clone(), projected);
    }
    Value::Object(row)
}
