//! # Result Records
//!
//! One row of a query result: an ordered mapping from output column name
//! to a graph value. Column order is the query's projection order.

use super::value::GraphValue;

/// A single result row.
///
/// Created as the result stream is consumed, projected into JSON-safe
/// form, and discarded; never retained across requests.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphRecord {
    columns: Vec<(String, GraphValue)>,
}

impl GraphRecord {
    pub fn new(columns: Vec<(String, GraphValue)>) -> Self {
        Self { columns }
    }

    /// Column (name, value) pairs in projection order.
    pub fn columns(&self) -> &[(String, GraphValue)] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn get(&self, name: &str) -> Option<&GraphValue> {
        self.columns
            .iter()
            .find(|(col, _)| col == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_order_is_preserved() {
        let record = GraphRecord::new(vec![
            ("b".to_string(), GraphValue::Int(2)),
            ("a".to_string(), GraphValue::Int(1)),
        ]);

        let names: Vec<&str> = record.columns().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_get_by_name() {
        let record = GraphRecord::new(vec![("n".to_string(), GraphValue::Int(9))]);
        assert_eq!(record.get("n"), Some(&GraphValue::Int(9)));
        assert_eq!(record.get("missing"), None);
    }
}
