//! # Graph Value Model
//!
//! The discriminated union of every value the graph driver can hand back.
//! Serialization and export branch on these variants with exhaustive
//! matching instead of runtime type inspection.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};

/// Property map attached to nodes and relationships.
///
/// A `BTreeMap` keeps property iteration deterministic, which the CSV
/// exporter relies on for stable headers.
pub type Properties = BTreeMap<String, GraphValue>;

/// One value as returned by the graph driver.
///
/// Transient: values live for a single request and are projected into a
/// JSON-safe form before the response is built.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphValue {
    /// Absent value
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Int(i64),
    /// Float scalar
    Float(f64),
    /// String scalar
    String(String),
    /// Ordered sequence, order preserved through serialization
    List(Vec<GraphValue>),
    /// String-keyed mapping
    Map(BTreeMap<String, GraphValue>),
    /// Graph node
    Node(Node),
    /// Directed, typed edge
    Relationship(Relationship),
    /// Alternating node/relationship traversal
    Path(Path),
    /// Calendar date, rendered as ISO-8601
    Date(NaiveDate),
    /// Timezone-aware instant, rendered as ISO-8601
    DateTime(DateTime<FixedOffset>),
    /// Anything the driver produced that has no structured mapping.
    /// Carries the display string; lossy but never fails.
    Unknown(String),
}

impl GraphValue {
    /// True for null/bool/int/float/string.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            GraphValue::Null
                | GraphValue::Bool(_)
                | GraphValue::Int(_)
                | GraphValue::Float(_)
                | GraphValue::String(_)
        )
    }
}

impl fmt::Display for GraphValue {
    /// Display form used when a value must collapse to a single CSV field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphValue::Null => Ok(()),
            GraphValue::Bool(b) => write!(f, "{}", b),
            GraphValue::Int(i) => write!(f, "{}", i),
            GraphValue::Float(x) => write!(f, "{}", x),
            GraphValue::String(s) => write!(f, "{}", s),
            GraphValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            GraphValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            GraphValue::Unknown(s) => write!(f, "{}", s),
            other => {
                // Composite values collapse to compact JSON
                let json = crate::serialize::to_json(other);
                write!(f, "{}", json)
            }
        }
    }
}

/// A graph node.
///
/// The identity is driver-assigned and only stable within one database
/// instance; callers must not treat it as a durable key.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: i64,
    /// Labels in the order they were encountered, deduplicated by the driver
    pub labels: Vec<String>,
    pub properties: Properties,
}

impl Node {
    pub fn new(id: i64, labels: Vec<String>, properties: Properties) -> Self {
        Self { id, labels, properties }
    }
}

/// A directed, typed edge between two nodes.
///
/// Start/end identities are trusted from the driver; the gateway never
/// validates that they are reachable in the same traversal context.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: i64,
    pub rel_type: String,
    pub start_node_id: i64,
    pub end_node_id: i64,
    pub properties: Properties,
}

impl Relationship {
    pub fn new(
        id: i64,
        rel_type: impl Into<String>,
        start_node_id: i64,
        end_node_id: i64,
        properties: Properties,
    ) -> Self {
        Self {
            id,
            rel_type: rel_type.into(),
            start_node_id,
            end_node_id,
            properties,
        }
    }
}

/// An alternating sequence of nodes and relationships.
///
/// Invariant: a path of n relationships has n+1 nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub nodes: Vec<Node>,
    pub relationships: Vec<Relationship>,
}

impl Path {
    pub fn new(nodes: Vec<Node>, relationships: Vec<Relationship>) -> Self {
        Self { nodes, relationships }
    }

    /// Number of relationships in the traversal.
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    /// Checks the n+1 nodes / n relationships shape.
    pub fn is_well_formed(&self) -> bool {
        self.nodes.len() == self.relationships.len() + 1
    }
}
