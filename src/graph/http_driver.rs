//! # Neo4j HTTP Driver
//!
//! Production implementation of the driver seam over the Neo4j HTTP
//! transactional API (`POST {uri}/db/{database}/tx/commit`).
//!
//! Every statement is sent with `resultDataContents: ["row", "graph"]`.
//! The `row` stream carries plain values plus per-position `meta` markers
//! (entity ids and kinds), while the `graph` section carries the full
//! structure (labels, relationship types, endpoints) keyed by id. Records
//! are reconstructed by joining the two.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::record::GraphRecord;
use super::session::{Credentials, GraphDriver, GraphSession, SessionError, SessionResult};
use super::value::{GraphValue, Node, Path, Properties, Relationship};

/// Driver that opens HTTP sessions against a Neo4j transactional endpoint.
pub struct HttpGraphDriver {
    client: reqwest::Client,
}

impl HttpGraphDriver {
    /// Build a driver with a transport-level timeout.
    ///
    /// The request-scoped deadline is enforced separately by the gateway
    /// handler; this timeout only bounds a single HTTP exchange.
    pub fn new(timeout: Duration) -> SessionResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SessionError::ConnectFailed(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl GraphDriver for HttpGraphDriver {
    async fn session(&self, credentials: &Credentials) -> SessionResult<Box<dyn GraphSession>> {
        let base = reqwest::Url::parse(&credentials.uri)
            .map_err(|e| SessionError::ConnectFailed(format!("invalid database URI: {}", e)))?;

        match base.scheme() {
            "http" | "https" => {}
            other => {
                return Err(SessionError::ConnectFailed(format!(
                    "unsupported URI scheme '{}' (the HTTP driver needs http or https)",
                    other
                )))
            }
        }

        let endpoint = base
            .join(&format!("db/{}/tx/commit", credentials.database))
            .map_err(|e| SessionError::ConnectFailed(format!("invalid database URI: {}", e)))?;

        Ok(Box::new(HttpGraphSession {
            client: self.client.clone(),
            endpoint,
            username: credentials.username.clone(),
            password: credentials.password.clone(),
        }))
    }
}

/// One request-scoped session. Dropped (and with it the borrowed
/// connection) on every exit path.
#[derive(Debug)]
struct HttpGraphSession {
    client: reqwest::Client,
    endpoint: reqwest::Url,
    username: String,
    password: String,
}

#[async_trait]
impl GraphSession for HttpGraphSession {
    async fn run(&self, query: &str) -> SessionResult<Vec<GraphRecord>> {
        let request = TxRequest {
            statements: vec![TxStatement {
                statement: query.to_string(),
                result_data_contents: vec!["row".to_string(), "graph".to_string()],
            }],
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .basic_auth(&self.username, Some(&self.password))
            .json(&request)
            .send()
            .await
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        let status = response.status();
        let body: TxResponse = response
            .json()
            .await
            .map_err(|e| SessionError::Transport(format!("malformed driver response: {}", e)))?;

        if let Some(err) = body.errors.first() {
            return Err(SessionError::Database(format!("{}: {}", err.code, err.message)));
        }
        if !status.is_success() {
            return Err(SessionError::Transport(format!(
                "database endpoint returned status {}",
                status
            )));
        }

        let result = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| SessionError::Transport("driver response had no result".to_string()))?;

        Ok(decode_result(result))
    }
}

// ==================
// Wire format
// ==================

#[derive(Debug, Serialize)]
struct TxRequest {
    statements: Vec<TxStatement>,
}

#[derive(Debug, Serialize)]
struct TxStatement {
    statement: String,
    #[serde(rename = "resultDataContents")]
    result_data_contents: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct TxError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct TxResult {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<TxData>,
}

#[derive(Debug, Deserialize)]
struct TxData {
    #[serde(default)]
    row: Vec<JsonValue>,
    #[serde(default)]
    meta: JsonValue,
    #[serde(default)]
    graph: Option<TxGraph>,
}

#[derive(Debug, Deserialize)]
struct TxGraph {
    #[serde(default)]
    nodes: Vec<TxNode>,
    #[serde(default)]
    relationships: Vec<TxRelationship>,
}

#[derive(Debug, Deserialize)]
struct TxNode {
    id: String,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    properties: serde_json::Map<String, JsonValue>,
}

#[derive(Debug, Deserialize)]
struct TxRelationship {
    id: String,
    #[serde(rename = "type", default)]
    rel_type: String,
    #[serde(rename = "startNode", default)]
    start_node: String,
    #[serde(rename = "endNode", default)]
    end_node: String,
    #[serde(default)]
    properties: serde_json::Map<String, JsonValue>,
}

// ==================
// Decoding
// ==================

/// Per-row lookup of graph entities by id.
struct GraphIndex {
    nodes: HashMap<i64, Node>,
    relationships: HashMap<i64, Relationship>,
}

impl GraphIndex {
    fn from_graph(graph: Option<&TxGraph>) -> Self {
        let mut nodes = HashMap::new();
        let mut relationships = HashMap::new();

        if let Some(graph) = graph {
            for n in &graph.nodes {
                if let Ok(id) = n.id.parse::<i64>() {
                    nodes.insert(
                        id,
                        Node::new(id, n.labels.clone(), json_map_to_properties(&n.properties)),
                    );
                }
            }
            for r in &graph.relationships {
                if let (Ok(id), Ok(start), Ok(end)) = (
                    r.id.parse::<i64>(),
                    r.start_node.parse::<i64>(),
                    r.end_node.parse::<i64>(),
                ) {
                    relationships.insert(
                        id,
                        Relationship::new(
                            id,
                            r.rel_type.clone(),
                            start,
                            end,
                            json_map_to_properties(&r.properties),
                        ),
                    );
                }
            }
        }

        Self { nodes, relationships }
    }
}

fn decode_result(result: TxResult) -> Vec<GraphRecord> {
    let columns = result.columns;
    result
        .data
        .into_iter()
        .map(|data| {
            let index = GraphIndex::from_graph(data.graph.as_ref());
            let metas: &[JsonValue] = match &data.meta {
                JsonValue::Array(items) => items.as_slice(),
                _ => &[],
            };

            let cols = columns
                .iter()
                .zip(data.row.iter())
                .enumerate()
                .map(|(i, (name, value))| {
                    let meta = metas.get(i).unwrap_or(&JsonValue::Null);
                    (name.clone(), decode_value(value, meta, &index))
                })
                .collect();

            GraphRecord::new(cols)
        })
        .collect()
}

/// Reconstruct one value from its row representation and meta marker.
fn decode_value(row: &JsonValue, meta: &JsonValue, index: &GraphIndex) -> GraphValue {
    match meta {
        JsonValue::Object(marker) => decode_entity(row, marker, index),
        JsonValue::Array(markers) => decode_sequence(row, markers, index),
        _ => json_to_graph_value(row),
    }
}

/// A meta object marks either a graph entity (has an id) or a typed
/// scalar such as a temporal value.
fn decode_entity(
    row: &JsonValue,
    marker: &serde_json::Map<String, JsonValue>,
    index: &GraphIndex,
) -> GraphValue {
    let kind = marker.get("type").and_then(JsonValue::as_str).unwrap_or("");
    let id = marker.get("id").and_then(JsonValue::as_i64);

    match (kind, id) {
        ("node", Some(id)) => match index.nodes.get(&id) {
            Some(node) => GraphValue::Node(node.clone()),
            // Graph section can omit an entity the row still references;
            // fall back to the row's bare property map.
            None => GraphValue::Node(Node::new(id, Vec::new(), row_properties(row))),
        },
        ("relationship", Some(id)) => match index.relationships.get(&id) {
            Some(rel) => GraphValue::Relationship(rel.clone()),
            // Endpoints cannot be recovered from the row alone; surface
            // the raw value rather than invent them.
            None => GraphValue::Unknown(row.to_string()),
        },
        ("date", _) => decode_date(row),
        ("datetime", _) => decode_datetime(row),
        _ => json_to_graph_value(row),
    }
}

/// A meta array paired with a row array is either a path (alternating
/// node/relationship markers) or a plain list decoded elementwise.
fn decode_sequence(row: &JsonValue, markers: &[JsonValue], index: &GraphIndex) -> GraphValue {
    let items = match row {
        JsonValue::Array(items) => items,
        other => return json_to_graph_value(other),
    };

    if is_path_shape(markers) && markers.len() == items.len() {
        let mut nodes = Vec::new();
        let mut relationships = Vec::new();
        for (item, marker) in items.iter().zip(markers.iter()) {
            let object = match marker {
                JsonValue::Object(m) => m,
                _ => continue,
            };
            match decode_entity(item, object, index) {
                GraphValue::Node(n) => nodes.push(n),
                GraphValue::Relationship(r) => relationships.push(r),
                _ => {}
            }
        }
        return GraphValue::Path(Path::new(nodes, relationships));
    }

    GraphValue::List(
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let meta = markers.get(i).unwrap_or(&JsonValue::Null);
                decode_value(item, meta, index)
            })
            .collect(),
    )
}

/// Paths arrive as an odd-length alternation of node and relationship
/// markers with nodes at both ends. A lone node marker is the zero-length
/// path.
fn is_path_shape(markers: &[JsonValue]) -> bool {
    if markers.is_empty() || markers.len() % 2 == 0 {
        return false;
    }
    markers.iter().enumerate().all(|(i, marker)| {
        let kind = marker.get("type").and_then(JsonValue::as_str);
        if i % 2 == 0 {
            kind == Some("node")
        } else {
            kind == Some("relationship")
        }
    })
}

fn decode_date(row: &JsonValue) -> GraphValue {
    match row.as_str().and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()) {
        Some(date) => GraphValue::Date(date),
        None => json_to_graph_value(row),
    }
}

fn decode_datetime(row: &JsonValue) -> GraphValue {
    match row.as_str().and_then(|s| DateTime::parse_from_rfc3339(s).ok()) {
        Some(dt) => GraphValue::DateTime(dt),
        None => json_to_graph_value(row),
    }
}

fn row_properties(row: &JsonValue) -> Properties {
    match row {
        JsonValue::Object(map) => json_map_to_properties(map),
        _ => Properties::new(),
    }
}

fn json_map_to_properties(map: &serde_json::Map<String, JsonValue>) -> Properties {
    map.iter()
        .map(|(k, v)| (k.clone(), json_to_graph_value(v)))
        .collect()
}

/// Plain JSON with no meta marker maps structurally.
fn json_to_graph_value(value: &JsonValue) -> GraphValue {
    match value {
        JsonValue::Null => GraphValue::Null,
        JsonValue::Bool(b) => GraphValue::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                GraphValue::Int(i)
            } else {
                GraphValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        JsonValue::String(s) => GraphValue::String(s.clone()),
        JsonValue::Array(items) => {
            GraphValue::List(items.iter().map(json_to_graph_value).collect())
        }
        JsonValue::Object(map) => GraphValue::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_graph_value(v)))
                .collect(),
        ),
    }
}
