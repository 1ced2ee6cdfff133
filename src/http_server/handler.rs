//! # Gateway Handler
//!
//! The request-processing core behind the routes: resolves tenant
//! credentials, opens a scoped session, runs the query under the request
//! deadline, and transforms results. Routes stay thin; everything here is
//! testable against the in-memory driver.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::time::timeout;

use crate::config::GatewayConfig;
use crate::export::CsvExporter;
use crate::governor::{KeywordGovernor, PermissiveGovernor, QueryGovernor};
use crate::graph::record::GraphRecord;
use crate::graph::session::{GraphDriver, GraphSession};
use crate::graph::value::GraphValue;
use crate::graph::{credentials, Node, Relationship};
use crate::observability::Logger;
use crate::serialize::project_records;

use super::errors::{GatewayError, GatewayResult};
use super::response::QueryResponse;

/// POST body shape. The database selector from the path can be overridden
/// per request.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub database: Option<String>,
}

/// Request-processing core shared by all routes.
pub struct GatewayHandler {
    config: GatewayConfig,
    driver: Arc<dyn GraphDriver>,
    governor: Arc<dyn QueryGovernor>,
}

impl GatewayHandler {
    /// Build a handler; the governor strategy follows the configuration
    /// toggle.
    pub fn new(config: GatewayConfig, driver: Arc<dyn GraphDriver>) -> Self {
        let governor: Arc<dyn QueryGovernor> = if config.governance.enabled {
            Arc::new(KeywordGovernor::new())
        } else {
            Arc::new(PermissiveGovernor)
        };
        Self { config, driver, governor }
    }

    /// Replace the governance strategy.
    pub fn with_governor(mut self, governor: Arc<dyn QueryGovernor>) -> Self {
        self.governor = governor;
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// `GET /{service}/{db}` — bounded default snapshot.
    pub async fn snapshot(&self, selector: &str) -> GatewayResult<Vec<serde_json::Value>> {
        let session = self.open_session(selector).await?;
        let query = format!("MATCH (n) RETURN n LIMIT {}", self.config.snapshot_limit);

        Logger::info("snapshot_query", &[("db", selector)]);
        let records = self.run_with_deadline(session.as_ref(), &query).await?;
        Ok(project_records(&records))
    }

    /// `POST /{service}/{db}` — governed custom query execution.
    ///
    /// Credentials resolve and the session opens before any body verdict,
    /// matching the priority order of the rest of the dispatch chain. The
    /// body is peeked first only for its `database` override.
    pub async fn custom_query(&self, selector: &str, body: &str) -> GatewayResult<QueryResponse> {
        let parsed = parse_body(body);
        let selector = match &parsed {
            Ok(request) => request
                .database
                .clone()
                .unwrap_or_else(|| selector.to_string()),
            Err(_) => selector.to_string(),
        };

        let session = self.open_session(&selector).await?;

        let request = parsed?;
        if request.query.trim().is_empty() {
            return Err(GatewayError::EmptyQuery);
        }

        if !self.governor.classify(&request.query).is_allowed() {
            Logger::warn("query_rejected", &[("db", &selector), ("query", &request.query)]);
            return Err(GatewayError::RejectedQuery);
        }

        Logger::info("custom_query", &[("db", &selector), ("query", &request.query)]);
        let records = self.run_with_deadline(session.as_ref(), &request.query).await?;

        Ok(QueryResponse::from_rows(project_records(&records)))
    }

    /// `GET /{service}/{db}?export=csv` — sectioned CSV of a bounded
    /// node/relationship sample.
    pub async fn export_csv(&self, selector: &str) -> GatewayResult<String> {
        if !self.config.export.enabled {
            return Err(GatewayError::ExportDisabled);
        }

        let session = self.open_session(selector).await?;

        let node_query = format!("MATCH (n) RETURN n LIMIT {}", self.config.export.node_limit);
        let rel_query = format!(
            "MATCH ()-[r]->() RETURN r LIMIT {}",
            self.config.export.relationship_limit
        );

        Logger::info("csv_export", &[("db", selector)]);
        let node_records = self.run_with_deadline(session.as_ref(), &node_query).await?;
        let rel_records = self.run_with_deadline(session.as_ref(), &rel_query).await?;

        let nodes = collect_nodes(&node_records);
        let relationships = collect_relationships(&rel_records);

        let exporter = CsvExporter::new(self.config.export.max_bytes);
        let document = exporter.export(&nodes, &relationships)?;
        Ok(document)
    }

    /// Resolve credentials and acquire the request-scoped session.
    async fn open_session(&self, selector: &str) -> GatewayResult<Box<dyn GraphSession>> {
        let creds = credentials::resolve(selector)
            .map_err(GatewayError::MissingCredentials)?;

        self.driver.session(&creds).await.map_err(|err| {
            let gateway_err: GatewayError = err.into();
            Logger::error("driver_init_failed", &[("db", selector), ("detail", &gateway_err.diagnostic())]);
            gateway_err
        })
    }

    /// Run one query under the configured request deadline.
    async fn run_with_deadline(
        &self,
        session: &dyn GraphSession,
        query: &str,
    ) -> GatewayResult<Vec<GraphRecord>> {
        let deadline = Duration::from_secs(self.config.request_timeout_secs);

        match timeout(deadline, session.run(query)).await {
            Ok(Ok(records)) => Ok(records),
            Ok(Err(err)) => {
                let gateway_err: GatewayError = err.into();
                Logger::error("query_failed", &[("detail", &gateway_err.diagnostic())]);
                Err(gateway_err)
            }
            Err(_) => {
                Logger::error(
                    "query_timeout",
                    &[("seconds", &self.config.request_timeout_secs.to_string())],
                );
                Err(GatewayError::QueryTimeout(self.config.request_timeout_secs))
            }
        }
    }
}

fn parse_body(body: &str) -> GatewayResult<QueryRequest> {
    let raw = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(raw).map_err(|e| GatewayError::MalformedBody(e.to_string()))
}

/// Every node value appearing in any column, in row order.
fn collect_nodes(records: &[GraphRecord]) -> Vec<Node> {
    records
        .iter()
        .flat_map(|record| record.columns().iter())
        .filter_map(|(_, value)| match value {
            GraphValue::Node(node) => Some(node.clone()),
            _ => None,
        })
        .collect()
}

/// Every relationship value appearing in any column, in row order.
fn collect_relationships(records: &[GraphRecord]) -> Vec<Relationship> {
    records
        .iter()
        .flat_map(|record| record.columns().iter())
        .filter_map(|(_, value)| match value {
            GraphValue::Relationship(rel) => Some(rel.clone()),
            _ => None,
        })
        .collect()
}
