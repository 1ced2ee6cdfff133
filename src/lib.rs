//! graph-gateway - a stateless HTTP gateway exposing a Neo4j-compatible
//! graph database as JSON and CSV.
//!
//! The gateway accepts GET requests for a bounded default snapshot, POST
//! requests carrying governed query strings, and CSV export requests.
//! Result values are reconstructed into an explicit value model, then
//! serialized structurally; every failure maps onto a deterministic HTTP
//! response.

pub mod cli;
pub mod config;
pub mod export;
pub mod governor;
pub mod graph;
pub mod http_server;
pub mod observability;
pub mod serialize;
