//! # Graph Layer
//!
//! Value model for driver results plus the driver seam itself:
//! - value: the `GraphValue` discriminated union (nodes, relationships,
//!   paths, temporals, scalars)
//! - record: ordered result rows
//! - session: `GraphDriver`/`GraphSession` traits and their errors
//! - credentials: per-tenant environment credential lookup
//! - http_driver: production driver over the Neo4j HTTP transactional API
//! - memory: scripted driver for tests and demos

pub mod credentials;
pub mod http_driver;
pub mod memory;
pub mod record;
pub mod session;
pub mod value;

pub use record::GraphRecord;
pub use session::{Credentials, GraphDriver, GraphSession, SessionError, SessionResult};
pub use value::{GraphValue, Node, Path, Properties, Relationship};
