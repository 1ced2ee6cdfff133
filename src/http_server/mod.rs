//! # HTTP Gateway Surface
//!
//! Router, handler core, error taxonomy, and response shapes:
//! - routes: the per-request state machine
//! - handler: credential resolution, scoped sessions, query execution
//! - errors: failure taxonomy with HTTP status mapping
//! - response: JSON/CSV success payloads
//! - server: bind + serve with the CORS layer

pub mod errors;
pub mod handler;
pub mod response;
pub mod routes;
pub mod server;

pub use errors::{GatewayError, GatewayResult};
pub use handler::{GatewayHandler, QueryRequest};
pub use response::{CsvDocument, QueryResponse, EMPTY_RESULT_MESSAGE};
pub use routes::gateway_routes;
pub use server::GatewayServer;
