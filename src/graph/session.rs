//! # Driver Seam
//!
//! Traits the gateway uses to reach the graph database. The database is an
//! external collaborator: the router only ever sees these interfaces.
//!
//! A session is a scoped resource. It is acquired per request, owns the
//! connection exclusively for that request, and is dropped on every exit
//! path. Nothing is pooled or shared across invocations.

use async_trait::async_trait;
use thiserror::Error;

use super::record::GraphRecord;

/// Result type for driver operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Failures at the driver boundary.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// The driver could not be initialized for the resolved credentials
    #[error("driver initialization failed: {0}")]
    ConnectFailed(String),

    /// The database reported a query-level failure
    #[error("database error: {0}")]
    Database(String),

    /// The transport to the database failed mid-request
    #[error("transport error: {0}")]
    Transport(String),
}

/// Connection parameters for one tenant database.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub uri: String,
    pub username: String,
    pub password: String,
    /// Server-side database name (defaults to "neo4j")
    pub database: String,
}

/// Opens scoped sessions against a graph database.
#[async_trait]
pub trait GraphDriver: Send + Sync {
    /// Acquire a session for the given credentials.
    ///
    /// Any failure here surfaces as a driver-initialization error to the
    /// client; nothing is retried.
    async fn session(&self, credentials: &Credentials) -> SessionResult<Box<dyn GraphSession>>;
}

/// A request-scoped query session.
#[async_trait]
pub trait GraphSession: Send + Sync + std::fmt::Debug {
    /// Run one query and materialize the full result set.
    ///
    /// The complete set is needed before the empty-result substitution and
    /// the CSV size guard can be evaluated, so results are consumed eagerly.
    async fn run(&self, query: &str) -> SessionResult<Vec<GraphRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_failure_stage() {
        let err = SessionError::ConnectFailed("refused".to_string());
        assert!(err.to_string().contains("driver initialization failed"));

        let err = SessionError::Database("syntax".to_string());
        assert!(err.to_string().contains("database error"));
    }
}
