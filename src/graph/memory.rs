//! # In-Memory Driver
//!
//! Canned-response driver used by the test suite and local demos.
//!
//! In production the gateway talks to a real database through
//! [`HttpGraphDriver`](super::http_driver::HttpGraphDriver); this
//! implementation answers every query from a fixed script instead.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::record::GraphRecord;
use super::session::{Credentials, GraphDriver, GraphSession, SessionError, SessionResult};

#[derive(Debug, Default)]
struct Script {
    /// Results keyed by exact query text
    scripted: HashMap<String, Vec<GraphRecord>>,
    /// Fallback for queries with no script entry
    default_result: Vec<GraphRecord>,
    /// When set, session acquisition fails with this message
    fail_connect: Option<String>,
    /// When set, every query fails with this message
    fail_query: Option<String>,
    /// When set, every query hangs forever (for deadline tests)
    hang: bool,
    /// Queries observed across all sessions, for assertions
    executed: Mutex<Vec<String>>,
}

/// Driver whose sessions replay scripted results.
#[derive(Default)]
pub struct InMemoryGraphDriver {
    script: Arc<Script>,
}

impl InMemoryGraphDriver {
    pub fn new() -> Self {
        Self::default()
    }

    fn script_mut(&mut self) -> &mut Script {
        Arc::get_mut(&mut self.script).expect("driver configured after sessions were opened")
    }

    /// Script the result for one exact query string.
    pub fn with_result(mut self, query: impl Into<String>, records: Vec<GraphRecord>) -> Self {
        self.script_mut().scripted.insert(query.into(), records);
        self
    }

    /// Result returned for any unscripted query.
    pub fn with_default_result(mut self, records: Vec<GraphRecord>) -> Self {
        self.script_mut().default_result = records;
        self
    }

    /// Make session acquisition fail.
    pub fn failing_connect(mut self, message: impl Into<String>) -> Self {
        self.script_mut().fail_connect = Some(message.into());
        self
    }

    /// Make every query fail at the database layer.
    pub fn failing_query(mut self, message: impl Into<String>) -> Self {
        self.script_mut().fail_query = Some(message.into());
        self
    }

    /// Make every query hang until the caller's deadline fires.
    pub fn hanging(mut self) -> Self {
        self.script_mut().hang = true;
        self
    }

    /// Queries that reached the driver, in execution order.
    pub fn executed_queries(&self) -> Vec<String> {
        self.script.executed.lock().expect("executed queries lock").clone()
    }
}

#[async_trait]
impl GraphDriver for InMemoryGraphDriver {
    async fn session(&self, _credentials: &Credentials) -> SessionResult<Box<dyn GraphSession>> {
        if let Some(message) = &self.script.fail_connect {
            return Err(SessionError::ConnectFailed(message.clone()));
        }
        Ok(Box::new(InMemorySession { script: Arc::clone(&self.script) }))
    }
}

#[derive(Debug)]
struct InMemorySession {
    script: Arc<Script>,
}

#[async_trait]
impl GraphSession for InMemorySession {
    async fn run(&self, query: &str) -> SessionResult<Vec<GraphRecord>> {
        self.script
            .executed
            .lock()
            .expect("executed queries lock")
            .push(query.to_string());

        if self.script.hang {
            std::future::pending::<()>().await;
        }
        if let Some(message) = &self.script.fail_query {
            return Err(SessionError::Database(message.clone()));
        }
        Ok(self
            .script
            .scripted
            .get(query)
            .cloned()
            .unwrap_or_else(|| self.script.default_result.clone()))
    }
}
