//! # Credential Resolution
//!
//! Per-tenant credentials come from environment variables named by
//! convention: `NEO4J_URI_<selector>`, `NEO4J_USERNAME_<selector>`,
//! `NEO4J_PASSWORD_<selector>`, and optionally `NEO4J_DATABASE_<selector>`
//! (server-side database name, defaults to "neo4j").
//!
//! Missing any of the three required entries is a client error that names
//! the selector, so a caller can tell a typo from an unprovisioned tenant.

use std::env;

use super::session::Credentials;

/// Default server-side database name when no override is configured.
pub const DEFAULT_DATABASE: &str = "neo4j";

/// Resolve the credential set for a database selector.
///
/// Returns the selector back as the error value when any required entry is
/// missing; the caller maps that onto a 400 response.
pub fn resolve(selector: &str) -> Result<Credentials, String> {
    if selector.is_empty() {
        return Err(selector.to_string());
    }

    let uri = env::var(format!("NEO4J_URI_{}", selector)).ok();
    let username = env::var(format!("NEO4J_USERNAME_{}", selector)).ok();
    let password = env::var(format!("NEO4J_PASSWORD_{}", selector)).ok();

    match (uri, username, password) {
        (Some(uri), Some(username), Some(password)) => {
            let database = env::var(format!("NEO4J_DATABASE_{}", selector))
                .unwrap_or_else(|_| DEFAULT_DATABASE.to_string());
            Ok(Credentials { uri, username, password, database })
        }
        _ => Err(selector.to_string()),
    }
}
