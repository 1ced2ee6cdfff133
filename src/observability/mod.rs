//! # Observability
//!
//! Structured logging for the gateway. Every error is logged with full
//! context before being reduced to a client-facing message; connection
//! URIs and credentials never appear in log fields.

pub mod logger;

pub use logger::{Logger, Severity};
