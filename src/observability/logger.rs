//! Structured JSON logger
//!
//! One log line = one event, synchronous, no buffering. The event name
//! always comes first, then severity, then caller fields in the order
//! given. Errors are logged with full diagnostic context here before the
//! client-facing message is reduced.

use std::fmt;
use std::io::{self, Write};

use serde_json::{Map, Value};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operations
    Info = 0,
    /// Recoverable issues
    Warn = 1,
    /// Operation failures
    Error = 2,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured logger writing one JSON object per line.
pub struct Logger;

impl Logger {
    /// Log at INFO level to stdout.
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::write(Severity::Info, event, fields, &mut io::stdout());
    }

    /// Log at WARN level to stdout.
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::write(Severity::Warn, event, fields, &mut io::stdout());
    }

    /// Log at ERROR level to stderr.
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::write(Severity::Error, event, fields, &mut io::stderr());
    }

    fn write<W: Write>(severity: Severity, event: &str, fields: &[(&str, &str)], out: &mut W) {
        let line = Self::render(severity, event, fields);
        let _ = out.write_all(line.as_bytes());
        let _ = out.flush();
    }

    /// Render the event as one JSON line. serde_json handles escaping;
    /// insertion order is preserved so the event name always leads.
    fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut object = Map::new();
        object.insert("event".to_string(), Value::String(event.to_string()));
        object.insert(
            "severity".to_string(),
            Value::String(severity.as_str().to_string()),
        );
        for (key, value) in fields {
            object.insert(key.to_string(), Value::String(value.to_string()));
        }

        let mut line = Value::Object(object).to_string();
        line.push('\n');
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_render_is_valid_json_line() {
        let line = Logger::render(Severity::Info, "request_received", &[("method", "GET")]);
        assert!(line.ends_with('\n'));

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "request_received");
        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["method"], "GET");
    }

    #[test]
    fn test_event_name_leads() {
        let line = Logger::render(Severity::Error, "query_failed", &[("db", "movies")]);
        let event_pos = line.find("\"event\"").unwrap();
        let severity_pos = line.find("\"severity\"").unwrap();
        let field_pos = line.find("\"db\"").unwrap();
        assert!(event_pos < severity_pos);
        assert!(severity_pos < field_pos);
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let line = Logger::render(Severity::Warn, "odd", &[("msg", "a \"b\"\nc")]);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["msg"], "a \"b\"\nc");
        assert_eq!(line.matches('\n').count(), 1);
    }
}
