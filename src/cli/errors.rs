//! CLI error type

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Failures surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("server error: {0}")]
    Server(String),

    /// A checked query was rejected; carries a non-zero exit
    #[error("query rejected")]
    QueryRejected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CliError::Config("missing file".into()).to_string(),
            "configuration error: missing file"
        );
        assert_eq!(CliError::QueryRejected.to_string(), "query rejected");
    }
}
