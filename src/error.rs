//! Error types for fedsql.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for fedsql operations.
#[derive(Error, Debug)]
pub enum DemoError {
    /// Database or query engine connection errors (host unreachable, auth failed, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution errors (syntax errors, engine-reported failures, timeouts, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration errors (invalid config file, bad connection string, missing database file, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A row whose value count differs from the column count.
    #[error("Shape mismatch: row {row} has {found} values, expected {expected}")]
    ShapeMismatch {
        /// Zero-based index of the offending row.
        row: usize,
        /// Number of declared columns.
        expected: usize,
        /// Number of values in the row.
        found: usize,
    },

    /// I/O errors while writing output or touching database files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DemoError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Config(_) => "Configuration Error",
            Self::ShapeMismatch { .. } => "Shape Mismatch",
            Self::Io(_) => "I/O Error",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// Returns true if this is a connection error.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Result type alias using DemoError.
pub type Result<T> = std::result::Result<T, DemoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_connection() {
        let err = DemoError::connection("Cannot connect to localhost:5432");
        assert_eq!(
            err.to_string(),
            "Connection error: Cannot connect to localhost:5432"
        );
        assert_eq!(err.category(), "Connection Error");
        assert!(err.is_connection());
    }

    #[test]
    fn test_error_display_query() {
        let err = DemoError::query("TABLE_NOT_FOUND: Table sqlite.default.nope does not exist");
        assert_eq!(
            err.to_string(),
            "Query error: TABLE_NOT_FOUND: Table sqlite.default.nope does not exist"
        );
        assert_eq!(err.category(), "Query Error");
        assert!(!err.is_connection());
    }

    #[test]
    fn test_error_display_config() {
        let err = DemoError::config("missing field 'host' in presto");
        assert_eq!(
            err.to_string(),
            "Configuration error: missing field 'host' in presto"
        );
        assert_eq!(err.category(), "Configuration Error");
    }

    #[test]
    fn test_error_display_shape_mismatch() {
        let err = DemoError::ShapeMismatch {
            row: 3,
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "Shape mismatch: row 3 has 2 values, expected 3"
        );
        assert_eq!(err.category(), "Shape Mismatch");
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: DemoError = io.into();
        assert_eq!(err.category(), "I/O Error");
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_error_display_internal() {
        let err = DemoError::internal("unexpected state");
        assert_eq!(err.to_string(), "Internal error: unexpected state");
        assert_eq!(err.category(), "Internal Error");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DemoError>();
    }
}
