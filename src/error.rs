//! Error types for the MySQL MCP Server.
//!
//! This module defines all error types using `thiserror` for ergonomic error
//! handling. Each variant carries an actionable message so the calling AI
//! assistant can understand and recover from the failure. All of them are
//! converted into tool-error results at the dispatch boundary; none of them
//! terminate the server process.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Connection failed: {message}")]
    Connection { message: String, suggestion: String },

    #[error("Query failed: {message}")]
    Query {
        message: String,
        /// e.g., "42S02" for unknown table
        sql_state: Option<String>,
        suggestion: String,
    },

    #[error("Invalid argument: {message}")]
    Argument { message: String },

    #[error("Formatting failed: {message}")]
    Format { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ServerError {
    /// Create a connection error with a helpful suggestion.
    pub fn connection(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a query error with optional SQLSTATE code.
    pub fn query(
        message: impl Into<String>,
        sql_state: Option<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Query {
            message: message.into(),
            sql_state,
            suggestion: suggestion.into(),
        }
    }

    /// Create an argument error.
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }

    /// Create a formatting error. These are treated as bugs and surfaced
    /// rather than silently coerced.
    pub fn format_error(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Connection { suggestion, .. } => Some(suggestion),
            Self::Query { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }

    /// Check if this error is a caller mistake (as opposed to a database or
    /// server fault). Caller mistakes are never retried.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Argument { .. })
    }

    /// Render this error as the text of a tool-error result, including the
    /// suggestion when one is available.
    pub fn tool_message(&self) -> String {
        match self.suggestion() {
            Some(s) => format!("{self}. {s}."),
            None => self.to_string(),
        }
    }
}

/// Convert sqlx errors to ServerError.
impl From<sqlx::Error> for ServerError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(msg) => ServerError::connection(
                msg.to_string(),
                "Check MYSQL_HOST/MYSQL_PORT/MYSQL_USER/MYSQL_PASSWORD/MYSQL_DATABASE",
            ),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                ServerError::query(
                    db_err.message(),
                    code,
                    "Check the SQL syntax and referenced objects",
                )
            }
            sqlx::Error::RowNotFound => ServerError::query(
                "No rows returned",
                None,
                "Verify the query conditions match existing data",
            ),
            sqlx::Error::PoolTimedOut => ServerError::connection(
                "Timed out waiting for the database connection",
                "Another request may be holding the connection; retry shortly",
            ),
            sqlx::Error::PoolClosed => ServerError::connection(
                "Connection pool is closed",
                "The server is shutting down or reconnecting",
            ),
            sqlx::Error::Io(io_err) => ServerError::connection(
                format!("I/O error: {}", io_err),
                "Check network connectivity and MySQL server status",
            ),
            sqlx::Error::Tls(tls_err) => ServerError::connection(
                format!("TLS error: {}", tls_err),
                "Verify TLS configuration and certificates",
            ),
            sqlx::Error::Protocol(msg) => ServerError::connection(
                format!("Protocol error: {}", msg),
                "Check MySQL server compatibility",
            ),
            sqlx::Error::ColumnIndexOutOfBounds { index, len } => ServerError::internal(format!(
                "Column index {} out of bounds (len: {})",
                index, len
            )),
            sqlx::Error::ColumnDecode { index, source } => ServerError::format_error(format!(
                "Failed to decode column {}: {}",
                index, source
            )),
            sqlx::Error::Decode(source) => {
                ServerError::format_error(format!("Decode error: {}", source))
            }
            sqlx::Error::WorkerCrashed => ServerError::internal("Database worker crashed"),
            _ => ServerError::internal(format!("Unknown database error: {}", err)),
        }
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ServerError::connection("refused", "Check credentials");
        assert!(err.to_string().contains("Connection failed"));
    }

    #[test]
    fn test_error_suggestion() {
        let err = ServerError::query("Syntax error", Some("42000".to_string()), "Check SQL syntax");
        assert_eq!(err.suggestion(), Some("Check SQL syntax"));
        assert!(ServerError::argument("bad").suggestion().is_none());
    }

    #[test]
    fn test_tool_message_includes_suggestion() {
        let err = ServerError::connection("refused", "Check credentials");
        let msg = err.tool_message();
        assert!(msg.contains("refused"));
        assert!(msg.contains("Check credentials"));
    }

    #[test]
    fn test_tool_message_without_suggestion() {
        let err = ServerError::argument("database must not be empty");
        assert_eq!(err.tool_message(), "Invalid argument: database must not be empty");
    }

    #[test]
    fn test_caller_error_classification() {
        assert!(ServerError::argument("bad").is_caller_error());
        assert!(!ServerError::connection("err", "sugg").is_caller_error());
        assert!(!ServerError::internal("oops").is_caller_error());
    }

    #[test]
    fn test_row_not_found_maps_to_query_error() {
        let err: ServerError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ServerError::Query { .. }));
    }

    #[test]
    fn test_pool_closed_maps_to_connection_error() {
        let err: ServerError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, ServerError::Connection { .. }));
    }
}
