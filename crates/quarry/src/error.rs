//! Error types for quarry

use crate::config::AppEnv;
use thiserror::Error;

/// Result type alias for quarry operations
pub type DbResult<T> = Result<T, DbError>;

/// Error types for database operations
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] mysql_async::Error),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Validation error (malformed statement rejected before execution)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl DbError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a unique violation error
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Parse a mysql_async error into a more specific DbError.
    ///
    /// MySQL server error codes:
    /// - 1062 `ER_DUP_ENTRY`
    /// - 1451 `ER_ROW_IS_REFERENCED_2` / 1452 `ER_NO_REFERENCED_ROW_2`
    pub fn from_db_error(err: mysql_async::Error) -> Self {
        if let mysql_async::Error::Server(ref server) = err {
            match server.code {
                1062 => return Self::UniqueViolation(server.message.clone()),
                1451 | 1452 => return Self::ForeignKeyViolation(server.message.clone()),
                _ => {}
            }
        }
        Self::Query(err)
    }

    /// Message safe to surface outside the process.
    ///
    /// Engine-reported messages may leak schema details, so outside of
    /// development mode they are replaced with a generic category line and
    /// must only be logged internally.
    pub fn external_message(&self, env: AppEnv) -> String {
        if env == AppEnv::Development {
            return self.to_string();
        }
        match self {
            Self::Connection(_) => "database connection failed".to_string(),
            Self::Query(_) | Self::Other(_) => "database error".to_string(),
            Self::UniqueViolation(_) => "duplicate entry".to_string(),
            Self::ForeignKeyViolation(_) => "related record constraint".to_string(),
            Self::Decode { .. } => "database error".to_string(),
            Self::NotFound(_) => "not found".to_string(),
            Self::Validation(_) => "invalid request".to_string(),
            Self::Migration(_) => "migration failed".to_string(),
        }
    }
}
