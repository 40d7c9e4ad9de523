//! Error types for sqlstage

use thiserror::Error;

/// Result type alias for sqlstage operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Error types for statement building and execution
#[derive(Debug, Error)]
pub enum SqlError {
    /// A builder call received an argument it cannot accept
    /// (empty list, empty identifier, empty alias).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error reported by the SQLite driver during prepare/bind/execute
    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Error reported by any other connection backend
    #[error("Connection error: {0}")]
    Connection(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl SqlError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this error came from the database layer
    pub fn is_database_error(&self) -> bool {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Database(_) => true,
            Self::Connection(_) => true,
            _ => false,
        }
    }
}
