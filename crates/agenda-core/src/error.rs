//! Error types for the scheduling engine.
//!
//! Three families of failure exist and they are handled differently:
//!
//! - **Validation** ([`AgendaError::InvalidInput`]): rejected before any
//!   mutation and returned to the caller.
//! - **Not found** ([`AgendaError::TaskNotFound`] and friends): the operation
//!   is a no-op and the caller decides how to report it.
//! - **Data** ([`AgendaError::InvalidData`]): a stored record cannot be
//!   decoded. Batch operations log and skip these; they never abort a
//!   projection or an aggregate.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all agenda operations.
#[derive(Error, Debug)]
pub enum AgendaError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Task not found for the given ID
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: u64 },
    /// Order not found for the given ID
    #[error("Order with ID {id} not found")]
    OrderNotFound { id: u64 },
    /// Client not found for the given ID
    #[error("Client with ID {id} not found")]
    ClientNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// A stored record that cannot be decoded
    #[error("Invalid data in {record}: {reason}")]
    InvalidData { record: String, reason: String },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> AgendaError {
        AgendaError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> AgendaError {
        AgendaError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl AgendaError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a data error for a stored record.
    pub fn invalid_data(record: impl Into<String>, reason: impl Into<String>) -> Self {
        AgendaError::InvalidData {
            record: record.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error is a validation failure raised before mutation.
    pub fn is_validation(&self) -> bool {
        matches!(self, AgendaError::InvalidInput { .. })
    }

    /// Whether this error reports an unknown or already deleted record.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AgendaError::TaskNotFound { .. }
                | AgendaError::OrderNotFound { .. }
                | AgendaError::ClientNotFound { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| AgendaError::database(message).with_source(e))
    }
}

/// Joins a blocking task, mapping a join failure to a configuration error.
pub(crate) fn join_error(e: tokio::task::JoinError) -> AgendaError {
    AgendaError::Configuration {
        message: format!("Task join error: {e}"),
    }
}

/// Result type alias for agenda operations
pub type Result<T> = std::result::Result<T, AgendaError>;
