//! Unified error types for dynamostore.
//!
//! Backend adapters, the codec, and the provisioner all map their failures
//! into [`StoreError`] so callers see one error type regardless of which
//! layer failed.

use std::fmt;
use thiserror::Error;

/// Error kind categorization used across the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A call to the underlying key-value service failed.
    Backend,
    /// The table exists but is being deleted.
    DeleteInProgress,
    /// The table did not become active within the bounded wait.
    CreateTimedOut,
    /// The backend reported a table status outside the known set.
    UnrecognizedTableStatus,
    /// A stored item could not be decoded into a session record.
    Decode,
    /// A configuration error occurred.
    Configuration,
    /// A serialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend => write!(f, "BACKEND"),
            Self::DeleteInProgress => write!(f, "DELETE_IN_PROGRESS"),
            Self::CreateTimedOut => write!(f, "CREATE_TIMED_OUT"),
            Self::UnrecognizedTableStatus => write!(f, "UNRECOGNIZED_TABLE_STATUS"),
            Self::Decode => write!(f, "DECODE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified error used throughout dynamostore.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct StoreError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a backend error without an underlying cause.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Backend, message)
    }

    /// Create a delete-in-progress error for the given table.
    pub fn delete_in_progress(table: &str) -> Self {
        Self::new(
            ErrorKind::DeleteInProgress,
            format!("table deletion in progress: '{table}'"),
        )
    }

    /// Create a create-timed-out error for the given table.
    pub fn create_timed_out(table: &str, attempts: u32) -> Self {
        Self::new(
            ErrorKind::CreateTimedOut,
            format!("timed out waiting for table creation: '{table}' after {attempts} attempts"),
        )
    }

    /// Create an unrecognized-status error.
    pub fn unrecognized_status(table: &str, status: &str) -> Self {
        Self::new(
            ErrorKind::UnrecognizedTableStatus,
            format!("unrecognized table status for '{table}': {status}"),
        )
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for StoreError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for StoreError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
