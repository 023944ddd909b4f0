//! Error handling for ClassRoster
//!
//! This module defines the main error type used throughout the application,
//! the classification of failures into caller-visible kinds, and the mapping
//! of those kinds onto HTTP-style status codes at the request boundary.

use thiserror::Error;

/// Main error type for ClassRoster
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Student not found: {email}")]
    StudentNotFound { email: String },

    #[error("Failed to {operation}: {source}")]
    ServiceFailure {
        operation: &'static str,
        #[source]
        source: Box<RosterError>,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ClassRoster operations
pub type Result<T> = std::result::Result<T, RosterError>;

/// Caller-visible classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ServiceFailure,
    InvalidInput,
    Infrastructure,
}

impl RosterError {
    /// Wrap a failure with the name of the domain operation it interrupted
    pub fn service_failure(operation: &'static str, source: RosterError) -> Self {
        RosterError::ServiceFailure {
            operation,
            source: Box::new(source),
        }
    }

    /// Get the caller-visible kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RosterError::StudentNotFound { .. } => ErrorKind::NotFound,
            RosterError::ServiceFailure { .. } => ErrorKind::ServiceFailure,
            RosterError::InvalidInput(_) => ErrorKind::InvalidInput,
            _ => ErrorKind::Infrastructure,
        }
    }

    /// Follow `ServiceFailure` wrappers down to the underlying cause
    pub fn root_cause(&self) -> &RosterError {
        match self {
            RosterError::ServiceFailure { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// HTTP status code the request boundary reports for this error
    pub fn status_code(&self) -> u16 {
        match self.root_cause() {
            RosterError::InvalidInput(_) => 400,
            RosterError::StudentNotFound { .. } => 404,
            RosterError::Conflict(_) => 409,
            RosterError::Database(sqlx::Error::RowNotFound) => 404,
            RosterError::Database(sqlx::Error::Database(db_err)) => {
                if db_err.is_unique_violation() {
                    409
                } else if db_err.is_foreign_key_violation() {
                    400
                } else {
                    500
                }
            }
            _ => 500,
        }
    }

    /// Message the request boundary reports for this error
    pub fn public_message(&self) -> String {
        match self.root_cause() {
            RosterError::Conflict(_) => "Resource already exists".to_string(),
            RosterError::Database(sqlx::Error::RowNotFound) => "Resource not found".to_string(),
            RosterError::Database(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                "Resource already exists".to_string()
            }
            RosterError::Database(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                "Invalid reference to related resource".to_string()
            }
            RosterError::InvalidInput(message) => message.clone(),
            RosterError::StudentNotFound { .. } => "Student not found".to_string(),
            _ => self.to_string(),
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self.root_cause() {
            RosterError::Database(sqlx::Error::RowNotFound) => ErrorSeverity::Warning,
            RosterError::Database(_) => ErrorSeverity::Critical,
            RosterError::Migration(_) => ErrorSeverity::Critical,
            RosterError::Config(_) => ErrorSeverity::Critical,
            RosterError::StudentNotFound { .. } => ErrorSeverity::Warning,
            RosterError::Conflict(_) => ErrorSeverity::Warning,
            RosterError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
