//! Application layer errors
//!
//! Error types for application-level operations.

use std::fmt;

use crate::error::Error;

/// Application layer error types
#[derive(Debug)]
pub enum ApplicationError {
    /// Validation error with field and message
    Validation { field: String, message: String },
    /// Domain error wrapper
    Domain(Error),
    /// Database error
    Database(String),
}

impl ApplicationError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a "This field is required." validation error
    pub fn required(field: impl Into<String>) -> Self {
        Self::validation(field, "This field is required.")
    }

    /// Wrap a domain error
    pub fn domain(error: Error) -> Self {
        Self::Domain(error)
    }

    /// Create a database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Whether the caller is at fault
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Validation { .. } => true,
            Self::Domain(e) => e.is_client_error(),
            Self::Database(_) => false,
        }
    }

    /// Field named by a validation error
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { field, message } => write!(f, "{}: {}", field, message),
            Self::Domain(e) => write!(f, "{}", e),
            Self::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for ApplicationError {}

impl From<Error> for ApplicationError {
    fn from(error: Error) -> Self {
        match error {
            Error::Validation { field, message } => Self::Validation { field, message },
            Error::DatabaseError(e) => Self::Database(e.to_string()),
            other => Self::Domain(other),
        }
    }
}

/// Result type for application operations
pub type AppResult<T> = Result<T, ApplicationError>;
