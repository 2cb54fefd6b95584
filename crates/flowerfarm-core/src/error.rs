//! Error types for Flower Farm

use thiserror::Error;

/// Result type alias using Flower Farm's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Flower Farm error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Validation errors (E001-E099)
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    // Database errors (E400-E499)
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    // Sync errors (E500-E599)
    #[error("Import failed at line {line}: {reason}")]
    ImportFailed { line: usize, reason: String },

    // Generic errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error for a named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the caller sent bad data, as opposed to an infrastructure fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "E001",
            Self::DatabaseError(_) => "E400",
            Self::Parse(_) => "E401",
            Self::ImportFailed { .. } => "E500",
            Self::Io(_) | Self::Json(_) => "E9999",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::DatabaseError(_) => Some("flowerfarm doctor".to_string()),
            Self::ImportFailed { .. } => {
                Some("Check the file was produced by `flowerfarm export`".to_string())
            }
            _ => None,
        }
    }
}
