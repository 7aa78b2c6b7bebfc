//! Core error types for Dentquote.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for quote building, persistence and export.
#[derive(Error, Debug)]
pub enum Error {
    /// The live backend is configured but could not be reached.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend was reached but the operation failed.
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("No authenticated identity is available for this operation")]
    Unauthenticated,

    #[error("Document export failed: {0}")]
    Export(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// How an error is presented to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSurface {
    /// Shown next to the offending input; the operation was never attempted.
    Inline,
    /// Shown as a dismissible message; the operation is considered failed.
    Dismissible,
    /// Replaces the page, with a way back to the quote list.
    FullPage,
    /// A generic failure message without details.
    Generic,
}

impl Error {
    pub fn surface(&self) -> ErrorSurface {
        match self {
            Error::Validation(_) => ErrorSurface::Inline,
            Error::NotFound(_) => ErrorSurface::FullPage,
            Error::Unauthenticated | Error::Unexpected(_) => ErrorSurface::Generic,
            Error::BackendUnavailable(_)
            | Error::Database(_)
            | Error::Export(_)
            | Error::InvalidConfigValue(_) => ErrorSurface::Dismissible,
        }
    }

    /// Shorthand for an `InvalidInput` validation error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidInput(message.into()))
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Export(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_surfaces_follow_taxonomy() {
        assert_eq!(
            Error::invalid_input("empty patient name").surface(),
            ErrorSurface::Inline
        );
        assert_eq!(
            Error::BackendUnavailable("connection refused".into()).surface(),
            ErrorSurface::Dismissible
        );
        assert_eq!(
            Error::Database(DatabaseError::QueryFailed("boom".into())).surface(),
            ErrorSurface::Dismissible
        );
        assert_eq!(
            Error::NotFound("quote 42".into()).surface(),
            ErrorSurface::FullPage
        );
        assert_eq!(Error::Unauthenticated.surface(), ErrorSurface::Generic);
    }

    #[test]
    fn test_decimal_parse_error_is_validation() {
        let err: Error = "12.x".parse::<rust_decimal::Decimal>().unwrap_err().into();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::DecimalParse(_))
        ));
    }
}
