//! Error types module
//!
//! All errors in the upload pipeline are unified under the [`AppError`] enum.
//! The request-fatal variants (`InvalidInput`, `NoFileField`, `MissingConfig`,
//! `NoValidFiles`) are the only ones that reach the HTTP caller; everything
//! else is absorbed per file by the orchestrator and surfaces in logs only.

use std::io;

use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No file field in multipart request")]
    NoFileField,

    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("No valid files in upload")]
    NoValidFiles,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("UUID parsing error: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl AppError {
    /// HTTP status code this error maps to at the API boundary.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::Database(_) => 500,
            AppError::Storage(_) => 502,
            AppError::InvalidInput(_) => 400,
            AppError::NoFileField => 400,
            AppError::MissingConfig(_) => 500,
            AppError::NoValidFiles => 422,
            AppError::NotFound(_) => 404,
            AppError::Internal(_) => 500,
        }
    }

    /// Machine-readable error code for programmatic handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::Storage(_) => "storage_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NoFileField => "no_file_field",
            AppError::MissingConfig(_) => "missing_configuration",
            AppError::NoValidFiles => "no_valid_files",
            AppError::NotFound(_) => "not_found",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Log level for this error when it reaches the API boundary.
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_)
            | AppError::NoFileField
            | AppError::NoValidFiles
            | AppError::NotFound(_) => LogLevel::Debug,
            AppError::Storage(_) => LogLevel::Warn,
            AppError::Database(_) | AppError::MissingConfig(_) | AppError::Internal(_) => {
                LogLevel::Error
            }
        }
    }
}
