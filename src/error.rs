//! Error types for SCBF
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using ScbfError
pub type Result<T> = std::result::Result<T, ScbfError>;

/// Unified error type for SCBF operations
#[derive(Debug, Error)]
pub enum ScbfError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Format Errors
    // -------------------------------------------------------------------------
    /// Structural problem in an SCBF file: bad magic, unknown type code,
    /// truncated metadata, corrupt offset table.
    #[error("Format error: {0}")]
    Format(String),

    /// A requested column name is absent from the file's schema.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    /// A cell value failed to parse as its column's committed type
    /// during the write path.
    #[error("Encoding error: {0}")]
    Encoding(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Collaborator Errors
    // -------------------------------------------------------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Schema error: {0}")]
    Schema(#[from] serde_json::Error),
}
