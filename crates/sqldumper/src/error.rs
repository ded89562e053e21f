//! Error types for the dump library.

use thiserror::Error;

/// Main error type for dump operations.
#[derive(Error, Debug)]
pub enum DumpError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source reader error (connection, query, row retrieval)
    #[error("Source reader error: {0}")]
    Source(String),

    /// Failed to enumerate the source tables
    #[error("Failed to get tables: {0}")]
    Enumeration(String),

    /// Failed to fetch or write the schema preamble
    #[error("Could not get database structure: {0}")]
    Structure(String),

    /// A column value has no SQL text representation
    #[error("Cannot convert value of type {type_name} to an SQL literal")]
    UnsupportedType { type_name: &'static str },

    /// Dump failed for a specific table
    #[error("Dump failed for table {table}: {message}")]
    Table { table: String, message: String },

    /// Output sink rejected a write
    #[error("Sink error: {0}")]
    Sink(String),

    /// Output sink could not be closed
    #[error("Failed to close output: {0}")]
    SinkClose(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DumpError {
    /// Create a Table error for a per-table terminal failure
    pub fn table(table: impl Into<String>, message: impl Into<String>) -> Self {
        DumpError::Table {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a Source error from any reader-side failure
    pub fn source(message: impl Into<String>) -> Self {
        DumpError::Source(message.into())
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        // Add error chain for wrapped errors
        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for dump operations.
pub type Result<T> = std::result::Result<T, DumpError>;
