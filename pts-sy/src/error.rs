/// Error types for Sy tables and filters
use thiserror::Error;

/// Main error type for Sy table operations
#[derive(Error, Debug)]
pub enum SyError {
    /// The file could not be read or written
    #[error("Failed to access Sy file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to read or write CSV data
    #[error("Failed to process CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to parse a parameter file
    #[error("Failed to parse Sy parameters: {0}")]
    Params(#[from] serde_json::Error),

    /// One or more of the Sy table columns are absent
    #[error("Columns \"{columns}\" must be in the Sy file: \"{path}\"")]
    MissingColumns { columns: String, path: String },

    /// A filter names a column the Sy table does not have
    #[error("Unknown Sy field: {0:?}")]
    UnknownField(String),

    /// A filter bound does not match the field type (date vs number)
    #[error("Field {field:?} expects a {expected} bound")]
    BoundKind {
        field: String,
        expected: &'static str,
    },
}

/// Type alias for Results using SyError
pub type Result<T> = std::result::Result<T, SyError>;
