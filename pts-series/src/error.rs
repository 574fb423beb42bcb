/// Error types for time series loading
use chrono::NaiveDateTime;
use thiserror::Error;

/// Main error type for time series operations
#[derive(Error, Debug)]
pub enum SeriesError {
    /// The file could not be read
    #[error("Failed to read time series file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// One or more required columns are absent
    #[error("Columns \"{columns}\" must be in the time series file: \"{path}\"")]
    MissingColumns { columns: String, path: String },

    /// Date parsing failed
    #[error("Failed to parse date {value:?} on row {row}")]
    DateParse { row: usize, value: String },

    /// A numeric cell is neither a number nor a missing-value marker
    #[error("Failed to parse {column} value {value:?} on row {row}")]
    ValueParse {
        row: usize,
        column: String,
        value: String,
    },

    /// Two samples share the same timestamp
    #[error("Timestamps must be strictly increasing, {0} appears more than once")]
    DuplicateTimestamp(NaiveDateTime),
}

/// Type alias for Results using SeriesError
pub type Result<T> = std::result::Result<T, SeriesError>;
