//! Error types for DSG file reading.

use cruise_common::CrossoverError;
use thiserror::Error;

/// Result type for DSG reader operations.
pub type DsgResult<T> = Result<T, DsgError>;

/// Error types for DSG file reading.
#[derive(Error, Debug)]
pub enum DsgError {
    /// No data file exists for the dataset
    #[error("DSG file not found: {0}")]
    NotFound(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Missing required variable
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl From<DsgError> for CrossoverError {
    fn from(err: DsgError) -> Self {
        match err {
            DsgError::NotFound(path) => CrossoverError::DatasetNotFound(path),
            DsgError::IoError(e) => CrossoverError::Io(e),
            other => CrossoverError::data_read(other.to_string()),
        }
    }
}
