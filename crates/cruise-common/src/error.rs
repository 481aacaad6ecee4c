//! Error types for crossover checking.

use thiserror::Error;

/// Result type alias using CrossoverError.
pub type CrossoverResult<T> = Result<T, CrossoverError>;

/// Primary error type for crossover operations.
#[derive(Debug, Error)]
pub enum CrossoverError {
    // === Input Errors ===
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid dataset ID '{id}': {reason}")]
    InvalidDatasetId { id: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // === Data Errors ===
    #[error("No valid {field} for {dataset_id}")]
    NoValidData {
        dataset_id: String,
        field: &'static str,
    },

    #[error("Data not found for dataset: {0}")]
    DatasetNotFound(String),

    #[error("Failed to read data: {0}")]
    DataReadError(String),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Crossover search cancelled")]
    Cancelled,
}

impl CrossoverError {
    /// Create an InvalidInput error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an InvalidDatasetId error.
    pub fn invalid_dataset_id(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDatasetId {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a NoValidData error.
    pub fn no_valid_data(dataset_id: impl Into<String>, field: &'static str) -> Self {
        Self::NoValidData {
            dataset_id: dataset_id.into(),
            field,
        }
    }

    /// Create a DataReadError.
    pub fn data_read(msg: impl Into<String>) -> Self {
        Self::DataReadError(msg.into())
    }

    /// True for errors caused by the caller's arguments rather than the data.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CrossoverError::InvalidInput(_)
                | CrossoverError::InvalidDatasetId { .. }
                | CrossoverError::InvalidConfig(_)
        )
    }

    /// Short machine-readable category, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            CrossoverError::InvalidInput(_) => "invalid_input",
            CrossoverError::InvalidDatasetId { .. } => "invalid_dataset_id",
            CrossoverError::InvalidConfig(_) => "invalid_config",
            CrossoverError::NoValidData { .. } => "no_valid_data",
            CrossoverError::DatasetNotFound(_) => "not_found",
            CrossoverError::DataReadError(_) | CrossoverError::Io(_) => "io",
            CrossoverError::Cancelled => "cancelled",
        }
    }
}
