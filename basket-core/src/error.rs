//! Error types for the Basket mining library.
//!
//! This module provides the error handling strategy for the crate using
//! `thiserror` for automatic error trait implementations. All errors in
//! Basket are represented by the [`BasketError`] enum.
//!
//! The taxonomy is deliberately narrow: an empty dataset, a column that
//! never qualifies as a transaction source, or a run that produces no rules
//! are all ordinary (empty) results, not errors. Errors are reserved for
//! failures of the data layer, invalid configuration, and serialization.

use thiserror::Error;

/// The main error type for the Basket library.
#[derive(Error, Debug)]
pub enum BasketError {
    /// DataFusion query execution error from the extraction layer.
    #[error("Query execution failed: {0}")]
    QueryExecution(#[from] datafusion::error::DataFusionError),

    /// Error from Arrow operations.
    #[error("Arrow computation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// A designated transaction column is not present in the dataset.
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Invalid configuration or mining parameters.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Data type mismatch or unexpected data shape.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, BasketError>`.
///
/// This is the standard `Result` type used throughout the Basket library.
pub type Result<T> = std::result::Result<T, BasketError>;

impl BasketError {
    /// Creates an invalid configuration error with the given message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Creates an invalid data error with the given message.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Creates a column-not-found error for the given column.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Converts serde_json errors into serialization errors.
impl From<serde_json::Error> for BasketError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
