use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BikeshareError {
    #[error("Dataset not found: {path}: {reason}")]
    DatasetNotFound { path: PathBuf, reason: String },

    #[error("Malformed timestamp in column '{column}': {reason}")]
    MalformedTimestamp { column: String, reason: String },

    #[error("Malformed number in column '{column}': {reason}")]
    MalformedNumber { column: String, reason: String },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Input closed while waiting for: {0}")]
    InputClosed(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
