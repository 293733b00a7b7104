//! Error types for the platemerge library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum PlateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet read error: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("Spreadsheet write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot parse filename '{name}': {reason}")]
    Filename { name: String, reason: String },

    #[error("Unexpected sheet shape in {path:?}: expected {expected}, found {actual}")]
    ShapeMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Non-numeric cell '{value}' at row {row}, column {col} in {path:?}")]
    InvalidCell {
        path: PathBuf,
        row: usize,
        col: usize,
        value: String,
    },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, PlateError>;
