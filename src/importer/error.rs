// ==========================================
// Catalog Import - Import layer error types
// ==========================================
// Tool: thiserror derive macro
// Policy: only source-read errors are batch-fatal; everything past row
// processing start degrades row- or column-locally
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Import layer errors.
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Source-read errors (batch-fatal) =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (expected .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("file read failed: {0}")]
    FileReadError(String),

    #[error("excel parse failed: {0}")]
    ExcelParseError(String),

    #[error("csv parse failed: {0}")]
    CsvParseError(String),

    // ===== Row-local errors =====
    #[error("required cell missing (row {row}): {field} is empty")]
    MissingRequiredField { row: usize, field: String },

    // ===== Datastore errors =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result alias for the import layer.
pub type ImportResult<T> = Result<T, ImportError>;
