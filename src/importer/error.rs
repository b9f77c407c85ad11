// ==========================================
// Retail standard assortment engine - import error types
// ==========================================

use std::path::PathBuf;
use thiserror::Error;

// ==========================================
// Import error enum
// ==========================================
#[derive(Error, Debug)]
pub enum ImportError {
    // ==========================================
    // File-level errors
    // ==========================================
    #[error("Input file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    // ==========================================
    // Row-level errors
    // ==========================================
    // Header or column mismatches surface through the Csv variant;
    // only the typed numeric conversion carries its own context.
    #[error("Row {row}: cannot convert field '{field}': {message}")]
    TypeConversion {
        row: usize,
        field: String,
        message: String,
    },

    // ==========================================
    // Other errors
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// Result type alias
// ==========================================
pub type ImportResult<T> = Result<T, ImportError>;
