// File: crates/capture-core/src/error.rs
// Summary: Error types for series insertion and column ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while growing a series.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SeriesError {
    /// `insert_integer` was handed something that is not a whole-number type.
    #[error("only integers accepted, got {found}")]
    TypeMismatch { found: String },
}

/// Errors raised by a [`ColumnSource`](crate::ColumnSource) while producing a column.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The tabular source does not exist.
    #[error("source not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The requested column is absent from the source header.
    #[error("column '{column}' not present in source")]
    Schema { column: String },

    /// A cell in the requested column could not be read as a float.
    #[error("row {row}: '{value}' is not a number")]
    Malformed { row: usize, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The source could be opened but its layout could not be decoded.
    #[error("unreadable source: {0}")]
    Format(String),
}
