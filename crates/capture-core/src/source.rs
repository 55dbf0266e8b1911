// File: crates/capture-core/src/source.rs
// Summary: Ingestion seam; anything that can hand the core a column of floats.

use crate::error::SourceError;

/// A tabular source that can produce one named column as floats.
///
/// Row order is preserved and duplicates are kept. Implementations own all
/// I/O and parsing; the series only ever sees the finished values.
pub trait ColumnSource {
    fn read_column(&self, column: &str) -> Result<Vec<f64>, SourceError>;
}

