// File: crates/capture-core/src/lib.rs
// Summary: Core library entry point; exports the series container, range counter and ingestion seam.

pub mod counter;
pub mod error;
pub mod series;
pub mod source;

pub use counter::RangeCounter;
pub use error::{SeriesError, SourceError};
pub use series::{Numeric, Sorted, SortedSeries, Unsorted};
pub use source::ColumnSource;
