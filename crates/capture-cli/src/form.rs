// File: crates/capture-cli/src/form.rs
// Summary: Query form; validates raw text inputs, loads the column and renders the range count.

use std::fmt;
use std::path::Path;

use capture_core::{ColumnSource, RangeCounter, SortedSeries, SourceError};
use log::warn;

/// The four text fields a user fills in, exactly as typed.
#[derive(Clone, Debug, Default)]
pub struct QueryForm {
    pub path: String,
    pub column: String,
    pub target1: String,
    pub target2: String,
}

/// Result of submitting a [`QueryForm`].
#[derive(Clone, Debug, PartialEq)]
pub enum FormOutcome {
    Count(isize),
    MissingFields,
    InvalidTargets,
    TargetsOutOfOrder,
    FileNotFound,
    InvalidColumn,
    InvalidValue(String),
    ReadFailed(String),
}

impl FormOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FormOutcome::Count(_))
    }
}

impl fmt::Display for FormOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormOutcome::Count(n) => write!(f, "Quantity of numbers between the targets: {n}"),
            FormOutcome::MissingFields => f.write_str("Please enter all the required fields."),
            FormOutcome::InvalidTargets => f.write_str("Please enter valid floats for targets."),
            FormOutcome::TargetsOutOfOrder => f.write_str("Target 1 should be smaller than Target 2."),
            FormOutcome::FileNotFound => f.write_str("CSV file not found."),
            FormOutcome::InvalidColumn => f.write_str("Invalid column name."),
            FormOutcome::InvalidValue(detail) => write!(f, "Invalid value in column: {detail}"),
            FormOutcome::ReadFailed(detail) => write!(f, "Could not read CSV file: {detail}"),
        }
    }
}

impl From<SourceError> for FormOutcome {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NotFound { .. } => FormOutcome::FileNotFound,
            SourceError::Schema { .. } => FormOutcome::InvalidColumn,
            e @ SourceError::Malformed { .. } => FormOutcome::InvalidValue(e.to_string()),
            e => FormOutcome::ReadFailed(e.to_string()),
        }
    }
}

impl QueryForm {
    /// Validate the fields, read the column through `open(path)` and count.
    pub fn submit<C, F>(&self, open: F) -> FormOutcome
    where
        C: ColumnSource,
        F: FnOnce(&Path) -> C,
    {
        let fields = [&self.path, &self.column, &self.target1, &self.target2];
        if fields.iter().any(|f| f.is_empty()) {
            return FormOutcome::MissingFields;
        }

        let (target1, target2) = match (self.target1.trim().parse::<f64>(), self.target2.trim().parse::<f64>()) {
            (Ok(a), Ok(b)) => (a, b),
            _ => return FormOutcome::InvalidTargets,
        };
        if target1 >= target2 {
            return FormOutcome::TargetsOutOfOrder;
        }

        let source = open(Path::new(&self.path));
        let mut series = SortedSeries::new();
        if let Err(e) = series.extend_from_source(&source, &self.column) {
            warn!("loading '{}' from {} failed: {e}", self.column, self.path);
            return e.into();
        }

        let counter = RangeCounter::from_series(series);
        FormOutcome::Count(counter.between(target1, target2))
    }
}
