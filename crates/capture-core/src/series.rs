// File: crates/capture-core/src/series.rs
// Summary: Numeric series container with typed insertion, explicit sort and first/last occurrence search.
// Notes:
// - Ordering is tracked in the type: `SortedSeries<Unsorted>` accepts new values,
//   `SortedSeries<Sorted>` is only produced by `sort_ascending` and is the only
//   state that exposes the binary searches.

use std::fmt;
use std::marker::PhantomData;

use log::{debug, warn};

use crate::error::{SeriesError, SourceError};
use crate::source::ColumnSource;

/// Marker: values are in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unsorted;

/// Marker: values are in ascending numeric order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sorted;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Unsorted {}
    impl Sealed for super::Sorted {}
}

/// Ordering state of a [`SortedSeries`].
pub trait Order: sealed::Sealed {}
impl Order for Unsorted {}
impl Order for Sorted {}

/// A loosely typed input value handed to [`SortedSeries::insert_integer`].
#[derive(Clone, Debug, PartialEq)]
pub enum Numeric {
    Integer(i128),
    Float(f64),
    Text(String),
}

impl Numeric {
    fn describe(&self) -> String {
        match self {
            Numeric::Integer(v) => format!("integer {v}"),
            Numeric::Float(v) => format!("float {v}"),
            Numeric::Text(s) => format!("text {s:?}"),
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

macro_rules! numeric_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Numeric {
            fn from(v: $t) -> Self { Numeric::Integer(i128::from(v)) }
        })*
    };
}

numeric_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

// pointer-sized integers are at most 64 bits wide
impl From<isize> for Numeric {
    fn from(v: isize) -> Self { Numeric::Integer(v as i128) }
}

impl From<usize> for Numeric {
    fn from(v: usize) -> Self { Numeric::Integer(v as i128) }
}

impl From<f32> for Numeric {
    fn from(v: f32) -> Self { Numeric::Float(f64::from(v)) }
}

impl From<f64> for Numeric {
    fn from(v: f64) -> Self { Numeric::Float(v) }
}

impl From<&str> for Numeric {
    fn from(s: &str) -> Self { Numeric::Text(s.to_string()) }
}

impl From<String> for Numeric {
    fn from(s: String) -> Self { Numeric::Text(s) }
}

/// Owned buffer of `f64` values whose ordering state is carried by `S`.
#[derive(Clone, Debug, PartialEq)]
pub struct SortedSeries<S = Unsorted> {
    values: Vec<f64>,
    _order: PhantomData<S>,
}

impl<S: Order> SortedSeries<S> {
    fn with_values(values: Vec<f64>) -> Self {
        Self { values, _order: PhantomData }
    }

    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub fn get(&self, index: usize) -> Option<f64> { self.values.get(index).copied() }

    pub fn as_slice(&self) -> &[f64] { &self.values }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ { self.values.iter().copied() }
}

impl SortedSeries<Unsorted> {
    pub fn new() -> Self {
        Self::with_values(Vec::new())
    }

    /// Seed a series with `values`, kept in the order given.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        Self::with_values(values.into_iter().collect())
    }

    /// Append a whole-number value. Floats (even integral ones) and text are
    /// rejected and leave the series untouched.
    pub fn insert_integer(&mut self, value: impl Into<Numeric>) -> Result<(), SeriesError> {
        match value.into() {
            Numeric::Integer(v) => {
                self.values.push(v as f64);
                Ok(())
            }
            other => {
                warn!("rejected non-integer insert: {other}");
                Err(SeriesError::TypeMismatch { found: other.describe() })
            }
        }
    }

    /// Append floats verbatim.
    pub fn extend_from_floats(&mut self, values: impl IntoIterator<Item = f64>) {
        let before = self.values.len();
        self.values.extend(values);
        debug!("extended series by {} values", self.values.len() - before);
    }

    /// Read `column` from `source` and append it. Returns the number of values added.
    pub fn extend_from_source<C: ColumnSource + ?Sized>(
        &mut self,
        source: &C,
        column: &str,
    ) -> Result<usize, SourceError> {
        let values = source.read_column(column)?;
        let added = values.len();
        self.values.extend(values);
        debug!("loaded {added} values from column '{column}'");
        Ok(added)
    }

    /// Sort in place by numeric value and move into the sorted state.
    /// Every NaN, whatever its sign bit, sorts after positive infinity.
    pub fn sort_ascending(mut self) -> SortedSeries<Sorted> {
        self.values.sort_by(|a, b| a.partial_cmp(b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan())));
        debug!("sorted series of {} values", self.values.len());
        SortedSeries::with_values(self.values)
    }
}

impl Default for SortedSeries<Unsorted> {
    fn default() -> Self { Self::new() }
}

impl FromIterator<f64> for SortedSeries<Unsorted> {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl From<Vec<f64>> for SortedSeries<Unsorted> {
    fn from(values: Vec<f64>) -> Self { Self::with_values(values) }
}

impl SortedSeries<Sorted> {
    /// Leftmost index holding `target`. When absent, the index at which
    /// `target` would be inserted to keep the order.
    pub fn find_first_occurrence(&self, target: f64) -> isize {
        let mut left: isize = 0;
        let mut right: isize = self.values.len() as isize - 1;
        let mut found = None;

        while left <= right {
            let mid = left + (right - left) / 2;
            let value = self.values[mid as usize];
            if value == target {
                found = Some(mid);
                right = mid - 1;
            } else if value < target {
                left = mid + 1;
            } else {
                right = mid - 1;
            }
        }

        found.unwrap_or(left)
    }

    /// Rightmost index holding `target`. When absent, one before the index at
    /// which `target` would be inserted (so `-1` below every value).
    pub fn find_last_occurrence(&self, target: f64) -> isize {
        let mut left: isize = 0;
        let mut right: isize = self.values.len() as isize - 1;
        let mut found = None;

        while left <= right {
            let mid = left + (right - left) / 2;
            let value = self.values[mid as usize];
            if value == target {
                found = Some(mid);
                left = mid + 1;
            } else if value < target {
                left = mid + 1;
            } else {
                right = mid - 1;
            }
        }

        found.unwrap_or(right)
    }

    /// Drop the ordering guarantee so the series can grow again.
    pub fn into_unsorted(self) -> SortedSeries<Unsorted> {
        SortedSeries::with_values(self.values)
    }
}
