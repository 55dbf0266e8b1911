// File: crates/capture-core/src/counter.rs
// Summary: Range counter over a sorted series; inclusive counts between two targets.

use log::debug;

use crate::series::{Sorted, SortedSeries, Unsorted};

/// Counts how many values of a series fall inside an inclusive interval.
///
/// Owns its series in the sorted state, so every query runs against
/// ascending data.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeCounter {
    series: SortedSeries<Sorted>,
}

impl RangeCounter {
    /// Sort `series` and wrap it.
    pub fn from_series(series: SortedSeries<Unsorted>) -> Self {
        Self { series: series.sort_ascending() }
    }

    /// Number of values `v` with `target1 <= v <= target2`, duplicates included.
    ///
    /// Computed as `last(target2) - first(target1) + 1`. The targets are not
    /// reordered: with `target1 > target2` the raw difference is returned,
    /// which can be zero or negative.
    pub fn between(&self, target1: f64, target2: f64) -> isize {
        let first = self.series.find_first_occurrence(target1);
        let last = self.series.find_last_occurrence(target2);
        let count = last - first + 1;
        debug!("between({target1}, {target2}): first={first} last={last} count={count}");
        count
    }

    pub fn series(&self) -> &SortedSeries<Sorted> { &self.series }

    pub fn into_series(self) -> SortedSeries<Sorted> { self.series }
}

impl From<SortedSeries<Sorted>> for RangeCounter {
    fn from(series: SortedSeries<Sorted>) -> Self { Self { series } }
}

impl From<SortedSeries<Unsorted>> for RangeCounter {
    fn from(series: SortedSeries<Unsorted>) -> Self { Self::from_series(series) }
}
