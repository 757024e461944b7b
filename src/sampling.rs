//! Sample selection: pick a bounded set of cell values per column.
//!
//! Measuring every cell of a large column is wasteful. The width of a column
//! is decided by its longest values, so the default sampler groups values by
//! character length and keeps a few of each length.

use std::collections::BTreeMap;

use crate::host::GridHost;
use crate::types::{ColumnSamples, Sample, Span};

/// Default number of samples kept per distinct value length.
pub const SAMPLE_COUNT: usize = 3;

/// Chooses representative values for a column over a row range.
pub trait SampleSelector {
    /// Samples for `col` over `rows`, keyed by column.
    ///
    /// The result may contain other columns too; callers iterate the map.
    fn generate_column_samples(&mut self, grid: &dyn GridHost, col: u32, rows: Span)
        -> ColumnSamples;
}

/// Keeps up to `sample_count` values for every distinct value length.
#[derive(Debug, Clone)]
pub struct LengthSampler {
    sample_count: usize,
    allow_duplicates: bool,
}

impl Default for LengthSampler {
    fn default() -> Self {
        Self::new(SAMPLE_COUNT, false)
    }
}

impl LengthSampler {
    /// Create a sampler. A `sample_count` of 0 is raised to 1.
    pub fn new(sample_count: usize, allow_duplicates: bool) -> Self {
        Self {
            sample_count: sample_count.max(1),
            allow_duplicates,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn allow_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    /// Bucket the values of one column by length.
    fn sample_column(&self, grid: &dyn GridHost, col: u32, rows: Span) -> Vec<Sample> {
        let mut buckets: BTreeMap<usize, Vec<Sample>> = BTreeMap::new();

        for row in rows.iter() {
            let value = grid.data_at_cell(row, col).unwrap_or_default();
            let bucket = buckets.entry(value.chars().count()).or_default();
            if bucket.len() >= self.sample_count {
                continue;
            }
            if !self.allow_duplicates && bucket.iter().any(|s| s.value == value) {
                continue;
            }
            bucket.push(Sample::cell(row, value));
        }

        buckets.into_values().flatten().collect()
    }
}

impl SampleSelector for LengthSampler {
    fn generate_column_samples(
        &mut self,
        grid: &dyn GridHost,
        col: u32,
        rows: Span,
    ) -> ColumnSamples {
        let mut samples = ColumnSamples::new();
        samples.insert(col, self.sample_column(grid, col, rows));
        samples
    }
}
