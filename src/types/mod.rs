//! Plain data types shared across the sizing engine.

mod sample;
mod span;

pub use sample::{CellChange, Sample};
pub use span::Span;

/// Measured samples grouped by the column they were taken from.
pub type ColumnSamples = std::collections::BTreeMap<u32, Vec<Sample>>;
