//! Values handed between the sampler, the measurement surface and the hooks.

/// A representative value chosen to stand in for a column's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Display text to measure.
    pub value: String,
    /// Source row, or `None` for a column header label.
    pub row: Option<u32>,
}

impl Sample {
    /// A sample taken from a data cell.
    pub fn cell(row: u32, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            row: Some(row),
        }
    }

    /// A sample taken from the column header.
    pub fn header(label: impl Into<String>) -> Self {
        Self {
            value: label.into(),
            row: None,
        }
    }

    /// True if this sample came from the column header.
    pub fn is_header(&self) -> bool {
        self.row.is_none()
    }
}

/// A single cell edit, as reported by the host before it is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellChange {
    pub row: u32,
    pub col: u32,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl CellChange {
    /// Create a change record for `(row, col)`.
    pub fn new(row: u32, col: u32, old_value: Option<String>, new_value: Option<String>) -> Self {
        Self {
            row,
            col,
            old_value,
            new_value,
        }
    }
}
