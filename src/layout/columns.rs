//! Pre-computed column positions.
//!
//! Built from the resolved column widths whenever the host re-adjusts its
//! layout, enabling O(log n) column lookup by x coordinate.

/// Default column width in pixels when nothing was measured or configured.
pub const DEFAULT_COL_WIDTH: f32 = 50.0;

/// Cumulative column positions for a grid.
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout {
    /// `col_positions[i]` = x of column i's left edge, plus the final edge
    pub col_positions: Vec<f32>,
    /// Resolved width of each column
    pub col_widths: Vec<f32>,
}

impl ColumnLayout {
    /// Lay out `col_count` columns, asking `width_of` for each one and falling
    /// back to [`DEFAULT_COL_WIDTH`].
    pub fn new(col_count: u32, width_of: impl Fn(u32) -> Option<f32>) -> Self {
        let mut col_positions = Vec::with_capacity(col_count as usize + 1);
        let mut col_widths = Vec::with_capacity(col_count as usize);
        let mut x: f32 = 0.0;

        for col in 0..col_count {
            col_positions.push(x);
            let w = width_of(col).unwrap_or(DEFAULT_COL_WIDTH).max(0.0);
            col_widths.push(w);
            x += w;
        }
        col_positions.push(x); // Final edge

        Self {
            col_positions,
            col_widths,
        }
    }

    /// Number of laid out columns.
    pub fn col_count(&self) -> u32 {
        u32::try_from(self.col_widths.len()).unwrap_or(u32::MAX)
    }

    /// Find the column at x position (binary search).
    pub fn col_at_x(&self, x: f32) -> Option<u32> {
        let last = self.col_count().checked_sub(1)?;
        let idx = match self
            .col_positions
            .binary_search_by(|pos| pos.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal))
        {
            Ok(i) => u32::try_from(i).ok()?,
            Err(i) => u32::try_from(i.saturating_sub(1)).ok()?,
        };
        Some(idx.min(last))
    }

    /// Left edge of `col`.
    pub fn col_x(&self, col: u32) -> f32 {
        self.col_positions.get(col as usize).copied().unwrap_or(0.0)
    }

    /// Width of `col`.
    pub fn col_width(&self, col: u32) -> f32 {
        self.col_widths
            .get(col as usize)
            .copied()
            .unwrap_or(DEFAULT_COL_WIDTH)
    }

    /// Total width of all columns.
    pub fn total_width(&self) -> f32 {
        self.col_positions.last().copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_default_widths() {
        let layout = ColumnLayout::new(4, |_| None);
        assert_eq!(layout.col_count(), 4);
        assert_eq!(layout.total_width(), DEFAULT_COL_WIDTH * 4.0);
        assert_eq!(layout.col_x(2), DEFAULT_COL_WIDTH * 2.0);
    }

    #[test]
    fn test_resolved_widths() {
        let layout = ColumnLayout::new(3, |c| Some(10.0 * (c as f32 + 1.0)));
        assert_eq!(layout.col_widths, vec![10.0, 20.0, 30.0]);
        assert_eq!(layout.total_width(), 60.0);
        assert_eq!(layout.col_width(1), 20.0);
    }

    #[test]
    fn test_col_at_x() {
        let layout = ColumnLayout::new(5, |_| Some(100.0));
        assert_eq!(layout.col_at_x(0.0), Some(0));
        assert_eq!(layout.col_at_x(99.0), Some(0));
        assert_eq!(layout.col_at_x(100.0), Some(1));
        assert_eq!(layout.col_at_x(250.0), Some(2));
        // Past the end clamps to the last column
        assert_eq!(layout.col_at_x(10_000.0), Some(4));
    }

    #[test]
    fn test_empty_layout() {
        let layout = ColumnLayout::new(0, |_| None);
        assert_eq!(layout.col_at_x(0.0), None);
        assert_eq!(layout.total_width(), 0.0);
    }
}
