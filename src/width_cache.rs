//! Per-column width cache.
//!
//! The single source of truth consulted when the host lays out a column.
//! Entries are sparse: a column without a width has simply not been measured
//! yet (or was invalidated since).

/// Ordered mapping from column index to last measured width.
#[derive(Debug, Clone, Default)]
pub struct WidthCache {
    widths: Vec<Option<f32>>,
}

impl WidthCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self { widths: Vec::new() }
    }

    /// Last measured width of `col`, if any.
    pub fn get(&self, col: u32) -> Option<f32> {
        self.widths.get(col as usize).copied().flatten()
    }

    /// Store a measured width, growing the cache as needed.
    pub fn set(&mut self, col: u32, width: f32) {
        let idx = col as usize;
        if idx >= self.widths.len() {
            self.widths.resize(idx + 1, None);
        }
        if let Some(slot) = self.widths.get_mut(idx) {
            *slot = Some(width);
        }
    }

    /// Forget the width of a single column.
    pub fn invalidate(&mut self, col: u32) {
        if let Some(slot) = self.widths.get_mut(col as usize) {
            *slot = None;
        }
    }

    /// Drop every entry. The cache is immediately usable for new writes.
    pub fn clear(&mut self) {
        self.widths = Vec::new();
    }

    /// Number of slots (highest measured column + 1), including gaps.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// True when no slot exists at all.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Number of columns that currently hold a width.
    pub fn measured_count(&self) -> usize {
        self.widths.iter().filter(|w| w.is_some()).count()
    }

    /// True if any column in `[0, column_count)` has no width.
    pub fn has_gaps(&self, column_count: u32) -> bool {
        (0..column_count).any(|col| self.get(col).is_none())
    }

    /// Iterate measured `(col, width)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f32)> + '_ {
        self.widths
            .iter()
            .enumerate()
            .filter_map(|(idx, w)| Some((u32::try_from(idx).ok()?, (*w)?)))
    }
}
