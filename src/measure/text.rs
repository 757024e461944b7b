//! Native measurement surface based on Unicode display width.

use std::collections::BTreeMap;

use unicode_width::UnicodeWidthStr;

use super::lru::{LruCache, MEASURE_CACHE_CAP};
use super::{MeasurementSurface, CELL_PADDING};
use crate::types::Sample;

/// Average advance of one display column in the default grid font (pixels).
pub const DEFAULT_CHAR_WIDTH: f32 = 7.0;

/// Font metrics used to convert display columns into pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Pixels per display column (wide CJK glyphs count as two columns).
    pub char_width: f32,
    /// Padding added once per cell.
    pub cell_padding: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: DEFAULT_CHAR_WIDTH,
            cell_padding: CELL_PADDING,
        }
    }
}

/// Estimates widths from character display columns.
///
/// Used outside the browser, where no layout engine is available. Multi-line
/// values are as wide as their widest line.
pub struct TextWidthSurface {
    metrics: TextMetrics,
    columns: BTreeMap<u32, Vec<Sample>>,
    memo: LruCache<String, usize>,
}

impl Default for TextWidthSurface {
    fn default() -> Self {
        Self::new(TextMetrics::default())
    }
}

impl TextWidthSurface {
    pub fn new(metrics: TextMetrics) -> Self {
        Self {
            metrics,
            columns: BTreeMap::new(),
            memo: LruCache::new(MEASURE_CACHE_CAP),
        }
    }

    /// Number of memoized text measurements.
    pub fn memoized(&self) -> usize {
        self.memo.len()
    }
}

fn display_columns(text: &str) -> usize {
    text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0)
}

impl MeasurementSurface for TextWidthSurface {
    fn add_column(&mut self, col: u32, samples: Vec<Sample>) {
        self.columns.entry(col).or_default().extend(samples);
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn get_widths(&mut self, sink: &mut dyn FnMut(u32, f32)) {
        let Self {
            metrics,
            columns,
            memo,
        } = self;
        for (&col, samples) in columns.iter() {
            let widest = samples
                .iter()
                .map(|s| memo.get_or_insert_with(&s.value, || display_columns(&s.value)))
                .max()
                .unwrap_or(0);
            #[allow(clippy::cast_precision_loss)]
            let width = (widest as f32 * metrics.char_width + metrics.cell_padding).ceil();
            sink(col, width);
        }
    }

    fn clean(&mut self) {
        self.columns.clear();
    }
}
