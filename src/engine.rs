//! Calculation engine: decide which columns are stale, measure them, cache
//! the results.

use crate::host::GridHost;
use crate::measure::{MeasurementSurface, TextWidthSurface};
use crate::sampling::{LengthSampler, SampleSelector};
use crate::types::{Sample, Span};
use crate::width_cache::WidthCache;

/// Owns the width cache and drives the sampler and measurement surface.
///
/// One call to [`CalculationEngine::calculate_columns_width`] registers every
/// stale column with the surface and flushes it once at the end.
pub struct CalculationEngine {
    widths: WidthCache,
    sampler: Box<dyn SampleSelector>,
    surface: Box<dyn MeasurementSurface>,
    use_headers: bool,
}

impl Default for CalculationEngine {
    fn default() -> Self {
        Self::new(
            Box::new(LengthSampler::default()),
            Box::new(TextWidthSurface::default()),
        )
    }
}

impl CalculationEngine {
    pub fn new(sampler: Box<dyn SampleSelector>, surface: Box<dyn MeasurementSurface>) -> Self {
        Self {
            widths: WidthCache::new(),
            sampler,
            surface,
            use_headers: false,
        }
    }

    /// Also register each column's header label as a sample.
    #[must_use]
    pub fn with_headers(mut self, use_headers: bool) -> Self {
        self.use_headers = use_headers;
        self
    }

    pub fn widths(&self) -> &WidthCache {
        &self.widths
    }

    /// Measure the stale columns of `cols` over `rows`.
    ///
    /// `None` ranges default to the whole grid; ranges are clamped to the
    /// grid's current bounds. Without `force`, a column is measured only when
    /// it has no cached width and no user-declared width. Returns the number
    /// of widths written to the cache.
    pub fn calculate_columns_width(
        &mut self,
        grid: &dyn GridHost,
        cols: Option<Span>,
        rows: Option<Span>,
        force: bool,
    ) -> usize {
        let col_count = grid.count_cols();
        let row_count = grid.count_rows();
        let cols = cols.unwrap_or_else(|| Span::up_to(col_count)).clamp_to(col_count);
        let rows = rows.unwrap_or_else(|| Span::up_to(row_count)).clamp_to(row_count);

        for col in cols.iter() {
            if !force && (self.widths.get(col).is_some() || grid.user_width_override(col).is_some())
            {
                continue;
            }

            let mut samples = self.sampler.generate_column_samples(grid, col, rows);
            if self.use_headers {
                if let Some(label) = grid.column_header(col) {
                    samples.entry(col).or_default().push(Sample::header(label));
                }
            }
            for (sample_col, values) in samples {
                self.surface.add_column(sample_col, values);
            }
        }

        self.flush()
    }

    /// Measure everything registered so far and reset the surface.
    fn flush(&mut self) -> usize {
        if self.surface.column_count() == 0 {
            return 0;
        }
        let widths = &mut self.widths;
        let mut written = 0;
        self.surface.get_widths(&mut |col, width| {
            widths.set(col, width);
            written += 1;
        });
        self.surface.clean();
        log::trace!("measured {written} column(s)");
        written
    }

    /// Resolve the width the host should lay `col` out with.
    ///
    /// Returns `default` unless the cached width is strictly greater than it,
    /// so auto-sizing only ever grows a column past a requested width. A
    /// default of `0` (or NaN) counts as no default at all.
    pub fn column_width(&self, col: u32, default: Option<f32>) -> Option<f32> {
        let floor = match default {
            Some(w) if w != 0.0 && !w.is_nan() => w,
            _ => 0.0,
        };
        match self.widths.get(col) {
            Some(cached) if cached > floor => Some(cached),
            _ => default,
        }
    }

    /// Cached width of `col`, unaffected by any default.
    pub fn cached_width(&self, col: u32) -> Option<f32> {
        self.widths.get(col)
    }

    /// Forget the width of one column.
    pub fn invalidate(&mut self, col: u32) {
        self.widths.invalidate(col);
    }

    /// Forget every width.
    pub fn clear(&mut self) {
        self.widths.clear();
    }

    /// Release the surface's off-screen state and pending registrations.
    pub fn release(&mut self) {
        self.surface.clean();
    }
}
