//! Measurement surfaces: turn sampled values into pixel widths.
//!
//! A surface buffers `(column, samples)` registrations and measures them all
//! in one pass when [`MeasurementSurface::get_widths`] is called, so the cost
//! of setting up a measurement pass is paid once per calculation rather than
//! once per column.

#[cfg(target_arch = "wasm32")]
mod canvas;
mod lru;
mod text;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use lru::{LruCache, MEASURE_CACHE_CAP};
pub use text::{TextMetrics, TextWidthSurface};

use crate::types::Sample;

/// Horizontal padding added around measured content (pixels).
pub const CELL_PADDING: f32 = 9.0;

/// Off-screen measurement of candidate column content.
pub trait MeasurementSurface {
    /// Register samples for a column. Registering a column twice appends.
    fn add_column(&mut self, col: u32, samples: Vec<Sample>);

    /// Number of registered columns waiting to be measured.
    fn column_count(&self) -> usize;

    /// Measure every registered column, calling `sink(col, width)` once per
    /// column before returning.
    fn get_widths(&mut self, sink: &mut dyn FnMut(u32, f32));

    /// Drop registrations and any off-screen state.
    fn clean(&mut self);
}
