//! Browser measurement surface using an off-screen canvas.
//!
//! The canvas is never attached to the document. Text is measured with the
//! 2D context's `measureText`, using the same font string the grid renders
//! cells with.

use std::collections::BTreeMap;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::lru::{LruCache, MEASURE_CACHE_CAP};
use super::{MeasurementSurface, CELL_PADDING};
use crate::error::{ColsizeError, Result};
use crate::types::Sample;

/// Measures sampled values with `CanvasRenderingContext2d::measure_text`.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    font: String,
    header_font: String,
    padding: f64,
    columns: BTreeMap<u32, Vec<Sample>>,
    memo: LruCache<(bool, String), f64>,
}

impl CanvasSurface {
    /// Create a surface measuring cells in `font` (CSS font shorthand) and
    /// headers in `header_font`.
    ///
    /// # Errors
    /// Fails when there is no document or the 2D context is unavailable.
    pub fn new(font: &str, header_font: &str) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ColsizeError::Measure("no document".into()))?;
        let canvas = document
            .create_element("canvas")
            .map_err(|e| ColsizeError::Measure(format!("create canvas: {e:?}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ColsizeError::Measure("element is not a canvas".into()))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| ColsizeError::Measure(format!("get_context: {e:?}")))?
            .ok_or_else(|| ColsizeError::Measure("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ColsizeError::Measure("unexpected context type".into()))?;

        Ok(Self {
            canvas,
            ctx,
            font: font.to_string(),
            header_font: header_font.to_string(),
            padding: f64::from(CELL_PADDING),
            columns: BTreeMap::new(),
            memo: LruCache::new(MEASURE_CACHE_CAP),
        })
    }

    fn measure_text_cached(&mut self, text: &str, header: bool) -> f64 {
        let key = (header, text.to_string());
        if let Some(width) = self.memo.get(&key) {
            return width;
        }
        let font = if header { &self.header_font } else { &self.font };
        self.ctx.set_font(font);
        let width = text
            .lines()
            .map(|line| self.ctx.measure_text(line).map(|m| m.width()).unwrap_or(0.0))
            .fold(0.0, f64::max);
        self.memo.insert(key, width);
        width
    }
}

impl MeasurementSurface for CanvasSurface {
    fn add_column(&mut self, col: u32, samples: Vec<Sample>) {
        self.columns.entry(col).or_default().extend(samples);
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn get_widths(&mut self, sink: &mut dyn FnMut(u32, f32)) {
        let columns = std::mem::take(&mut self.columns);
        for (col, samples) in &columns {
            let widest = samples
                .iter()
                .map(|s| self.measure_text_cached(&s.value, s.is_header()))
                .fold(0.0, f64::max);
            #[allow(clippy::cast_possible_truncation)]
            let width = (widest + self.padding).ceil() as f32;
            sink(*col, width);
        }
        self.columns = columns;
    }

    fn clean(&mut self) {
        self.columns.clear();
        // Shrinking the backing store releases its pixel buffer.
        self.canvas.set_width(0);
        self.canvas.set_height(0);
    }
}
