//! Common test utilities for the sizing plugin.
//!
//! - `FakeHost`: a scriptable [`GridHost`] with interior mutability, so tests
//!   can edit cells, move the viewport or flip settings while the plugin
//!   holds a weak reference to it
//! - `RecordingSurface`: a measurement surface that logs every flush into a
//!   shared [`MeasureLog`] and returns deterministic widths
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_precision_loss
)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use colsize::{
    AutoColumnSize, AutoSizeOptions, CalculationEngine, GridHost, LengthSampler, ManualScheduler,
    MeasurementSurface, Sample, ViewportQuery,
};

// ============================================================================
// Host
// ============================================================================

/// Scriptable grid host. Cells default to `"r{row}c{col}"`.
#[derive(Default)]
pub struct FakeHost {
    pub rows: Cell<u32>,
    pub cols: Cell<u32>,
    pub cells: RefCell<HashMap<(u32, u32), String>>,
    pub overrides: RefCell<HashMap<u32, f32>>,
    pub headers: RefCell<Option<Vec<String>>>,
    pub visible: Cell<Option<(u32, u32)>>,
    pub disabled: Cell<bool>,
    pub static_widths: Cell<bool>,
    pub adjustments: Cell<u32>,
    /// Runs inside `adjust_layout`, after the count is bumped
    pub on_adjust: RefCell<Option<Box<dyn Fn()>>>,
}

impl FakeHost {
    pub fn new(rows: u32, cols: u32) -> Rc<Self> {
        let host = Self::default();
        host.rows.set(rows);
        host.cols.set(cols);
        Rc::new(host)
    }

    pub fn set_cell(&self, row: u32, col: u32, value: &str) {
        self.cells.borrow_mut().insert((row, col), value.to_string());
    }

    pub fn set_override(&self, col: u32, width: f32) {
        self.overrides.borrow_mut().insert(col, width);
    }

    pub fn set_visible(&self, first: u32, last: u32) {
        self.visible.set(Some((first, last)));
    }

    pub fn set_headers(&self, headers: &[&str]) {
        *self.headers.borrow_mut() = Some(headers.iter().map(|h| (*h).to_string()).collect());
    }
}

impl ViewportQuery for FakeHost {
    fn first_visible_column(&self) -> Option<u32> {
        self.visible.get().map(|(first, _)| first)
    }

    fn last_visible_column(&self) -> Option<u32> {
        self.visible.get().map(|(_, last)| last)
    }
}

impl GridHost for FakeHost {
    fn count_rows(&self) -> u32 {
        self.rows.get()
    }

    fn count_cols(&self) -> u32 {
        self.cols.get()
    }

    fn data_at_cell(&self, row: u32, col: u32) -> Option<String> {
        if row >= self.rows.get() || col >= self.cols.get() {
            return None;
        }
        Some(
            self.cells
                .borrow()
                .get(&(row, col))
                .cloned()
                .unwrap_or_else(|| format!("r{row}c{col}")),
        )
    }

    fn is_auto_size_disabled(&self) -> bool {
        self.disabled.get()
    }

    fn has_static_column_widths(&self) -> bool {
        self.static_widths.get()
    }

    fn user_width_override(&self, col: u32) -> Option<f32> {
        self.overrides.borrow().get(&col).copied()
    }

    fn column_header(&self, col: u32) -> Option<String> {
        self.headers.borrow().as_ref()?.get(col as usize).cloned()
    }

    fn adjust_layout(&self) {
        self.adjustments.set(self.adjustments.get() + 1);
        if let Some(callback) = self.on_adjust.borrow().as_ref() {
            callback();
        }
    }
}

// ============================================================================
// Measurement surface
// ============================================================================

/// Everything a `RecordingSurface` saw.
#[derive(Debug, Default)]
pub struct MeasureLog {
    /// Columns measured by each flush, in registration order.
    pub flushes: Vec<Vec<u32>>,
    /// Samples registered per column, across all flushes.
    pub samples: Vec<(u32, Vec<Sample>)>,
    /// Number of `clean` calls.
    pub cleans: usize,
}

impl MeasureLog {
    /// How many times each column was measured.
    pub fn measure_counts(&self) -> BTreeMap<u32, usize> {
        let mut counts = BTreeMap::new();
        for col in self.flushes.iter().flatten() {
            *counts.entry(*col).or_insert(0) += 1;
        }
        counts
    }

    /// Every measured column, flattened in order.
    pub fn measured(&self) -> Vec<u32> {
        self.flushes.iter().flatten().copied().collect()
    }
}

type WidthFn = Box<dyn Fn(u32, &[Sample]) -> f32>;

/// Surface returning `10px` per character of the longest sample, unless a
/// custom width function is given.
pub struct RecordingSurface {
    columns: BTreeMap<u32, Vec<Sample>>,
    log: Rc<RefCell<MeasureLog>>,
    width: WidthFn,
}

impl RecordingSurface {
    pub fn new(log: Rc<RefCell<MeasureLog>>) -> Self {
        Self {
            columns: BTreeMap::new(),
            log,
            width: Box::new(|_: u32, samples: &[Sample]| {
                samples
                    .iter()
                    .map(|s| s.value.chars().count())
                    .max()
                    .unwrap_or(0) as f32
                    * 10.0
            }),
        }
    }

    pub fn with_width(mut self, width: impl Fn(u32, &[Sample]) -> f32 + 'static) -> Self {
        self.width = Box::new(width);
        self
    }
}

impl MeasurementSurface for RecordingSurface {
    fn add_column(&mut self, col: u32, samples: Vec<Sample>) {
        self.log.borrow_mut().samples.push((col, samples.clone()));
        self.columns.entry(col).or_default().extend(samples);
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn get_widths(&mut self, sink: &mut dyn FnMut(u32, f32)) {
        let cols: Vec<u32> = self.columns.keys().copied().collect();
        self.log.borrow_mut().flushes.push(cols);
        for (col, samples) in &self.columns {
            sink(*col, (self.width)(*col, samples.as_slice()));
        }
    }

    fn clean(&mut self) {
        self.columns.clear();
        self.log.borrow_mut().cleans += 1;
    }
}

// ============================================================================
// Plugin setup
// ============================================================================

/// A plugin wired to `host`, a manual scheduler and a recording surface.
pub struct Harness {
    pub plugin: AutoColumnSize,
    pub scheduler: Rc<ManualScheduler>,
    pub log: Rc<RefCell<MeasureLog>>,
}

impl Harness {
    pub fn new(host: &Rc<FakeHost>, options: AutoSizeOptions) -> Self {
        Self::with_surface(host, options, RecordingSurface::new)
    }

    pub fn with_surface(
        host: &Rc<FakeHost>,
        options: AutoSizeOptions,
        surface: impl FnOnce(Rc<RefCell<MeasureLog>>) -> RecordingSurface,
    ) -> Self {
        let log = Rc::new(RefCell::new(MeasureLog::default()));
        let scheduler = Rc::new(ManualScheduler::new());
        let engine = CalculationEngine::new(
            Box::new(LengthSampler::default()),
            Box::new(surface(Rc::clone(&log))),
        );
        let frames: Rc<ManualScheduler> = Rc::clone(&scheduler);
        let plugin = AutoColumnSize::with_engine(host, frames, options, engine);
        Self {
            plugin,
            scheduler,
            log,
        }
    }

    pub fn flushes(&self) -> Vec<Vec<u32>> {
        self.log.borrow().flushes.clone()
    }

    /// Forget what was logged so far.
    pub fn reset_log(&self) {
        let mut log = self.log.borrow_mut();
        log.flushes.clear();
        log.samples.clear();
    }
}

/// Inclusive column range as a vector.
pub fn cols(from: u32, to: u32) -> Vec<u32> {
    (from..=to).collect()
}
