//! colsize - auto column sizing for virtualized grids
//!
//! Keeps a per-column width cache for a grid that only renders what is on
//! screen:
//! - Visible columns are measured before each render
//! - Full-table recalculation is spread across animation frames
//! - Cell values are sampled by length instead of measured one by one
//! - Edits, double-click resizes and data reloads keep the cache fresh
//!
//! # Usage (Rust)
//!
//! ```no_run
//! use std::rc::Rc;
//! use colsize::{AutoColumnSize, Delimiter, ManualScheduler, TableGrid};
//!
//! let grid = Rc::new(TableGrid::from_delimited(b"a,bb\n1,22", Delimiter::Comma, false).unwrap());
//! let scheduler = Rc::new(ManualScheduler::new());
//! let plugin = AutoColumnSize::new(&grid, scheduler.clone(), Default::default());
//! plugin.calculate_all_columns_width(None);
//! scheduler.run_until_idle();
//! assert!(!plugin.needs_recalculation());
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { ColumnSizer } from 'colsize';
//! await init();
//! const sizer = new ColumnSizer(gridHost, settings, "13px sans-serif");
//! sizer.beforeRender(false);
//! const width = sizer.modifyColWidth(col, undefined);
//! ```

// Sizing core
pub mod engine;
pub mod error;
pub mod host;
pub mod measure;
pub mod sampling;
pub mod types;
pub mod width_cache;

// Plugin and host integration
pub mod autosize;
pub mod config;
pub mod frame;
pub mod grid;
pub mod layout;

#[cfg(target_arch = "wasm32")]
mod bindings;

use wasm_bindgen::prelude::*;

pub use autosize::{AutoColumnSize, RunState, CALCULATION_STEP};
#[cfg(target_arch = "wasm32")]
pub use bindings::ColumnSizer;
pub use config::{AutoColumnSizeSetting, AutoSizeOptions, ColWidths, GridSettings, SyncLimit};
pub use engine::CalculationEngine;
pub use error::{ColsizeError, Result};
pub use frame::{FrameCallback, FrameHandle, FrameScheduler, ManualScheduler};
pub use grid::{Delimiter, TableGrid};
pub use host::{GridHost, ViewportQuery};
pub use layout::{ColumnLayout, Viewport, DEFAULT_COL_WIDTH};
pub use measure::{MeasurementSurface, TextMetrics, TextWidthSurface};
pub use sampling::{LengthSampler, SampleSelector, SAMPLE_COUNT};
pub use types::*;
pub use width_cache::WidthCache;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
