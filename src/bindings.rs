//! JavaScript bindings.
//!
//! A JavaScript grid drives auto-sizing through [`ColumnSizer`]. The grid
//! itself is passed in as a plain object exposing methods:
//!
//! ```javascript
//! const host = {
//!   countRows() { ... }, countCols() { ... },
//!   getDataAtCell(row, col) { ... },          // string | null
//!   getFirstVisibleColumn() { ... },          // number, -1 if not rendered
//!   getLastVisibleColumn() { ... },
//!   getColWidthOverride(col) { ... },         // optional, number | null
//!   getColHeader(col) { ... },                // optional, string | null
//!   adjustElementsSize() { ... },             // optional
//! };
//! const sizer = new ColumnSizer(host, { autoColumnSize: { syncLimit: "20%" } }, "13px sans-serif");
//! ```
//!
//! The host methods run while the sizer is mid-calculation and must not call
//! back into the `ColumnSizer`; a re-entrant call panics on the sizer's
//! borrowed state. `adjustElementsSize` is the exception: it runs after the
//! calculation has finished and may read widths or trigger a new run.

use std::rc::Rc;

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::autosize::AutoColumnSize;
use crate::config::GridSettings;
use crate::engine::CalculationEngine;
use crate::frame::BrowserScheduler;
use crate::host::{GridHost, ViewportQuery};
use crate::measure::CanvasSurface;
use crate::types::CellChange;

/// Font used for header labels when none is given.
const DEFAULT_HEADER_FONT: &str = "bold 13px sans-serif";

/// [`GridHost`] backed by a JavaScript object.
pub(crate) struct JsGridHost {
    object: JsValue,
    settings: GridSettings,
}

impl JsGridHost {
    fn call(&self, name: &str, args: &[JsValue]) -> Option<JsValue> {
        let method = Reflect::get(&self.object, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        let result = match args {
            [] => method.call0(&self.object),
            [a] => method.call1(&self.object, a),
            [a, b] => method.call2(&self.object, a, b),
            _ => return None,
        };
        result.ok()
    }

    fn call_index(&self, name: &str, args: &[JsValue]) -> Option<u32> {
        let value = self.call(name, args)?.as_f64()?;
        to_index(value)
    }
}

/// Convert a JS number to an index; negative (`-1` = unknown) or
/// non-finite values map to `None`.
fn to_index(value: f64) -> Option<u32> {
    if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = value as u32;
    Some(index)
}

impl ViewportQuery for JsGridHost {
    fn first_visible_column(&self) -> Option<u32> {
        self.call_index("getFirstVisibleColumn", &[])
    }

    fn last_visible_column(&self) -> Option<u32> {
        self.call_index("getLastVisibleColumn", &[])
    }
}

impl GridHost for JsGridHost {
    fn count_rows(&self) -> u32 {
        self.call_index("countRows", &[]).unwrap_or(0)
    }

    fn count_cols(&self) -> u32 {
        self.call_index("countCols", &[]).unwrap_or(0)
    }

    fn data_at_cell(&self, row: u32, col: u32) -> Option<String> {
        let value = self.call("getDataAtCell", &[row.into(), col.into()])?;
        if value.is_null() || value.is_undefined() {
            return None;
        }
        if let Some(text) = value.as_string() {
            return Some(text);
        }
        if let Some(n) = value.as_f64() {
            return Some(n.to_string());
        }
        js_sys::JSON::stringify(&value)
            .ok()
            .and_then(|json| json.as_string())
    }

    fn is_auto_size_disabled(&self) -> bool {
        self.settings.is_auto_size_disabled()
    }

    fn has_static_column_widths(&self) -> bool {
        self.settings.has_static_column_widths()
    }

    fn user_width_override(&self, col: u32) -> Option<f32> {
        let width = self.call("getColWidthOverride", &[col.into()])?.as_f64()?;
        if !width.is_finite() {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        let width = width as f32;
        Some(width)
    }

    fn column_header(&self, col: u32) -> Option<String> {
        self.call("getColHeader", &[col.into()])?.as_string()
    }

    fn adjust_layout(&self) {
        let _ = self.call("adjustElementsSize", &[]);
    }
}

/// Auto column sizing for a JavaScript grid.
///
/// Host callbacks other than `adjustElementsSize` must not re-enter the sizer.
#[wasm_bindgen]
pub struct ColumnSizer {
    // Keeps the host alive; the plugin only holds a weak reference.
    host: Option<Rc<JsGridHost>>,
    plugin: AutoColumnSize,
}

#[wasm_bindgen]
impl ColumnSizer {
    /// Create a sizer for `host` with grid `settings` (may be `undefined`),
    /// measuring cells in the CSS `font`.
    #[wasm_bindgen(constructor)]
    pub fn new(host: JsValue, settings: JsValue, font: &str) -> Result<ColumnSizer, JsValue> {
        console_error_panic_hook::set_once();

        let settings: GridSettings = if settings.is_undefined() || settings.is_null() {
            GridSettings::default()
        } else {
            serde_wasm_bindgen::from_value(settings)?
        };
        settings.validate()?;

        let options = settings.options();
        let host = Rc::new(JsGridHost {
            object: host,
            settings,
        });
        let surface = CanvasSurface::new(font, DEFAULT_HEADER_FONT)?;
        let engine = CalculationEngine::new(Box::new(options.sampler()), Box::new(surface));
        let scheduler = Rc::new(BrowserScheduler::new()?);
        let plugin = AutoColumnSize::with_engine(&host, scheduler, options, engine);

        Ok(ColumnSizer {
            host: Some(host),
            plugin,
        })
    }

    #[wasm_bindgen(js_name = isEnabled)]
    pub fn is_enabled(&self) -> bool {
        self.plugin.is_enabled()
    }

    #[wasm_bindgen(js_name = beforeRender)]
    pub fn before_render(&self, force: bool) {
        self.plugin.on_before_render(force);
    }

    #[wasm_bindgen(js_name = afterLoadData)]
    pub fn after_load_data(&self) {
        self.plugin.on_after_load_data();
    }

    /// `changes` is an array of `[row, col, oldValue, newValue]` tuples.
    #[wasm_bindgen(js_name = beforeChange)]
    pub fn before_change(&self, changes: js_sys::Array) {
        let changes: Vec<CellChange> = changes
            .iter()
            .filter_map(|entry| {
                let entry = entry.dyn_into::<js_sys::Array>().ok()?;
                let row = to_index(entry.get(0).as_f64()?)?;
                let col = to_index(entry.get(1).as_f64()?)?;
                Some(CellChange::new(
                    row,
                    col,
                    entry.get(2).as_string(),
                    entry.get(3).as_string(),
                ))
            })
            .collect();
        self.plugin.on_before_change(&changes);
    }

    #[wasm_bindgen(js_name = beforeColumnResize)]
    pub fn before_column_resize(&self, col: u32, size: f32, is_double_click: bool) -> f32 {
        self.plugin
            .on_before_column_resize(col, size, is_double_click)
    }

    #[wasm_bindgen(js_name = modifyColWidth)]
    pub fn modify_col_width(&self, col: u32, default_width: Option<f32>) -> Option<f32> {
        self.plugin.on_modify_column_width(col, default_width)
    }

    #[wasm_bindgen(js_name = calculateAllColumnsWidth)]
    pub fn calculate_all_columns_width(&self) {
        self.plugin.calculate_all_columns_width(None);
    }

    #[wasm_bindgen(js_name = clearCache)]
    pub fn clear_cache(&self) {
        self.plugin.clear_cache();
    }

    #[wasm_bindgen(js_name = isInProgress)]
    pub fn is_in_progress(&self) -> bool {
        self.plugin.is_in_progress()
    }

    #[wasm_bindgen(js_name = isNeedRecalculate)]
    pub fn needs_recalculation(&self) -> bool {
        self.plugin.needs_recalculation()
    }

    /// Tear down: pending batches are cancelled and the host is released.
    pub fn destroy(&mut self) {
        self.plugin.destroy();
        self.host = None;
    }
}
