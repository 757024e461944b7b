//! Reactions to host lifecycle events.
//!
//! Each hook is a no-op while the plugin is disabled; the width query passes
//! the host's default through untouched in that case.

use std::rc::Rc;

use super::AutoColumnSize;
use crate::types::{CellChange, Span};

impl AutoColumnSize {
    /// Before each render: measure the visible columns over all rows.
    ///
    /// Only visible columns are considered, so the cost of an ordinary render
    /// does not grow with the table. Nothing happens before the grid has
    /// rendered (unknown viewport) or when it has no rows.
    pub fn on_before_render(&self, force: bool) {
        if !self.is_enabled() {
            return;
        }
        let Some(host) = self.host() else {
            return;
        };
        if host.count_rows() == 0 {
            return;
        }
        let (Some(first), Some(last)) = (host.first_visible_column(), host.last_visible_column())
        else {
            return;
        };
        self.calculate_columns_width(Some(Span::new(first, last)), None, force);
    }

    /// After the host loaded new data: on the next tick, clear the cache and
    /// recalculate every column.
    ///
    /// Deferred so the host finishes its own post-load bookkeeping first.
    pub fn on_after_load_data(&self) {
        if !self.is_enabled() || self.host().is_none() {
            return;
        }
        let weak = Rc::downgrade(&self.shared);
        let deferred = self.shared.scheduler.defer(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                AutoColumnSize::from_shared(shared).recalculate_all_columns_width();
            }
        }));
        if let Err(e) = deferred {
            log::warn!("post-load recalculation not scheduled: {e}");
        }
    }

    /// Before cell edits are applied: forget the width of every touched
    /// column, so the next calculation including it remeasures it.
    pub fn on_before_change(&self, changes: &[CellChange]) {
        if !self.is_enabled() {
            return;
        }
        let mut s = self.shared.state.borrow_mut();
        for change in changes {
            s.engine.invalidate(change.col);
        }
    }

    /// Before a manual column resize. A double-click autosizes: the column is
    /// remeasured over all rows and its measured width replaces `size`.
    pub fn on_before_column_resize(&self, col: u32, size: f32, is_double_click: bool) -> f32 {
        if !is_double_click || !self.is_enabled() {
            return size;
        }
        self.calculate_columns_width(Some(Span::single(col)), None, true);
        self.cached_width(col).unwrap_or(size)
    }

    /// The host's column width query, asked on every layout of `col`.
    pub fn on_modify_column_width(&self, col: u32, default: Option<f32>) -> Option<f32> {
        if !self.is_enabled() {
            return default;
        }
        self.column_width(col, default)
    }

    /// Plugin teardown: stop any run and release the measurement surface.
    pub fn destroy(&self) {
        self.cancel_run();
        let mut s = self.shared.state.borrow_mut();
        s.engine.release();
        s.enabled = false;
        log::debug!("auto column size destroyed");
    }
}
