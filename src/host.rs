//! Narrow interfaces the sizing core needs from the host grid.
//!
//! The core never touches rendering internals. It asks the host for the
//! visible column range, cell text, per-column configuration, and it tells the
//! host once when a full recalculation has finished so the layout can be
//! re-adjusted.
//!
//! All methods take `&self`: the host is shared through `Rc` and the core only
//! keeps a `Weak` reference to it, which is how host teardown is detected.
//! Implementations must not call back into the sizing plugin from these
//! methods, except from [`GridHost::adjust_layout`].

/// Reports which columns are currently rendered.
pub trait ViewportQuery {
    /// First visible column, or `None` when the grid has not rendered yet.
    fn first_visible_column(&self) -> Option<u32>;

    /// Last visible column, or `None` when the grid has not rendered yet.
    fn last_visible_column(&self) -> Option<u32>;
}

/// Everything the sizing core consumes from the host grid.
pub trait GridHost: ViewportQuery {
    /// Number of data rows.
    fn count_rows(&self) -> u32;

    /// Number of columns.
    fn count_cols(&self) -> u32;

    /// Display text of a cell. Used by samplers, never by the core directly.
    fn data_at_cell(&self, row: u32, col: u32) -> Option<String>;

    /// True if auto-sizing was switched off in the grid settings.
    fn is_auto_size_disabled(&self) -> bool {
        false
    }

    /// True if the grid is configured with static column widths.
    fn has_static_column_widths(&self) -> bool {
        false
    }

    /// Width the user declared for `col`. Suppresses auto-measurement.
    fn user_width_override(&self, _col: u32) -> Option<f32> {
        None
    }

    /// Header label for `col`, if the grid shows column headers.
    fn column_header(&self, _col: u32) -> Option<String> {
        None
    }

    /// Called once after a full recalculation so the host can re-adjust
    /// element sizes.
    fn adjust_layout(&self) {}
}
