//! In-memory grid host, loadable from CSV/TSV text.
//!
//! `TableGrid` implements [`GridHost`] on plain rows of strings. It tracks a
//! horizontal viewport over its column layout so it can answer visible-range
//! queries, and it counts layout re-adjustment requests so callers know when
//! to relayout with fresh widths.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::config::GridSettings;
use crate::error::Result;
use crate::host::{GridHost, ViewportQuery};
use crate::layout::{ColumnLayout, Viewport};

/// Delimiter for parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    /// Guess the delimiter from a file name (`.tsv` / `.tab` -> tab).
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".tsv") || lower.ends_with(".tab") {
            Self::Tab
        } else {
            Self::Comma
        }
    }

    fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Tab => '\t',
        }
    }
}

/// A grid of string cells with optional column headers.
pub struct TableGrid {
    rows: Vec<Vec<String>>,
    col_count: u32,
    headers: Option<Vec<String>>,
    settings: GridSettings,
    overrides: RefCell<HashMap<u32, f32>>,
    layout: RefCell<ColumnLayout>,
    viewport: RefCell<Viewport>,
    rendered: Cell<bool>,
    layout_adjustments: Cell<u32>,
}

impl TableGrid {
    /// Build a grid from rows. The column count is the longest row's length.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        let col_count = rows
            .iter()
            .map(Vec::len)
            .max()
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0);
        Self {
            rows,
            col_count,
            headers: None,
            settings: GridSettings::default(),
            overrides: RefCell::new(HashMap::new()),
            layout: RefCell::new(ColumnLayout::new(col_count, |_| None)),
            viewport: RefCell::new(Viewport::default()),
            rendered: Cell::new(false),
            layout_adjustments: Cell::new(0),
        }
    }

    /// Parse delimited text. With `has_header`, the first line becomes the
    /// column headers instead of a data row.
    pub fn from_delimited(data: &[u8], delim: Delimiter, has_header: bool) -> Result<Self> {
        let text = String::from_utf8_lossy(data);
        let mut rows: Vec<Vec<String>> = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| split_csv_line(line, delim.as_char()))
            .collect();

        let headers = if has_header && !rows.is_empty() {
            Some(rows.remove(0))
        } else {
            None
        };

        let mut grid = Self::new(rows);
        if let Some(headers) = headers {
            grid = grid.with_headers(headers);
        }
        Ok(grid)
    }

    /// Attach column header labels. Widens the grid if there are more headers
    /// than data columns.
    #[must_use]
    pub fn with_headers(mut self, headers: Vec<String>) -> Self {
        let header_cols = u32::try_from(headers.len()).unwrap_or(u32::MAX);
        if header_cols > self.col_count {
            self.col_count = header_cols;
            self.layout = RefCell::new(ColumnLayout::new(header_cols, |_| None));
        }
        self.headers = Some(headers);
        self
    }

    /// Apply grid settings (auto-size switch, static widths).
    #[must_use]
    pub fn with_settings(mut self, settings: GridSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    /// Declare a user width for `col`, which suppresses auto-measurement.
    pub fn set_width_override(&self, col: u32, width: Option<f32>) {
        let mut overrides = self.overrides.borrow_mut();
        match width {
            Some(w) => overrides.insert(col, w),
            None => overrides.remove(&col),
        };
    }

    /// Mark the grid as rendered with a viewport `width` pixels wide.
    pub fn render(&self, width: f32) {
        self.viewport.borrow_mut().resize(width);
        self.rendered.set(true);
    }

    /// Move the viewport's left edge to `x`.
    pub fn set_viewport_offset(&self, x: f32) {
        self.viewport.borrow_mut().set_offset(x);
    }

    /// Recompute column positions with freshly resolved widths.
    pub fn relayout(&self, width_of: impl Fn(u32) -> Option<f32>) {
        *self.layout.borrow_mut() = ColumnLayout::new(self.col_count, width_of);
    }

    /// Snapshot of the current column layout.
    pub fn layout(&self) -> ColumnLayout {
        self.layout.borrow().clone()
    }

    /// How many times a layout re-adjustment was requested.
    pub fn layout_adjustments(&self) -> u32 {
        self.layout_adjustments.get()
    }

    fn visible_cols(&self) -> Option<(u32, u32)> {
        if !self.rendered.get() {
            return None;
        }
        self.viewport.borrow().visible_cols(&self.layout.borrow())
    }
}

impl ViewportQuery for TableGrid {
    fn first_visible_column(&self) -> Option<u32> {
        self.visible_cols().map(|(first, _)| first)
    }

    fn last_visible_column(&self) -> Option<u32> {
        self.visible_cols().map(|(_, last)| last)
    }
}

impl GridHost for TableGrid {
    fn count_rows(&self) -> u32 {
        u32::try_from(self.rows.len()).unwrap_or(u32::MAX)
    }

    fn count_cols(&self) -> u32 {
        self.col_count
    }

    fn data_at_cell(&self, row: u32, col: u32) -> Option<String> {
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .cloned()
    }

    fn is_auto_size_disabled(&self) -> bool {
        self.settings.is_auto_size_disabled()
    }

    fn has_static_column_widths(&self) -> bool {
        self.settings.has_static_column_widths()
    }

    fn user_width_override(&self, col: u32) -> Option<f32> {
        self.overrides.borrow().get(&col).copied()
    }

    fn column_header(&self, col: u32) -> Option<String> {
        self.headers.as_ref()?.get(col as usize).cloned()
    }

    fn adjust_layout(&self) {
        self.layout_adjustments
            .set(self.layout_adjustments.get().saturating_add(1));
    }
}

/// Split a CSV line respecting quoted fields.
fn split_csv_line(line: &str, sep: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Escaped quote
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == sep {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_basic() {
        let data = b"Name,Age,City\nAlice,30,NYC\nBob,25,LA";
        let grid = TableGrid::from_delimited(data, Delimiter::Comma, true).unwrap();
        assert_eq!(grid.count_rows(), 2);
        assert_eq!(grid.count_cols(), 3);
        assert_eq!(grid.data_at_cell(0, 0).as_deref(), Some("Alice"));
        assert_eq!(grid.column_header(2).as_deref(), Some("City"));
        assert_eq!(grid.data_at_cell(5, 0), None);
    }

    #[test]
    fn test_parse_tsv_without_header() {
        let data = b"A\tB\n1\t2";
        let grid = TableGrid::from_delimited(data, Delimiter::Tab, false).unwrap();
        assert_eq!(grid.count_rows(), 2);
        assert_eq!(grid.column_header(0), None);
        assert_eq!(grid.data_at_cell(1, 1).as_deref(), Some("2"));
    }

    #[test]
    fn test_quoted_csv() {
        let data = b"\"Hello, World\",42\n\"She said \"\"hi\"\"\",0";
        let grid = TableGrid::from_delimited(data, Delimiter::Comma, false).unwrap();
        assert_eq!(grid.data_at_cell(0, 0).as_deref(), Some("Hello, World"));
        assert_eq!(grid.data_at_cell(1, 0).as_deref(), Some("She said \"hi\""));
    }

    #[test]
    fn test_empty_csv() {
        let grid = TableGrid::from_delimited(b"", Delimiter::Comma, true).unwrap();
        assert_eq!(grid.count_rows(), 0);
        assert_eq!(grid.count_cols(), 0);
    }

    #[test]
    fn test_delimiter_from_path() {
        assert_eq!(Delimiter::from_path("data.TSV"), Delimiter::Tab);
        assert_eq!(Delimiter::from_path("data.csv"), Delimiter::Comma);
    }

    #[test]
    fn test_viewport_unknown_until_rendered() {
        let grid = TableGrid::new(vec![vec!["a".into(); 40]]);
        assert_eq!(grid.first_visible_column(), None);

        grid.render(260.0);
        assert_eq!(grid.first_visible_column(), Some(0));
        assert_eq!(grid.last_visible_column(), Some(5));

        grid.set_viewport_offset(500.0);
        assert_eq!(grid.first_visible_column(), Some(10));
    }

    #[test]
    fn test_relayout_and_adjustments() {
        let grid = TableGrid::new(vec![vec!["a".into(); 3]]);
        grid.adjust_layout();
        assert_eq!(grid.layout_adjustments(), 1);
        grid.relayout(|c| (c == 1).then_some(200.0));
        assert_eq!(grid.layout().col_width(1), 200.0);
        assert_eq!(grid.layout().total_width(), 300.0);
    }

    #[test]
    fn test_width_overrides() {
        let grid = TableGrid::new(vec![vec!["a".into(); 3]]);
        grid.set_width_override(2, Some(90.0));
        assert_eq!(grid.user_width_override(2), Some(90.0));
        grid.set_width_override(2, None);
        assert_eq!(grid.user_width_override(2), None);
    }
}
