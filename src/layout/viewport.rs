//! Horizontal viewport state.

use super::ColumnLayout;

/// The horizontally visible area of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Left edge of the visible area in grid coordinates
    pub offset_x: f32,
    /// Viewport width in pixels
    pub width: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0)
    }
}

impl Viewport {
    pub fn new(width: f32) -> Self {
        Self {
            offset_x: 0.0,
            width,
        }
    }

    /// Visible column range (inclusive), or `None` for an empty layout.
    pub fn visible_cols(&self, layout: &ColumnLayout) -> Option<(u32, u32)> {
        let start = layout.col_at_x(self.offset_x)?;
        let end = layout.col_at_x(self.offset_x + self.width.max(0.0))?;
        Some((start, end))
    }

    /// Move the left edge to `x`, as reported by the host.
    pub fn set_offset(&mut self, x: f32) {
        self.offset_x = x;
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32) {
        self.width = width;
    }
}
