//! Column layout and horizontal viewport.
//!
//! This module handles:
//! - Pre-computing column positions from resolved column widths
//! - Tracking the horizontal viewport offset and visible column range
//! - Binary search for column lookup at an x coordinate

mod columns;
mod viewport;

pub use columns::{ColumnLayout, DEFAULT_COL_WIDTH};
pub use viewport::Viewport;
