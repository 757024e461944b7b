//! Inclusive index spans over rows or columns.

use std::ops::RangeInclusive;

/// An inclusive `{from, to}` span of row or column indices.
///
/// `from > to` is a legal value and means "empty". Callers never need to
/// order their bounds; every consumer iterates through [`Span::iter`], which
/// yields nothing for an inverted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub from: u32,
    pub to: u32,
}

impl Span {
    /// Create a span covering `from..=to`.
    pub const fn new(from: u32, to: u32) -> Self {
        Self { from, to }
    }

    /// A span covering exactly one index.
    pub const fn single(index: u32) -> Self {
        Self {
            from: index,
            to: index,
        }
    }

    /// The canonical empty span.
    pub const fn empty() -> Self {
        Self { from: 1, to: 0 }
    }

    /// Span covering `[0, count)`; empty when `count` is 0.
    pub fn up_to(count: u32) -> Self {
        match count.checked_sub(1) {
            Some(last) => Self::new(0, last),
            None => Self::empty(),
        }
    }

    /// True when the span selects nothing.
    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }

    /// Number of indices covered.
    pub fn len(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            (self.to - self.from).saturating_add(1)
        }
    }

    /// True if `index` lies inside the span.
    pub fn contains(&self, index: u32) -> bool {
        !self.is_empty() && index >= self.from && index <= self.to
    }

    /// Restrict the span to `[0, count)`.
    ///
    /// Anything outside the grid's current bounds is dropped, so a span that
    /// starts past the end comes back empty.
    pub fn clamp_to(self, count: u32) -> Self {
        match count.checked_sub(1) {
            Some(last) if self.from <= last => Self::new(self.from, self.to.min(last)),
            _ => Self::empty(),
        }
    }

    /// Iterate the covered indices in ascending order.
    pub fn iter(&self) -> RangeInclusive<u32> {
        self.from..=self.to
    }
}

impl From<u32> for Span {
    fn from(index: u32) -> Self {
        Self::single(index)
    }
}

impl From<(u32, u32)> for Span {
    fn from((from, to): (u32, u32)) -> Self {
        Self::new(from, to)
    }
}

impl From<RangeInclusive<u32>> for Span {
    fn from(range: RangeInclusive<u32>) -> Self {
        Self::new(*range.start(), *range.end())
    }
}
