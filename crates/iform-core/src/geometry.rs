#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! [`Rect`] describes a render area in terminal cells. [`Extent`] describes
//! the vertical span of a laid-out field inside the scrollable content, in
//! rows, using `f32` so animated scroll offsets can land between rows.

/// A rectangle for render areas.
///
/// Uses terminal coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Split off the last `rows` rows, returning `(top, bottom)`.
    pub fn split_bottom(&self, rows: u16) -> (Rect, Rect) {
        let rows = rows.min(self.height);
        let top = Rect::new(self.x, self.y, self.width, self.height - rows);
        let bottom = Rect::new(self.x, top.bottom(), self.width, rows);
        (top, bottom)
    }
}

/// Vertical span of a node inside scrollable content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    /// Distance from the top of the content to the node's top edge.
    pub top: f32,
    /// Node height.
    pub height: f32,
}

impl Extent {
    /// Create an extent.
    #[inline]
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Vertical center.
    #[inline]
    pub fn center(&self) -> f32 {
        self.top + self.height / 2.0
    }

    /// Absolute distance between this node's center and `y`.
    #[inline]
    pub fn distance_to(&self, y: f32) -> f32 {
        (self.center() - y).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(2, 3, 10, 4);
        assert_eq!(r.right(), 12);
        assert_eq!(r.bottom(), 7);
        assert!(!r.is_empty());
        assert!(Rect::from_size(0, 5).is_empty());
    }

    #[test]
    fn split_bottom_clamps() {
        let (top, bottom) = Rect::new(0, 0, 10, 5).split_bottom(2);
        assert_eq!(top, Rect::new(0, 0, 10, 3));
        assert_eq!(bottom, Rect::new(0, 3, 10, 2));
        let (top, bottom) = Rect::new(0, 0, 10, 1).split_bottom(4);
        assert_eq!(top.height, 0);
        assert_eq!(bottom.height, 1);
    }

    #[test]
    fn extent_center_and_distance() {
        let e = Extent::new(10.0, 4.0);
        assert_eq!(e.bottom(), 14.0);
        assert_eq!(e.center(), 12.0);
        assert_eq!(e.distance_to(20.0), 8.0);
        assert_eq!(e.distance_to(4.0), 8.0);
    }
}
