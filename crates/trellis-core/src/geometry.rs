#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are in points, `f64`, with the origin at the top-left and `y`
//! growing downward. Nothing here panics on zero, negative, or infinite
//! input; degenerate values simply flow through the arithmetic.

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// The empty size.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// An effectively unbounded size, used as "no constraint".
    pub const MAX: Self = Self::new(f64::MAX, f64::MAX);

    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check if either dimension is zero or negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Shrink each dimension so it does not exceed `max`.
    #[inline]
    pub fn decreased_to(self, max: Size) -> Size {
        Size::new(self.width.min(max.width), self.height.min(max.height))
    }

    /// Subtract insets from both dimensions.
    ///
    /// The result may be negative; callers that need a floor apply it.
    #[inline]
    pub fn decreased_by(self, insets: EdgeInsets) -> Size {
        Size::new(
            self.width - insets.horizontal_sum(),
            self.height - insets.vertical_sum(),
        )
    }

    /// Add insets to both dimensions.
    #[inline]
    pub fn increased_by(self, insets: EdgeInsets) -> Size {
        Size::new(
            self.width + insets.horizontal_sum(),
            self.height + insets.vertical_sum(),
        )
    }
}

impl From<(f64, f64)> for Size {
    fn from((width, height): (f64, f64)) -> Self {
        Self::new(width, height)
    }
}

/// An x/y position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle: origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (`x + width`).
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Translate the rectangle by a point, keeping its size.
    #[inline]
    pub fn offset_by(&self, delta: Point) -> Rect {
        Rect::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Shrink the rectangle by insets, moving the origin by the top/left inset.
    pub fn inset_by(&self, insets: EdgeInsets) -> Rect {
        Rect::from_origin_size(
            Point::new(self.x + insets.left, self.y + insets.top),
            self.size().decreased_by(insets),
        )
    }

    /// Check if a point lies inside the rectangle (right/bottom exclusive).
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.max_x() && point.y >= self.y && point.y < self.max_y()
    }
}

/// Distances inset from each edge of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    /// No insets.
    pub const ZERO: Self = Self::uniform(0.0);

    /// Create insets with explicit values.
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Create insets with the same value on every edge.
    pub const fn uniform(inset: f64) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// Sum of left and right.
    #[inline]
    pub fn horizontal_sum(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical_sum(&self) -> f64 {
        self.top + self.bottom
    }
}

impl From<f64> for EdgeInsets {
    fn from(inset: f64) -> Self {
        Self::uniform(inset)
    }
}

#[cfg(test)]
mod tests {
    use super::{EdgeInsets, Point, Rect, Size};

    #[test]
    fn size_decreased_to_is_per_dimension() {
        let size = Size::new(100.0, 20.0);
        assert_eq!(size.decreased_to(Size::new(50.0, 80.0)), Size::new(50.0, 20.0));
    }

    #[test]
    fn size_insets_round_trip() {
        let insets = EdgeInsets::new(1.0, 2.0, 3.0, 4.0);
        let size = Size::new(40.0, 30.0);
        assert_eq!(size.decreased_by(insets), Size::new(34.0, 26.0));
        assert_eq!(size.decreased_by(insets).increased_by(insets), size);
    }

    #[test]
    fn size_decreased_by_can_go_negative() {
        let size = Size::new(4.0, 4.0).decreased_by(EdgeInsets::uniform(5.0));
        assert_eq!(size, Size::new(-6.0, -6.0));
        assert!(size.is_empty());
    }

    #[test]
    fn size_max_is_unbounded() {
        let size = Size::new(320.0, 10.0);
        assert_eq!(size.decreased_to(Size::MAX), size);
    }

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.max_x(), 40.0);
        assert_eq!(r.max_y(), 60.0);
        assert_eq!(r.origin(), Point::new(10.0, 20.0));
        assert_eq!(r.size(), Size::new(30.0, 40.0));
    }

    #[test]
    fn rect_offset_keeps_size() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0).offset_by(Point::new(10.0, -2.0));
        assert_eq!(r, Rect::new(11.0, 0.0, 3.0, 4.0));
    }

    #[test]
    fn rect_inset_by_moves_origin() {
        let r = Rect::new(0.0, 0.0, 20.0, 20.0).inset_by(EdgeInsets::new(2.0, 5.0, 4.0, 3.0));
        assert_eq!(r, Rect::new(5.0, 2.0, 12.0, 14.0));
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect::new(0.0, 0.0, 5.0, 5.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(4.9, 4.9)));
        assert!(!r.contains(Point::new(5.0, 0.0)));
        assert!(!r.contains(Point::new(0.0, 5.0)));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let r = Rect::new(5.0, 5.0, 0.0, 0.0);
        assert!(r.is_empty());
        assert!(!r.contains(Point::new(5.0, 5.0)));
    }

    #[test]
    fn edge_insets_sums() {
        let insets = EdgeInsets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(insets.horizontal_sum(), 6.0);
        assert_eq!(insets.vertical_sum(), 4.0);
        assert_eq!(EdgeInsets::from(2.0), EdgeInsets::uniform(2.0));
    }
}
