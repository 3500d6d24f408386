#![forbid(unsafe_code)]

//! Axis-relative views of sizes and points.
//!
//! Layout algorithms are written once in terms of "along the axis" and
//! "across the axis" and then projected onto width/height or x/y:
//!
//! | Axis         | axis length | cross length | axis offset | cross offset |
//! |--------------|-------------|--------------|-------------|--------------|
//! | `Horizontal` | width       | height       | x           | y            |
//! | `Vertical`   | height      | width        | y           | x            |

use crate::geometry::{Point, Size};

/// The direction children are distributed along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    #[default]
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[inline]
    pub const fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// A [`Size`] viewed along an [`Axis`].
///
/// Setters write through to the underlying size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSize {
    pub axis: Axis,
    pub size: Size,
}

impl AxisSize {
    /// View an existing size along `axis`.
    #[inline]
    pub const fn new(axis: Axis, size: Size) -> Self {
        Self { axis, size }
    }

    /// Build a size from axis-relative lengths.
    #[inline]
    pub const fn from_lengths(axis: Axis, axis_length: f64, cross_length: f64) -> Self {
        let size = match axis {
            Axis::Horizontal => Size::new(axis_length, cross_length),
            Axis::Vertical => Size::new(cross_length, axis_length),
        };
        Self { axis, size }
    }

    #[inline]
    pub const fn axis_length(&self) -> f64 {
        match self.axis {
            Axis::Horizontal => self.size.width,
            Axis::Vertical => self.size.height,
        }
    }

    #[inline]
    pub const fn cross_length(&self) -> f64 {
        match self.axis {
            Axis::Horizontal => self.size.height,
            Axis::Vertical => self.size.width,
        }
    }

    #[inline]
    pub fn set_axis_length(&mut self, length: f64) {
        match self.axis {
            Axis::Horizontal => self.size.width = length,
            Axis::Vertical => self.size.height = length,
        }
    }

    #[inline]
    pub fn set_cross_length(&mut self, length: f64) {
        match self.axis {
            Axis::Horizontal => self.size.height = length,
            Axis::Vertical => self.size.width = length,
        }
    }
}

/// A [`Point`] viewed along an [`Axis`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisPoint {
    pub axis: Axis,
    pub point: Point,
}

impl AxisPoint {
    /// View an existing point along `axis`.
    #[inline]
    pub const fn new(axis: Axis, point: Point) -> Self {
        Self { axis, point }
    }

    /// Build a point from axis-relative offsets.
    #[inline]
    pub const fn from_offsets(axis: Axis, axis_offset: f64, cross_offset: f64) -> Self {
        let point = match axis {
            Axis::Horizontal => Point::new(axis_offset, cross_offset),
            Axis::Vertical => Point::new(cross_offset, axis_offset),
        };
        Self { axis, point }
    }

    #[inline]
    pub const fn axis_offset(&self) -> f64 {
        match self.axis {
            Axis::Horizontal => self.point.x,
            Axis::Vertical => self.point.y,
        }
    }

    #[inline]
    pub const fn cross_offset(&self) -> f64 {
        match self.axis {
            Axis::Horizontal => self.point.y,
            Axis::Vertical => self.point.x,
        }
    }

    #[inline]
    pub fn set_axis_offset(&mut self, offset: f64) {
        match self.axis {
            Axis::Horizontal => self.point.x = offset,
            Axis::Vertical => self.point.y = offset,
        }
    }

    #[inline]
    pub fn set_cross_offset(&mut self, offset: f64) {
        match self.axis {
            Axis::Horizontal => self.point.y = offset,
            Axis::Vertical => self.point.x = offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_size_maps_axis_to_width() {
        let s = AxisSize::new(Axis::Horizontal, Size::new(3.0, 7.0));
        assert_eq!(s.axis_length(), 3.0);
        assert_eq!(s.cross_length(), 7.0);
    }

    #[test]
    fn vertical_size_maps_axis_to_height() {
        let s = AxisSize::new(Axis::Vertical, Size::new(3.0, 7.0));
        assert_eq!(s.axis_length(), 7.0);
        assert_eq!(s.cross_length(), 3.0);
    }

    #[test]
    fn from_lengths_projects_back() {
        assert_eq!(
            AxisSize::from_lengths(Axis::Horizontal, 1.0, 2.0).size,
            Size::new(1.0, 2.0)
        );
        assert_eq!(
            AxisSize::from_lengths(Axis::Vertical, 1.0, 2.0).size,
            Size::new(2.0, 1.0)
        );
    }

    #[test]
    fn setters_write_through() {
        let mut s = AxisSize::new(Axis::Vertical, Size::ZERO);
        s.set_axis_length(10.0);
        s.set_cross_length(4.0);
        assert_eq!(s.size, Size::new(4.0, 10.0));

        let mut p = AxisPoint::new(Axis::Horizontal, Point::ZERO);
        p.set_axis_offset(5.0);
        p.set_cross_offset(6.0);
        assert_eq!(p.point, Point::new(5.0, 6.0));
        assert_eq!(p.axis_offset(), 5.0);
        assert_eq!(p.cross_offset(), 6.0);
    }

    #[test]
    fn vertical_point_offsets() {
        let p = AxisPoint::from_offsets(Axis::Vertical, 8.0, 2.0);
        assert_eq!(p.point, Point::new(2.0, 8.0));
    }

    #[test]
    fn cross_is_involution() {
        assert_eq!(Axis::Horizontal.cross(), Axis::Vertical);
        assert_eq!(Axis::Vertical.cross().cross(), Axis::Vertical);
    }
}
