#![forbid(unsafe_code)]

//! The two-pass layout contract.
//!
//! A layout tree is solved in two top-down passes:
//!
//! 1. **Measure**: each node reports the size it needs, never exceeding the
//!    maximum it was offered, and keeps its children's measurements.
//! 2. **Arrange**: given a rect and its own measurement, each node positions
//!    itself inside the rect and produces frames for its measured children.
//!
//! Child frames in an [`Arrangement`] are relative to the parent's frame
//! origin. [`Arrangement::absolute_frames`] composes them into one space.
//!
//! # Example
//!
//! ```
//! use trellis_layout::{LayoutNode, SizeLayout, StackLayout};
//! use trellis_core::{Rect, Size};
//!
//! let stack = LayoutNode::new(
//!     StackLayout::vertical([
//!         LayoutNode::new(SizeLayout::fixed(Size::new(40.0, 10.0))),
//!         LayoutNode::new(SizeLayout::fixed(Size::new(40.0, 20.0))),
//!     ])
//!     .spacing(4.0),
//! );
//!
//! let measurement = stack.measurement(Size::new(100.0, 100.0));
//! assert_eq!(measurement.size, Size::new(40.0, 34.0));
//!
//! let arrangement = measurement.arrangement(Rect::new(0.0, 0.0, 100.0, 100.0));
//! assert_eq!(arrangement.sublayouts[1].frame.y, 14.0);
//! ```

use std::fmt;
use std::sync::Arc;

use trellis_core::{Point, Rect, Size};

use crate::flexibility::Flexibility;

/// A node in a layout tree.
///
/// Implementations are immutable once built and may be measured and arranged
/// from any thread.
pub trait Layout: Send + Sync {
    /// Measure the minimum size needed within `max_size`.
    ///
    /// Implementations should not exceed `max_size`; [`LayoutNode::measurement`]
    /// clamps the result regardless.
    fn measure(&self, max_size: Size) -> Measured;

    /// Position this node inside `rect` using a measurement it produced.
    ///
    /// The node may leave part of `rect` unused to honor its alignment;
    /// callers must not hand that space to siblings.
    fn arrange(&self, rect: Rect, measurement: &Measurement) -> Arranged;

    /// How eagerly the node absorbs excess space.
    fn flexibility(&self) -> Flexibility;

    /// Short name used in diagnostics.
    fn kind(&self) -> &'static str {
        "layout"
    }
}

/// Raw output of [`Layout::measure`].
#[derive(Debug, Clone)]
pub struct Measured {
    pub size: Size,
    pub sublayouts: Vec<Measurement>,
}

impl Measured {
    /// A measurement with no children.
    #[inline]
    pub fn leaf(size: Size) -> Self {
        Self {
            size,
            sublayouts: Vec::new(),
        }
    }

    #[inline]
    pub fn new(size: Size, sublayouts: Vec<Measurement>) -> Self {
        Self { size, sublayouts }
    }
}

/// Raw output of [`Layout::arrange`].
#[derive(Debug, Clone)]
pub struct Arranged {
    pub frame: Rect,
    pub sublayouts: Vec<Arrangement>,
}

impl Arranged {
    /// An arrangement with no children.
    #[inline]
    pub fn leaf(frame: Rect) -> Self {
        Self {
            frame,
            sublayouts: Vec::new(),
        }
    }

    #[inline]
    pub fn new(frame: Rect, sublayouts: Vec<Arrangement>) -> Self {
        Self { frame, sublayouts }
    }
}

/// Shared handle to a layout node.
///
/// Cloning is cheap. Result trees hold handles back to the nodes that
/// produced them.
#[derive(Clone)]
pub struct LayoutNode(Arc<dyn Layout>);

impl LayoutNode {
    pub fn new(layout: impl Layout + 'static) -> Self {
        Self(Arc::new(layout))
    }

    /// Measure within `max_size`, clamping the result to it.
    pub fn measurement(&self, max_size: Size) -> Measurement {
        let Measured { size, sublayouts } = self.0.measure(max_size);
        Measurement {
            layout: self.clone(),
            size: size.decreased_to(max_size),
            max_size,
            sublayouts,
        }
    }

    /// Arrange inside `rect` using a measurement of this node.
    pub fn arrangement(&self, rect: Rect, measurement: &Measurement) -> Arrangement {
        let Arranged { frame, sublayouts } = self.0.arrange(rect, measurement);
        Arrangement {
            layout: self.clone(),
            frame,
            sublayouts,
        }
    }

    /// Measure and arrange in one step.
    ///
    /// A `None` dimension is unconstrained during measurement and takes the
    /// measured length during arrangement.
    pub fn arrangement_within(
        &self,
        origin: Point,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Arrangement {
        let max_size = Size::new(width.unwrap_or(f64::MAX), height.unwrap_or(f64::MAX));
        let measurement = self.measurement(max_size);
        let size = Size::new(
            width.unwrap_or(measurement.size.width),
            height.unwrap_or(measurement.size.height),
        );
        measurement.arrangement(Rect::from_origin_size(origin, size))
    }

    #[inline]
    pub fn flexibility(&self) -> Flexibility {
        self.0.flexibility()
    }

    #[inline]
    pub fn kind(&self) -> &'static str {
        self.0.kind()
    }

    /// Check whether two handles point at the same node.
    #[inline]
    pub fn ptr_eq(&self, other: &LayoutNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<L: Layout + 'static> From<L> for LayoutNode {
    fn from(layout: L) -> Self {
        Self::new(layout)
    }
}

impl fmt::Debug for LayoutNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LayoutNode").field(&self.kind()).finish()
    }
}

/// The measured size of a node and its children.
#[derive(Debug, Clone)]
pub struct Measurement {
    /// The node that was measured.
    pub layout: LayoutNode,
    /// Never larger than `max_size` in either dimension.
    pub size: Size,
    /// The constraint the node was measured against.
    pub max_size: Size,
    /// Child measurements, in declaration order.
    pub sublayouts: Vec<Measurement>,
}

impl Measurement {
    /// Arrange the measured node inside `rect`.
    pub fn arrangement(&self, rect: Rect) -> Arrangement {
        self.layout.arrangement(rect, self)
    }
}

/// Concrete frames for a node and its children.
#[derive(Debug, Clone)]
pub struct Arrangement {
    pub layout: LayoutNode,
    /// Frame in the parent's coordinate space.
    pub frame: Rect,
    /// Child arrangements, with frames relative to `frame`'s origin.
    pub sublayouts: Vec<Arrangement>,
}

impl Arrangement {
    /// Flatten the tree into pre-order `(node, frame)` pairs with every frame
    /// expressed in this arrangement's parent space.
    pub fn absolute_frames(&self) -> Vec<(LayoutNode, Rect)> {
        let mut frames = Vec::new();
        self.collect_frames(Point::ZERO, &mut frames);
        frames
    }

    fn collect_frames(&self, offset: Point, frames: &mut Vec<(LayoutNode, Rect)>) {
        let frame = self.frame.offset_by(offset);
        frames.push((self.layout.clone(), frame));
        for sublayout in &self.sublayouts {
            sublayout.collect_frames(frame.origin(), frames);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always asks for a fixed size, ignoring the constraint.
    struct Greedy(Size);

    impl Layout for Greedy {
        fn measure(&self, _max_size: Size) -> Measured {
            Measured::leaf(self.0)
        }

        fn arrange(&self, rect: Rect, measurement: &Measurement) -> Arranged {
            Arranged::leaf(Rect::from_origin_size(rect.origin(), measurement.size))
        }

        fn flexibility(&self) -> Flexibility {
            Flexibility::INFLEXIBLE
        }

        fn kind(&self) -> &'static str {
            "greedy"
        }
    }

    /// Offsets its only child by a fixed amount.
    struct Nudge(LayoutNode);

    impl Layout for Nudge {
        fn measure(&self, max_size: Size) -> Measured {
            let child = self.0.measurement(max_size);
            Measured::new(child.size, vec![child])
        }

        fn arrange(&self, rect: Rect, measurement: &Measurement) -> Arranged {
            let sublayouts = measurement
                .sublayouts
                .iter()
                .map(|m| m.arrangement(Rect::from_origin_size(Point::new(3.0, 4.0), m.size)))
                .collect();
            Arranged::new(rect, sublayouts)
        }

        fn flexibility(&self) -> Flexibility {
            self.0.flexibility()
        }
    }

    #[test]
    fn measurement_is_clamped_to_max() {
        let node = LayoutNode::new(Greedy(Size::new(500.0, 20.0)));
        let m = node.measurement(Size::new(100.0, 100.0));
        assert_eq!(m.size, Size::new(100.0, 20.0));
        assert_eq!(m.max_size, Size::new(100.0, 100.0));
        assert!(m.layout.ptr_eq(&node));
    }

    #[test]
    fn arrangement_records_node() {
        let node = LayoutNode::new(Greedy(Size::new(10.0, 10.0)));
        let a = node
            .measurement(Size::MAX)
            .arrangement(Rect::new(5.0, 5.0, 50.0, 50.0));
        assert_eq!(a.frame, Rect::new(5.0, 5.0, 10.0, 10.0));
        assert!(a.layout.ptr_eq(&node));
        assert_eq!(a.layout.kind(), "greedy");
    }

    #[test]
    fn arrangement_within_uses_measured_length_when_unconstrained() {
        let node = LayoutNode::new(Greedy(Size::new(30.0, 12.0)));
        let a = node.arrangement_within(Point::new(1.0, 2.0), Some(20.0), None);
        assert_eq!(a.frame, Rect::new(1.0, 2.0, 20.0, 12.0));
    }

    #[test]
    fn absolute_frames_compose_origins() {
        let leaf = LayoutNode::new(Greedy(Size::new(5.0, 5.0)));
        let inner = LayoutNode::new(Nudge(leaf.clone()));
        let outer = LayoutNode::new(Nudge(inner.clone()));

        let a = outer
            .measurement(Size::MAX)
            .arrangement(Rect::new(10.0, 10.0, 5.0, 5.0));
        let frames = a.absolute_frames();

        assert_eq!(frames.len(), 3);
        assert!(frames[0].0.ptr_eq(&outer));
        assert_eq!(frames[0].1.origin(), Point::new(10.0, 10.0));
        assert!(frames[1].0.ptr_eq(&inner));
        assert_eq!(frames[1].1.origin(), Point::new(13.0, 14.0));
        assert!(frames[2].0.ptr_eq(&leaf));
        assert_eq!(frames[2].1.origin(), Point::new(16.0, 18.0));
    }

    #[test]
    fn debug_prints_kind() {
        let node = LayoutNode::new(Greedy(Size::ZERO));
        assert_eq!(format!("{node:?}"), "LayoutNode(\"greedy\")");
    }
}
