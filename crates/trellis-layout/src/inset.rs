#![forbid(unsafe_code)]

//! Padding around a single child.

use trellis_core::{EdgeInsets, Point, Rect, Size};

use crate::alignment::Alignment;
use crate::flexibility::Flexibility;
use crate::layout::{Arranged, Layout, LayoutNode, Measured, Measurement};

/// Insets its child by fixed edge distances.
///
/// The child is measured against the offered size minus the insets (never
/// below zero) and the insets are added back to the result. Flexibility is
/// the child's.
#[derive(Debug, Clone)]
pub struct InsetLayout {
    insets: EdgeInsets,
    alignment: Alignment,
    sublayout: LayoutNode,
}

impl InsetLayout {
    pub fn new(insets: EdgeInsets, sublayout: impl Into<LayoutNode>) -> Self {
        Self {
            insets,
            alignment: Alignment::FILL,
            sublayout: sublayout.into(),
        }
    }

    /// The same inset on every edge.
    pub fn uniform(inset: f64, sublayout: impl Into<LayoutNode>) -> Self {
        Self::new(EdgeInsets::uniform(inset), sublayout)
    }

    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn insets(&self) -> EdgeInsets {
        self.insets
    }
}

impl Layout for InsetLayout {
    fn measure(&self, max_size: Size) -> Measured {
        let inner = max_size.decreased_by(self.insets);
        let inner = Size::new(inner.width.max(0.0), inner.height.max(0.0));
        let child = self.sublayout.measurement(inner);
        Measured::new(child.size.increased_by(self.insets), vec![child])
    }

    fn arrange(&self, rect: Rect, measurement: &Measurement) -> Arranged {
        let frame = self.alignment.position(measurement.size, rect);
        let inner = Rect::from_origin_size(
            Point::new(self.insets.left, self.insets.top),
            frame.size().decreased_by(self.insets),
        );
        let sublayouts = measurement
            .sublayouts
            .iter()
            .map(|child| child.arrangement(inner))
            .collect();
        Arranged::new(frame, sublayouts)
    }

    fn flexibility(&self) -> Flexibility {
        self.sublayout.flexibility()
    }

    fn kind(&self) -> &'static str {
        "inset"
    }
}
