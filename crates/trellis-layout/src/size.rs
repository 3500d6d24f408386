#![forbid(unsafe_code)]

//! Fixed-size layout with an optional child.

use trellis_core::{Rect, Size};

use crate::alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
use crate::flexibility::{Flex, Flexibility};
use crate::layout::{Arranged, Layout, LayoutNode, Measured, Measurement};

/// Pins its width and/or height.
///
/// An unpinned dimension takes the child's measured length, or zero without
/// a child. Unless overridden:
///
/// | Dimension | Alignment | Flex          |
/// |-----------|-----------|---------------|
/// | pinned    | center    | inflexible    |
/// | unpinned  | fill      | default (`0`) |
#[derive(Debug, Clone, Default)]
pub struct SizeLayout {
    width: Option<f64>,
    height: Option<f64>,
    alignment: Option<Alignment>,
    flexibility: Option<Flexibility>,
    sublayout: Option<LayoutNode>,
}

impl SizeLayout {
    /// Nothing pinned, no child.
    pub fn new() -> Self {
        Self::default()
    }

    /// Both dimensions pinned.
    pub fn fixed(size: Size) -> Self {
        Self::new().size(size)
    }

    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn size(self, size: Size) -> Self {
        self.width(size.width).height(size.height)
    }

    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    #[must_use]
    pub fn flexibility(mut self, flexibility: Flexibility) -> Self {
        self.flexibility = Some(flexibility);
        self
    }

    #[must_use]
    pub fn sublayout(mut self, sublayout: impl Into<LayoutNode>) -> Self {
        self.sublayout = Some(sublayout.into());
        self
    }

    fn resolved_alignment(&self) -> Alignment {
        if let Some(alignment) = &self.alignment {
            return alignment.clone();
        }
        let vertical = match self.height {
            Some(_) => VerticalAlignment::Center,
            None => VerticalAlignment::Fill,
        };
        let horizontal = match self.width {
            Some(_) => HorizontalAlignment::Center,
            None => HorizontalAlignment::Fill,
        };
        Alignment::new(vertical, horizontal)
    }

    fn resolved_flexibility(&self) -> Flexibility {
        self.flexibility.unwrap_or_else(|| {
            let flex = |pinned: Option<f64>| match pinned {
                Some(_) => Flex::INFLEXIBLE,
                None => Flex::DEFAULT,
            };
            Flexibility::new(flex(self.width), flex(self.height))
        })
    }
}

impl Layout for SizeLayout {
    fn measure(&self, max_size: Size) -> Measured {
        let pinned = Size::new(
            self.width.unwrap_or(f64::MAX),
            self.height.unwrap_or(f64::MAX),
        );
        let mut size = pinned.decreased_to(max_size);

        let child = self.sublayout.as_ref().map(|node| node.measurement(size));
        if self.width.is_none() || self.height.is_none() {
            let child_size = child.as_ref().map_or(Size::ZERO, |m| m.size);
            if self.width.is_none() {
                size.width = child_size.width;
            }
            if self.height.is_none() {
                size.height = child_size.height;
            }
        }

        Measured::new(size, child.into_iter().collect())
    }

    fn arrange(&self, rect: Rect, measurement: &Measurement) -> Arranged {
        let frame = self.resolved_alignment().position(measurement.size, rect);
        let sublayouts = measurement
            .sublayouts
            .iter()
            .map(|child| child.arrangement(Rect::from_size(frame.size())))
            .collect();
        Arranged::new(frame, sublayouts)
    }

    fn flexibility(&self) -> Flexibility {
        self.resolved_flexibility()
    }

    fn kind(&self) -> &'static str {
        "size"
    }
}
