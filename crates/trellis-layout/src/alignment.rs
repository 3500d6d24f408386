#![forbid(unsafe_code)]

//! Positioning a measured size inside an available rectangle.
//!
//! The one-dimensional math lives on [`HorizontalAlignment`]; vertical
//! alignment is mapped onto it (Top→Leading, Bottom→Trailing) so the
//! arithmetic exists exactly once.

use std::fmt;
use std::sync::Arc;
use trellis_core::{Rect, Size};

/// Placement along the horizontal dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    /// Aligned to the leading (left) edge.
    Leading,
    /// Aligned to the trailing (right) edge.
    Trailing,
    /// Centered in the available width.
    Center,
    /// Width set to the available width.
    Fill,
}

/// Placement along the vertical dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    Top,
    Bottom,
    Center,
    /// Height set to the available height.
    Fill,
}

/// Result of aligning a length inside an available length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetAndLength {
    pub offset: f64,
    pub length: f64,
}

impl HorizontalAlignment {
    /// Align `length` inside `available_length`, starting at `offset`.
    ///
    /// Non-fill alignments never return a length larger than the available
    /// length. A negative excess (content larger than the space) pushes
    /// trailing and centered content before `offset`.
    pub fn align(self, length: f64, available_length: f64, offset: f64) -> OffsetAndLength {
        let excess = available_length - length;
        let clamped = available_length.min(length);
        let (aligned_offset, aligned_length) = match self {
            Self::Leading => (0.0, clamped),
            Self::Trailing => (excess, clamped),
            Self::Center => (excess / 2.0, clamped),
            Self::Fill => (0.0, available_length),
        };
        OffsetAndLength {
            offset: offset + aligned_offset,
            length: aligned_length,
        }
    }
}

impl VerticalAlignment {
    /// The horizontal alignment with the same placement rule.
    #[inline]
    pub const fn as_horizontal(self) -> HorizontalAlignment {
        match self {
            Self::Top => HorizontalAlignment::Leading,
            Self::Bottom => HorizontalAlignment::Trailing,
            Self::Center => HorizontalAlignment::Center,
            Self::Fill => HorizontalAlignment::Fill,
        }
    }

    /// Align `length` inside `available_length`, starting at `offset`.
    #[inline]
    pub fn align(self, length: f64, available_length: f64, offset: f64) -> OffsetAndLength {
        self.as_horizontal().align(length, available_length, offset)
    }
}

/// A function that places a size inside a rectangle.
pub type Aligner = Arc<dyn Fn(Size, Rect) -> Rect + Send + Sync>;

/// How a node positions its measured size inside the rect it is given.
#[derive(Clone)]
pub enum Alignment {
    /// Independent placement per dimension.
    Pair {
        vertical: VerticalAlignment,
        horizontal: HorizontalAlignment,
    },
    /// Arbitrary placement function.
    Custom(Aligner),
}

impl Alignment {
    pub const CENTER: Self = Self::new(VerticalAlignment::Center, HorizontalAlignment::Center);
    pub const CENTER_LEADING: Self =
        Self::new(VerticalAlignment::Center, HorizontalAlignment::Leading);
    pub const CENTER_TRAILING: Self =
        Self::new(VerticalAlignment::Center, HorizontalAlignment::Trailing);

    pub const FILL: Self = Self::new(VerticalAlignment::Fill, HorizontalAlignment::Fill);
    pub const FILL_LEADING: Self = Self::new(VerticalAlignment::Fill, HorizontalAlignment::Leading);
    pub const FILL_TRAILING: Self =
        Self::new(VerticalAlignment::Fill, HorizontalAlignment::Trailing);

    pub const TOP_LEADING: Self = Self::new(VerticalAlignment::Top, HorizontalAlignment::Leading);
    pub const TOP_TRAILING: Self = Self::new(VerticalAlignment::Top, HorizontalAlignment::Trailing);
    pub const TOP_CENTER: Self = Self::new(VerticalAlignment::Top, HorizontalAlignment::Center);
    pub const TOP_FILL: Self = Self::new(VerticalAlignment::Top, HorizontalAlignment::Fill);

    pub const BOTTOM_LEADING: Self =
        Self::new(VerticalAlignment::Bottom, HorizontalAlignment::Leading);
    pub const BOTTOM_TRAILING: Self =
        Self::new(VerticalAlignment::Bottom, HorizontalAlignment::Trailing);
    pub const BOTTOM_CENTER: Self =
        Self::new(VerticalAlignment::Bottom, HorizontalAlignment::Center);
    pub const BOTTOM_FILL: Self = Self::new(VerticalAlignment::Bottom, HorizontalAlignment::Fill);

    /// Alignment from a vertical/horizontal pair.
    pub const fn new(vertical: VerticalAlignment, horizontal: HorizontalAlignment) -> Self {
        Self::Pair {
            vertical,
            horizontal,
        }
    }

    /// Alignment backed by a custom placement function.
    pub fn custom(aligner: impl Fn(Size, Rect) -> Rect + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(aligner))
    }

    /// Scale the size down (or up) to the largest size with the same aspect
    /// ratio that fits in the rect, then center it.
    ///
    /// A size with a non-positive dimension has no aspect ratio; it is
    /// treated as a zero size and centered.
    pub fn aspect_fit() -> Self {
        Self::custom(|size: Size, rect: Rect| {
            if size.width <= 0.0 || size.height <= 0.0 {
                return Alignment::CENTER.position(Size::ZERO, rect);
            }
            let size_ratio = size.width / size.height;
            let rect_ratio = rect.width / rect.height;
            let scaled = if rect_ratio > size_ratio {
                Size::new(rect.height * size_ratio, rect.height)
            } else {
                Size::new(rect.width, rect.width / size_ratio)
            };
            Alignment::CENTER.position(scaled, rect)
        })
    }

    /// Position a rect of the given size inside `rect`.
    pub fn position(&self, size: Size, rect: Rect) -> Rect {
        match self {
            Self::Pair {
                vertical,
                horizontal,
            } => {
                let h = horizontal.align(size.width, rect.width, rect.x);
                let v = vertical.align(size.height, rect.height, rect.y);
                Rect::new(h.offset, v.offset, h.length, v.length)
            }
            Self::Custom(aligner) => aligner(size, rect),
        }
    }
}

impl fmt::Debug for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pair {
                vertical,
                horizontal,
            } => f
                .debug_struct("Alignment")
                .field("vertical", vertical)
                .field("horizontal", horizontal)
                .finish(),
            Self::Custom(_) => f.write_str("Alignment::Custom(..)"),
        }
    }
}

/// Custom alignments compare by identity.
impl PartialEq for Alignment {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Pair {
                    vertical: v1,
                    horizontal: h1,
                },
                Self::Pair {
                    vertical: v2,
                    horizontal: h2,
                },
            ) => v1 == v2 && h1 == h2,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
