#![forbid(unsafe_code)]

//! Stack layout: children placed one after another along an axis.
//!
//! Measurement visits children from least to most flexible so rigid children
//! claim space first and flexible ones get what is left. Once the stack runs
//! out of room the remaining children are dropped: they are neither measured
//! nor arranged.
//!
//! Arrangement hands any excess axis length out according to the stack's
//! [`Distribution`].

use trellis_core::{Axis, AxisPoint, AxisSize, Rect, Size};

use crate::alignment::Alignment;
use crate::flexibility::{Flex, Flexibility};
use crate::layout::{Arranged, Layout, LayoutNode, Measured, Measurement};

/// How excess axis length is distributed among children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Distribution {
    /// Packed at the leading (top or left) edge.
    Leading,
    /// Packed at the trailing (bottom or right) edge.
    Trailing,
    /// Packed in the middle of the axis.
    Center,
    /// Spacing grows so children span the whole axis. The configured spacing
    /// becomes a minimum.
    FillEqualSpacing,
    /// Every child gets the same axis length.
    FillEqualSize,
    /// The most flexible child grows to absorb the excess.
    #[default]
    FillFlexing,
}

/// Offsets and spacing derived from a [`Distribution`] for one arrangement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionConfig {
    pub initial_axis_offset: f64,
    pub axis_spacing: f64,
    /// Index (into the measured children) of the child that absorbs excess.
    pub stretch_index: Option<usize>,
}

/// Axis length of each child when `count` children share `total` equally,
/// separated by `spacing`.
///
/// If not every child fits once spacing is accounted for, only as many
/// children as can be separated by `spacing` share the length.
pub fn equal_slice_length(total: f64, count: usize, spacing: f64) -> f64 {
    if count == 0 {
        return total;
    }
    if spacing == 0.0 {
        return total / count as f64;
    }
    let max_spacings = (total / spacing).floor();
    let visible = (count as f64).min(max_spacings + 1.0).max(1.0);
    (total - (visible - 1.0) * spacing) / visible
}

/// Lays out children along an axis.
///
/// # Example
///
/// ```
/// use trellis_core::Size;
/// use trellis_layout::{Distribution, LayoutNode, SizeLayout, StackLayout};
///
/// let row = StackLayout::horizontal([
///     LayoutNode::new(SizeLayout::fixed(Size::new(10.0, 10.0))),
///     LayoutNode::new(SizeLayout::fixed(Size::new(20.0, 10.0))),
/// ])
/// .spacing(5.0)
/// .distribution(Distribution::Center);
///
/// let m = LayoutNode::new(row).measurement(Size::new(100.0, 50.0));
/// assert_eq!(m.size, Size::new(35.0, 10.0));
/// ```
#[derive(Debug, Clone)]
pub struct StackLayout {
    axis: Axis,
    spacing: f64,
    distribution: Distribution,
    alignment: Alignment,
    flexibility: Flexibility,
    sublayouts: Vec<LayoutNode>,
}

impl StackLayout {
    /// Stack `sublayouts` along `axis`.
    ///
    /// Flexibility defaults to the children's most eager axis flex and their
    /// least eager cross flex.
    pub fn new(axis: Axis, sublayouts: impl IntoIterator<Item = LayoutNode>) -> Self {
        let sublayouts: Vec<LayoutNode> = sublayouts.into_iter().collect();
        let flexibility =
            Flexibility::stacked(axis, sublayouts.iter().map(LayoutNode::flexibility));
        Self {
            axis,
            spacing: 0.0,
            distribution: Distribution::default(),
            alignment: Alignment::FILL,
            flexibility,
            sublayouts,
        }
    }

    /// Stack top to bottom.
    pub fn vertical(sublayouts: impl IntoIterator<Item = LayoutNode>) -> Self {
        Self::new(Axis::Vertical, sublayouts)
    }

    /// Stack left to right.
    pub fn horizontal(sublayouts: impl IntoIterator<Item = LayoutNode>) -> Self {
        Self::new(Axis::Horizontal, sublayouts)
    }

    /// Set the gap between adjacent children. Negative values become zero.
    #[must_use]
    pub fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    #[must_use]
    pub fn distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Override the flexibility derived from the children.
    #[must_use]
    pub fn flexibility(mut self, flexibility: Flexibility) -> Self {
        self.flexibility = flexibility;
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn sublayouts(&self) -> &[LayoutNode] {
        &self.sublayouts
    }

    /// Child indices from least to most flexible along the axis.
    ///
    /// Among equal flex the later child counts as more flexible.
    fn indices_by_flex_ascending(&self) -> Vec<usize> {
        let mut order: Vec<(Flex, usize)> = self
            .sublayouts
            .iter()
            .enumerate()
            .map(|(index, node)| (node.flexibility().flex(self.axis), index))
            .collect();
        order.sort_unstable();
        order.into_iter().map(|(_, index)| index).collect()
    }

    /// The most flexible measured child, unless even it is inflexible.
    fn stretch_index(&self, measured: &[Measurement]) -> Option<usize> {
        let (flex, index) = measured
            .iter()
            .enumerate()
            .map(|(index, m)| (m.layout.flexibility().flex(self.axis), index))
            .max()?;
        flex.is_flexible().then_some(index)
    }

    /// Offsets and spacing for distributing `excess` among `measured`.
    pub fn distribution_config(&self, excess: f64, measured: &[Measurement]) -> DistributionConfig {
        let (initial_axis_offset, axis_spacing, stretch_index) = match self.distribution {
            Distribution::Leading | Distribution::FillEqualSize => (0.0, self.spacing, None),
            Distribution::Trailing => (excess, self.spacing, None),
            Distribution::Center => (excess / 2.0, self.spacing, None),
            Distribution::FillEqualSpacing => {
                let spacing = if measured.len() > 1 {
                    self.spacing.max(excess / (measured.len() - 1) as f64)
                } else {
                    self.spacing
                };
                (0.0, spacing, None)
            }
            Distribution::FillFlexing => {
                let stretch = if excess > 0.0 {
                    self.stretch_index(measured)
                } else {
                    None
                };
                (0.0, self.spacing, stretch)
            }
        };
        DistributionConfig {
            initial_axis_offset,
            axis_spacing,
            stretch_index,
        }
    }
}

impl Layout for StackLayout {
    fn measure(&self, max_size: Size) -> Measured {
        let _span = trellis_core::trace_span!(
            "stack_measure",
            axis = ?self.axis,
            children = self.sublayouts.len()
        )
        .entered();

        let axis = self.axis;
        let mut available = AxisSize::new(axis, max_size);
        let mut used = AxisSize::new(axis, Size::ZERO);

        let equal_slice = (self.distribution == Distribution::FillEqualSize).then(|| {
            equal_slice_length(available.axis_length(), self.sublayouts.len(), self.spacing)
        });

        let mut measured: Vec<Option<Measurement>> = self.sublayouts.iter().map(|_| None).collect();
        for index in self.indices_by_flex_ascending() {
            if available.axis_length() <= 0.0 || available.cross_length() <= 0.0 {
                break;
            }

            let child_max = match equal_slice {
                Some(slice) => AxisSize::from_lengths(axis, slice, available.cross_length()).size,
                None => available.size,
            };
            let measurement = self.sublayouts[index].measurement(child_max);
            let child = AxisSize::new(axis, measurement.size);

            if child.axis_length() > 0.0 {
                let leading_spacing = if used.axis_length() > 0.0 {
                    self.spacing
                } else {
                    0.0
                };
                used.set_axis_length(used.axis_length() + leading_spacing + child.axis_length());
                used.set_cross_length(used.cross_length().max(child.cross_length()));
                available.set_axis_length(
                    available.axis_length() - child.axis_length() - self.spacing,
                );
            }
            measured[index] = Some(measurement);
        }

        let sublayouts: Vec<Measurement> = measured.into_iter().flatten().collect();

        if equal_slice.is_some() && !sublayouts.is_empty() {
            let max_axis_length = sublayouts
                .iter()
                .map(|m| AxisSize::new(axis, m.size).axis_length())
                .fold(0.0, f64::max);
            let count = sublayouts.len() as f64;
            used.set_axis_length((max_axis_length + self.spacing) * count - self.spacing);
        }

        trellis_core::trace!(
            measured = sublayouts.len(),
            dropped = self.sublayouts.len() - sublayouts.len(),
            "stack measured"
        );
        Measured::new(used.size, sublayouts)
    }

    fn arrange(&self, rect: Rect, measurement: &Measurement) -> Arranged {
        let _span = trellis_core::trace_span!("stack_arrange", axis = ?self.axis).entered();

        let axis = self.axis;
        let frame = self.alignment.position(measurement.size, rect);
        let available = AxisSize::new(axis, frame.size());
        let excess = available.axis_length() - AxisSize::new(axis, measurement.size).axis_length();
        let config = self.distribution_config(excess, &measurement.sublayouts);

        let count = measurement.sublayouts.len();
        let mut next_origin = AxisPoint::from_offsets(axis, config.initial_axis_offset, 0.0);
        let mut sublayouts = Vec::with_capacity(count);

        for (index, child) in measurement.sublayouts.iter().enumerate() {
            let mut child_size = AxisSize::new(axis, child.size);
            child_size.set_cross_length(available.cross_length());
            if self.distribution == Distribution::FillEqualSize {
                child_size.set_axis_length(equal_slice_length(
                    available.axis_length(),
                    count,
                    self.spacing,
                ));
            } else if config.stretch_index == Some(index) {
                child_size.set_axis_length(child_size.axis_length() + excess);
            }

            sublayouts.push(
                child.arrangement(Rect::from_origin_size(next_origin.point, child_size.size)),
            );

            let mut offset = next_origin.axis_offset() + child_size.axis_length();
            if child_size.axis_length() > 0.0 {
                offset += config.axis_spacing;
            }
            next_origin.set_axis_offset(offset);
        }

        Arranged::new(frame, sublayouts)
    }

    fn flexibility(&self) -> Flexibility {
        self.flexibility
    }

    fn kind(&self) -> &'static str {
        "stack"
    }
}
