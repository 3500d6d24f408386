#![forbid(unsafe_code)]

//! Layout nodes and solvers.
//!
//! This crate provides the node tree and its two-pass solver:
//!
//! - [`Layout`] / [`LayoutNode`] - the measure/arrange contract and its shared handle
//! - [`StackLayout`] - children along an axis with flexibility-driven distribution
//! - [`InsetLayout`], [`SizeLayout`] - single-child decorators
//! - [`LabelLayout`], [`ContentLayout`] - leaves sized by external collaborators
//! - [`Alignment`], [`Flexibility`] - placement and growth policies
//!
//! # Example
//!
//! ```
//! use trellis_core::{EdgeInsets, Rect, Size};
//! use trellis_layout::{Flexibility, InsetLayout, LayoutNode, SizeLayout, StackLayout};
//!
//! let avatar = LayoutNode::new(SizeLayout::fixed(Size::new(40.0, 40.0)));
//! let body = LayoutNode::new(SizeLayout::new().height(20.0).flexibility(Flexibility::HIGH));
//! let row = StackLayout::horizontal([avatar, body]).spacing(8.0);
//! let cell = LayoutNode::new(InsetLayout::new(EdgeInsets::uniform(4.0), row));
//!
//! let arrangement = cell.arrangement_within(Default::default(), Some(320.0), None);
//! assert_eq!(arrangement.frame, Rect::new(0.0, 0.0, 320.0, 48.0));
//! ```

pub mod alignment;
pub mod content;
pub mod flexibility;
pub mod inset;
pub mod label;
pub mod layout;
pub mod size;
pub mod stack;

pub use alignment::{Aligner, Alignment, HorizontalAlignment, OffsetAndLength, VerticalAlignment};
pub use content::{ContentLayout, MeasurableContent};
pub use flexibility::{AxisFlexibility, Flex, Flexibility};
pub use inset::InsetLayout;
pub use label::{LabelLayout, TextMeasurer, round_up_to_pixel};
pub use layout::{Arranged, Arrangement, Layout, LayoutNode, Measured, Measurement};
pub use size::SizeLayout;
pub use stack::{Distribution, DistributionConfig, StackLayout, equal_slice_length};
pub use trellis_core::{Axis, EdgeInsets, Point, Rect, Size};
