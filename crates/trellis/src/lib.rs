#![forbid(unsafe_code)]

//! Trellis public facade crate.
//!
//! Re-exports the layout vocabulary and the reload pipeline from the
//! internal crates, plus a prelude for day-to-day use.
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//!
//! let title = LayoutNode::new(SizeLayout::new().height(18.0));
//! let subtitle = LayoutNode::new(SizeLayout::new().height(14.0));
//! let cell = LayoutNode::new(InsetLayout::new(
//!     EdgeInsets::uniform(8.0),
//!     StackLayout::vertical([title, subtitle]).spacing(2.0),
//! ));
//!
//! let arrangement = cell.arrangement_within(Point::ZERO, Some(320.0), None);
//! assert_eq!(arrangement.frame.size(), Size::new(320.0, 50.0));
//! ```

#[cfg(feature = "runtime")]
use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use trellis_core::{Axis, AxisPoint, AxisSize, EdgeInsets, Point, Rect, Size};

// --- Layout re-exports -----------------------------------------------------

pub use trellis_layout::{
    Alignment, Arrangement, ContentLayout, Distribution, Flex, Flexibility, HorizontalAlignment,
    InsetLayout, LabelLayout, Layout, LayoutNode, Measurement, SizeLayout, StackLayout,
    TextMeasurer, VerticalAlignment,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use trellis_runtime::{
    AdapterConfig, IndexPath, PipelineError, PipelineState, ReloadAdapter, ReloadOptions,
    ReloadableSurface, Section,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for trellis apps.
///
/// Layout itself never fails; errors come from the background pipeline.
#[cfg(feature = "runtime")]
#[derive(Debug)]
pub enum Error {
    /// The background pipeline failed.
    Pipeline(PipelineError),
}

#[cfg(feature = "runtime")]
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pipeline(err) => write!(f, "{err}"),
        }
    }
}

#[cfg(feature = "runtime")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pipeline(err) => Some(err),
        }
    }
}

#[cfg(feature = "runtime")]
impl From<PipelineError> for Error {
    fn from(err: PipelineError) -> Self {
        Self::Pipeline(err)
    }
}

/// Standard result type for trellis APIs.
#[cfg(feature = "runtime")]
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Alignment, Axis, EdgeInsets, Flexibility, InsetLayout, LayoutNode, Point, Rect, Size,
        SizeLayout, StackLayout,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{Error, ReloadAdapter, ReloadOptions, ReloadableSurface, Result, Section};

    pub use crate::{core, layout};
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use trellis_core as core;
pub use trellis_layout as layout;
#[cfg(feature = "runtime")]
pub use trellis_runtime as runtime;
