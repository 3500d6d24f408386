#![forbid(unsafe_code)]

//! Core: geometry primitives, axis projections, and logging.

pub mod axis;
pub mod geometry;
pub mod logging;

pub use axis::{Axis, AxisPoint, AxisSize};
pub use geometry::{EdgeInsets, Point, Rect, Size};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{trace, trace_span};
