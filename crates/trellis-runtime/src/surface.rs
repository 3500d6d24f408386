#![forbid(unsafe_code)]

//! The presentation surface a reload pipeline feeds.

use trellis_core::{Axis, Rect};

use crate::section::IndexPath;

/// A scrollable list or grid that renders from the pipeline's snapshot.
///
/// Every method is called on the foreground thread.
pub trait ReloadableSurface {
    /// Visible bounds.
    fn bounds(&self) -> Rect;

    /// The user is touching the surface.
    fn is_tracking(&self) -> bool;

    /// The surface is still moving after the user let go.
    fn is_decelerating(&self) -> bool;

    /// The axis the surface scrolls along. Items are laid out with the
    /// perpendicular dimension constrained.
    fn scroll_axis(&self) -> Axis;

    /// Discard everything rendered and re-read the snapshot.
    fn reload_data_sync(&mut self);

    /// Register the cell kinds the pipeline will request under `reuse_id`.
    fn register_views(&mut self, reuse_id: &str);

    /// Animate in whole new sections.
    fn insert_sections(&mut self, sections: &[usize]);

    /// Animate in new items of existing sections.
    fn insert_items(&mut self, index_paths: &[IndexPath]);
}

/// One recorded surface call.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    RegisterViews(String),
    ReloadData,
    InsertSections(Vec<usize>),
    InsertItems(Vec<IndexPath>),
}

/// In-memory surface that records every mutation.
///
/// Interaction state is set directly, so tests can simulate a user
/// dragging between pipeline hops.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    bounds: Rect,
    axis: Axis,
    tracking: bool,
    decelerating: bool,
    calls: Vec<SurfaceCall>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl RecordingSurface {
    /// A vertically scrolling surface with the given bounds.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            axis: Axis::Vertical,
            tracking: false,
            decelerating: false,
            calls: Vec::new(),
        }
    }

    #[must_use]
    pub fn scroll_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn set_tracking(&mut self, tracking: bool) {
        self.tracking = tracking;
    }

    pub fn set_decelerating(&mut self, decelerating: bool) {
        self.decelerating = decelerating;
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Drain the recorded calls.
    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl ReloadableSurface for RecordingSurface {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn is_tracking(&self) -> bool {
        self.tracking
    }

    fn is_decelerating(&self) -> bool {
        self.decelerating
    }

    fn scroll_axis(&self) -> Axis {
        self.axis
    }

    fn reload_data_sync(&mut self) {
        self.calls.push(SurfaceCall::ReloadData);
    }

    fn register_views(&mut self, reuse_id: &str) {
        self.calls.push(SurfaceCall::RegisterViews(reuse_id.to_owned()));
    }

    fn insert_sections(&mut self, sections: &[usize]) {
        self.calls.push(SurfaceCall::InsertSections(sections.to_vec()));
    }

    fn insert_items(&mut self, index_paths: &[IndexPath]) {
        self.calls.push(SurfaceCall::InsertItems(index_paths.to_vec()));
    }
}
