#![forbid(unsafe_code)]

//! Trellis Runtime
//!
//! Computes layouts for list and grid surfaces on a background thread and
//! hands the results to the foreground as they become ready.
//!
//! # Key Components
//!
//! - [`ReloadAdapter`] - owns the surface, the worker and the published snapshot
//! - [`ReloadableSurface`] - what the adapter needs from a list or grid view
//! - [`Section`] / [`IndexPath`] - sectioned data and item addressing
//! - [`LayoutWorker`] - the serial background thread
//! - [`CancelToken`] - cooperative cancellation between reloads
//!
//! # How it fits in the system
//! `trellis-layout` solves single layout trees. This crate solves many of them,
//! one per item, and keeps the surface in step while the user scrolls.

pub mod adapter;
pub mod cancel;
pub mod debug_trace;
pub mod error;
pub mod section;
pub mod surface;
pub mod worker;

pub use adapter::{AdapterConfig, PipelineState, ReloadAdapter, ReloadOptions, Snapshot};
pub use cancel::{CancelToken, CancelTrigger};
pub use error::PipelineError;
pub use section::{IndexPath, Section};
pub use surface::ReloadableSurface;
#[cfg(any(test, feature = "test-helpers"))]
pub use surface::{RecordingSurface, SurfaceCall};
pub use worker::{Job, LayoutWorker};
