#![forbid(unsafe_code)]

//! Leaf node wrapping externally sized content.

use std::fmt;
use std::sync::Arc;

use trellis_core::{Rect, Size};

use crate::alignment::Alignment;
use crate::flexibility::Flexibility;
use crate::layout::{Arranged, Layout, Measured, Measurement};

/// Content that can report the size it needs.
pub trait MeasurableContent: Send + Sync {
    /// The size that best fits within `max_size`.
    fn size_that_fits(&self, max_size: Size) -> Size;
}

impl<F> MeasurableContent for F
where
    F: Fn(Size) -> Size + Send + Sync,
{
    fn size_that_fits(&self, max_size: Size) -> Size {
        self(max_size)
    }
}

/// Leaf that asks its content for a size.
#[derive(Clone)]
pub struct ContentLayout {
    content: Arc<dyn MeasurableContent>,
    alignment: Alignment,
    flexibility: Flexibility,
}

impl ContentLayout {
    pub fn new(content: impl MeasurableContent + 'static) -> Self {
        Self::from_arc(Arc::new(content))
    }

    /// Wrap content that is shared elsewhere.
    pub fn from_arc(content: Arc<dyn MeasurableContent>) -> Self {
        Self {
            content,
            alignment: Alignment::FILL,
            flexibility: Flexibility::FLEXIBLE,
        }
    }

    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn flexibility(mut self, flexibility: Flexibility) -> Self {
        self.flexibility = flexibility;
        self
    }
}

impl fmt::Debug for ContentLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentLayout")
            .field("alignment", &self.alignment)
            .field("flexibility", &self.flexibility)
            .finish_non_exhaustive()
    }
}

impl Layout for ContentLayout {
    fn measure(&self, max_size: Size) -> Measured {
        Measured::leaf(self.content.size_that_fits(max_size))
    }

    fn arrange(&self, rect: Rect, measurement: &Measurement) -> Arranged {
        Arranged::leaf(self.alignment.position(measurement.size, rect))
    }

    fn flexibility(&self) -> Flexibility {
        self.flexibility
    }

    fn kind(&self) -> &'static str {
        "content"
    }
}
