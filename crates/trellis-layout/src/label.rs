#![forbid(unsafe_code)]

//! Text leaf node.
//!
//! Glyph metrics belong to the host platform, so sizing goes through a
//! [`TextMeasurer`]. The node adds the rules that do not depend on a font:
//! empty text is zero-sized, sizes are rounded up to whole device pixels and
//! an optional line limit caps the height.

use std::fmt;
use std::sync::Arc;

use trellis_core::{Rect, Size};

use crate::alignment::Alignment;
use crate::flexibility::Flexibility;
use crate::layout::{Arranged, Layout, Measured, Measurement};

/// Measures text for a [`LabelLayout`].
pub trait TextMeasurer: Send + Sync {
    /// Bounding size of `text` laid out within `max_size`.
    fn text_size(&self, text: &str, max_size: Size) -> Size;

    /// Height of one line of text.
    fn line_height(&self) -> f64;

    /// Device pixels per point.
    fn scale(&self) -> f64 {
        1.0
    }
}

/// Round `length` up to the next device pixel boundary.
///
/// Non-positive lengths become zero; anything smaller than one pixel
/// becomes exactly one pixel.
pub fn round_up_to_pixel(length: f64, scale: f64) -> f64 {
    if length <= 0.0 {
        return 0.0;
    }
    let scale = if scale > 0.0 { scale } else { 1.0 };
    let precision = 1.0 / scale;
    if length <= precision {
        return precision;
    }
    (length * scale).ceil() / scale
}

/// A run of text.
#[derive(Clone)]
pub struct LabelLayout {
    text: String,
    number_of_lines: usize,
    measurer: Arc<dyn TextMeasurer>,
    alignment: Alignment,
    flexibility: Flexibility,
}

impl LabelLayout {
    pub fn new(text: impl Into<String>, measurer: Arc<dyn TextMeasurer>) -> Self {
        Self {
            text: text.into(),
            number_of_lines: 0,
            measurer,
            alignment: Alignment::TOP_LEADING,
            flexibility: Flexibility::FLEXIBLE,
        }
    }

    /// Limit the label to `lines` lines; `0` means unlimited.
    #[must_use]
    pub fn number_of_lines(mut self, lines: usize) -> Self {
        self.number_of_lines = lines;
        self
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

    pub fn text(&self) -> &str {
        &self.text
    }

    fn text_size(&self, max_size: Size) -> Size {
        if self.text.is_empty() {
            return Size::ZERO;
        }
        let scale = self.measurer.scale();
        let raw = self.measurer.text_size(&self.text, max_size);
        let size = Size::new(
            round_up_to_pixel(raw.width, scale),
            round_up_to_pixel(raw.height, scale),
        );
        if self.number_of_lines > 0 {
            let max_height =
                round_up_to_pixel(self.number_of_lines as f64 * self.measurer.line_height(), scale);
            if size.height > max_height {
                return Size::new(max_size.width, max_height);
            }
        }
        size
    }
}

impl fmt::Debug for LabelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelLayout")
            .field("text", &self.text)
            .field("number_of_lines", &self.number_of_lines)
            .field("alignment", &self.alignment)
            .field("flexibility", &self.flexibility)
            .finish_non_exhaustive()
    }
}

impl Layout for LabelLayout {
    fn measure(&self, max_size: Size) -> Measured {
        Measured::leaf(self.text_size(max_size))
    }

    fn arrange(&self, rect: Rect, measurement: &Measurement) -> Arranged {
        Arranged::leaf(self.alignment.position(measurement.size, rect))
    }

    fn flexibility(&self) -> Flexibility {
        self.flexibility
    }

    fn kind(&self) -> &'static str {
        "label"
    }
}
