//! Hough-space detectors.
//!
//! - [`lines`]: standard and multi-scale line transform over an edge mask.
//! - [`circles`]: gradient-directed circle transform over a grayscale image.

pub mod circles;
pub mod lines;

pub use circles::{detect_circles, presmooth, CircleParams};
pub use lines::{detect_lines, LineParams};

use crate::edges::canny;
use crate::image::ImageF32;
use crate::types::EdgeMask;

/// Canny thresholds used to build the line view's fixed edge mask.
pub const LINE_MASK_THRESHOLDS: (f32, f32) = (50.0, 200.0);

/// Edge mask the line view votes over, computed once from the unblurred
/// source.
pub fn line_edge_mask(gray: &ImageF32) -> EdgeMask {
    let (low, high) = LINE_MASK_THRESHOLDS;
    canny(gray, low, high)
}
