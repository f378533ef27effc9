//! Edge view: Gaussian blur followed by Canny.
//!
//! Building blocks are public for the Hough detectors:
//!
//! - [`blur`]: separable Gaussian with an explicit odd kernel size.
//! - [`grad`]: 3×3 Sobel gradients.
//! - [`canny`]: suppression + hysteresis producing a binary [`EdgeMask`].

pub mod blur;
pub mod canny;
pub mod grad;

pub use blur::{gaussian_blur, GaussianKernel, SeparableFilter};
pub use canny::{canny, canny_with_gradients};
pub use grad::{sobel_gradients, Grad};

use crate::image::ImageF32;
use crate::params::sanitize::{odd_kernel, SanitizedParameterVector};
use crate::params::spec::edge;
use crate::types::EdgeMask;

/// Sanitized inputs of the edge view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeParams {
    /// Odd blur kernel size, at least 1.
    pub blur_kernel: usize,
    pub low_threshold: i32,
    pub high_threshold: i32,
}

impl EdgeParams {
    pub fn new(blur_kernel: i32, low_threshold: i32, high_threshold: i32) -> Self {
        Self {
            blur_kernel: odd_kernel(blur_kernel) as usize,
            low_threshold,
            high_threshold,
        }
    }

    /// `values` must have been sanitized against [`edge::spec`].
    pub fn from_sanitized(values: &SanitizedParameterVector) -> Self {
        debug_assert_eq!(values.len(), edge::BLUR_KERNEL + 1, "not an edge-view vector");
        Self {
            blur_kernel: values.int(edge::BLUR_KERNEL) as usize,
            low_threshold: values.int(edge::MIN_THRESHOLD),
            high_threshold: values.int(edge::MAX_THRESHOLD),
        }
    }
}

/// Blur + Canny on a grayscale image. Never mutates its input.
pub fn detect_edges(gray: &ImageF32, params: &EdgeParams) -> EdgeMask {
    let blurred = gaussian_blur(gray, params.blur_kernel);
    canny(
        &blurred,
        params.low_threshold as f32,
        params.high_threshold as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{sanitize, ParameterVector};

    fn disk(size: usize, cx: f32, cy: f32, r: f32) -> ImageF32 {
        let mut img = ImageF32::new(size, size);
        for y in 0..size {
            for x in 0..size {
                let (dx, dy) = (x as f32 - cx, y as f32 - cy);
                if dx * dx + dy * dy <= r * r {
                    img.set(x, y, 220.0);
                }
            }
        }
        img
    }

    #[test]
    fn params_come_from_the_sanitized_vector() {
        let raw = ParameterVector::new(vec![30, 90, 4]);
        let params = EdgeParams::from_sanitized(&sanitize(&raw, &edge::spec()));
        assert_eq!(params, EdgeParams::new(5, 30, 90));
    }

    #[test]
    fn repeated_detection_is_bit_identical() {
        let img = disk(64, 31.0, 30.0, 14.0);
        let params = EdgeParams::new(7, 50, 150);
        let first = detect_edges(&img, &params);
        let second = detect_edges(&img, &params);
        assert_eq!(first, second);
        assert!(first.count() > 0);
        assert_eq!((first.width(), first.height()), (64, 64));
    }

    #[test]
    fn input_is_left_untouched() {
        let img = disk(40, 20.0, 20.0, 9.0);
        let copy = img.clone();
        let _ = detect_edges(&img, &EdgeParams::new(9, 20, 60));
        assert_eq!(img, copy);
    }

    #[test]
    fn thresholds_above_any_gradient_give_a_blank_mask() {
        let img = disk(48, 24.0, 24.0, 10.0);
        let mask = detect_edges(&img, &EdgeParams::new(3, 1900, 2000));
        assert_eq!(mask.count(), 0);
    }
}
