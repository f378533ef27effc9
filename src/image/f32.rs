//! Owned single-channel f32 image in row-major layout (stride == width).
//!
//! Numeric working buffer for blur and gradient passes. Values keep the
//! 8-bit intensity scale (0..=255) so thresholds match slider units.
use super::traits::{ImageView, ImageViewMut};
use image::GrayImage;

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
        }
    }

    /// Copy an 8-bit grayscale image without rescaling.
    pub fn from_luma(gray: &GrayImage) -> Self {
        let (w, h) = gray.dimensions();
        Self {
            w: w as usize,
            h: h as usize,
            stride: w as usize,
            data: gray.as_raw().iter().map(|&v| v as f32).collect(),
        }
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }
}

/// Round half away from zero and clamp into `0..=255`.
#[inline]
pub fn quantize_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

impl ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}
