//! Loading the source image.
//!
//! The file is decoded once into an RGB copy used as the drawing base and a
//! grayscale copy consumed by the detectors. Both are read-only afterwards.
use crate::error::{Result, TunerError};
use image::{GrayImage, RgbImage};
use std::path::Path;

/// Decoded input image; never mutated after load.
#[derive(Clone, Debug)]
pub struct SourceImage {
    color: RgbImage,
    gray: GrayImage,
}

impl SourceImage {
    /// Build from a grayscale image; the drawing base is its RGB expansion.
    pub fn from_gray(gray: GrayImage) -> Self {
        let color = image::DynamicImage::ImageLuma8(gray.clone()).into_rgb8();
        Self { color, gray }
    }

    pub fn color(&self) -> &RgbImage {
        &self.color
    }

    pub fn gray(&self) -> &GrayImage {
        &self.gray
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.color.width()
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.color.height()
    }
}

/// Load an image from disk, keeping color and grayscale copies.
pub fn load_source_image(path: &Path) -> Result<SourceImage> {
    let decoded = image::open(path).map_err(|source| TunerError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let gray = decoded.to_luma8();
    let color = decoded.into_rgb8();
    Ok(SourceImage { color, gray })
}
