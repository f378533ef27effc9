use image::{GrayImage, Luma, RgbImage};

/// Binary edge map (0 = background, 255 = edge) with the source dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeMask {
    image: GrayImage,
}

impl EdgeMask {
    pub fn new(image: GrayImage) -> Self {
        Self { image }
    }

    /// All-background mask.
    pub fn empty(width: u32, height: u32) -> Self {
        Self::new(GrayImage::new(width, height))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    #[inline]
    pub fn is_edge(&self, x: u32, y: u32) -> bool {
        self.image.get_pixel(x, y)[0] != 0
    }

    pub fn set_edge(&mut self, x: u32, y: u32) {
        self.image.put_pixel(x, y, Luma([255]));
    }

    /// Number of edge pixels.
    pub fn count(&self) -> usize {
        self.image.as_raw().iter().filter(|&&v| v != 0).count()
    }

    /// Edge pixel coordinates in row-major order.
    pub fn points(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.image
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] != 0)
            .map(|(x, y, _)| (x, y))
    }
}

/// A line in normal form: `x·cos(theta) + y·sin(theta) = rho`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    /// Signed distance from the image origin in pixels
    pub rho: f32,
    /// Angle of the normal in radians, in [0, π)
    pub theta: f32,
    /// Accumulator votes of the reporting bin
    pub votes: u32,
}

/// A circle with its accumulator support.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Center accumulator votes
    pub votes: u32,
}

pub type LineSet = Vec<Line>;
pub type CircleSet = Vec<Circle>;

/// Output of one detector call; recomputed every tick.
#[derive(Clone, Debug, PartialEq)]
pub enum DetectionResult {
    Edges(EdgeMask),
    Lines(LineSet),
    Circles(CircleSet),
}

impl DetectionResult {
    /// Edge pixels, lines, or circles found.
    pub fn len(&self) -> usize {
        match self {
            Self::Edges(mask) => mask.count(),
            Self::Lines(lines) => lines.len(),
            Self::Circles(circles) => circles.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Frame handed to the display surface; one per tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayFrame {
    image: RgbImage,
}

impl DisplayFrame {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Packed `0RGB` words, row-major, as expected by framebuffer windows.
    pub fn to_0rgb(&self) -> Vec<u32> {
        self.image
            .pixels()
            .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn mask_points_are_row_major() {
        let mut mask = EdgeMask::empty(4, 3);
        mask.set_edge(3, 0);
        mask.set_edge(1, 2);
        mask.set_edge(0, 1);
        assert_eq!(mask.points().collect::<Vec<_>>(), vec![(3, 0), (0, 1), (1, 2)]);
        assert_eq!(mask.count(), 3);
    }

    #[test]
    fn frame_packs_0rgb() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(1, 0, Rgb([0x12, 0x34, 0x56]));
        let frame = DisplayFrame::new(img);
        assert_eq!(frame.to_0rgb(), vec![0, 0x0012_3456]);
    }

    #[test]
    fn empty_results_report_zero() {
        assert!(DetectionResult::Lines(Vec::new()).is_empty());
        assert!(DetectionResult::Edges(EdgeMask::empty(5, 5)).is_empty());
    }
}
