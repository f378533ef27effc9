//! Separable Gaussian smoothing with an explicit odd kernel size.
//!
//! Kernel taps follow the usual 8-bit toolkit convention: when no sigma is
//! given, sizes up to 7 use the fixed binomial-like tables and larger sizes
//! derive `sigma = 0.3 * ((k - 1) * 0.5 - 1) + 0.8`. Borders replicate the
//! edge pixel. The result is rounded back to 8-bit levels so downstream
//! thresholds see the same values an 8-bit pipeline would.
use crate::image::f32::quantize_u8;
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];
}

const SMALL_GAUSSIAN_TAPS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[
        0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
    ],
];

/// Normalised Gaussian taps of odd length.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    taps: Vec<f32>,
}

impl GaussianKernel {
    /// Kernel of size `ksize` with sigma derived from the size.
    ///
    /// `ksize` must already be odd and positive (see
    /// [`crate::params::sanitize::odd_kernel`]).
    pub fn from_size(ksize: usize) -> Self {
        debug_assert!(ksize % 2 == 1, "kernel size must be odd");
        if ksize <= 7 {
            return Self {
                taps: SMALL_GAUSSIAN_TAPS[ksize / 2].to_vec(),
            };
        }
        Self::with_sigma(ksize, sigma_for_size(ksize))
    }

    /// Kernel of size `ksize` with an explicit sigma.
    pub fn with_sigma(ksize: usize, sigma: f64) -> Self {
        debug_assert!(ksize % 2 == 1, "kernel size must be odd");
        let radius = (ksize / 2) as f64;
        let scale = -0.5 / (sigma * sigma);
        let raw: Vec<f64> = (0..ksize)
            .map(|i| {
                let x = i as f64 - radius;
                (scale * x * x).exp()
            })
            .collect();
        let sum: f64 = raw.iter().sum();
        Self {
            taps: raw.iter().map(|v| (v / sum) as f32).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Sigma used when only a kernel size is given.
pub fn sigma_for_size(ksize: usize) -> f64 {
    0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Blur with a size-derived Gaussian. `ksize == 1` returns a copy.
pub fn gaussian_blur(src: &ImageF32, ksize: usize) -> ImageF32 {
    if ksize <= 1 {
        return src.clone();
    }
    blur_separable(src, &GaussianKernel::from_size(ksize))
}

/// Horizontal then vertical pass, replicate borders, 8-bit rounding.
pub fn blur_separable<F: SeparableFilter + ?Sized>(src: &ImageF32, filter: &F) -> ImageF32 {
    let taps = filter.taps();
    let mut out = ImageF32::new(src.w, src.h);
    if src.w == 0 || src.h == 0 || taps.is_empty() {
        return out;
    }
    let radius = taps.len() / 2;

    let mut horiz = ImageF32::new(src.w, src.h);
    for y in 0..src.h {
        filter_row(src.row(y), horiz.row_mut(y), taps, radius);
    }

    let mut column = vec![0.0f32; src.h];
    let mut filtered = vec![0.0f32; src.h];
    for x in 0..src.w {
        for (y, px) in column.iter_mut().enumerate() {
            *px = horiz.get(x, y);
        }
        filter_row(&column, &mut filtered, taps, radius);
        for (y, &v) in filtered.iter().enumerate() {
            out.set(x, y, quantize_u8(v) as f32);
        }
    }
    out
}

fn filter_row(row: &[f32], out: &mut [f32], taps: &[f32], radius: usize) {
    let len = row.len();
    for (x, dst_px) in out.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (k, &tap) in taps.iter().enumerate() {
            let offset = x as isize + k as isize - radius as isize;
            acc += tap * row[clamp_index(offset, len)];
        }
        *dst_px = acc;
    }
}

fn clamp_index(idx: isize, upper: usize) -> usize {
    if upper == 0 {
        return 0;
    }
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taps_are_normalised() {
        for k in [1usize, 3, 5, 7, 9, 15, 31] {
            let kernel = GaussianKernel::from_size(k);
            assert_eq!(kernel.len(), k);
            let sum: f32 = kernel.taps().iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "k={k} sum={sum}");
        }
    }

    #[test]
    fn derived_sigma_matches_the_size_rule() {
        assert!((sigma_for_size(9) - 1.7).abs() < 1e-9);
        assert!((sigma_for_size(31) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn constant_image_is_unchanged() {
        let mut img = ImageF32::new(12, 9);
        img.data.iter_mut().for_each(|v| *v = 77.0);
        let out = gaussian_blur(&img, 9);
        assert!(out.data.iter().all(|&v| v == 77.0));
    }

    #[test]
    fn impulse_spreads_symmetrically() {
        let mut img = ImageF32::new(11, 11);
        img.set(5, 5, 255.0);
        let out = blur_separable(&img, &GaussianKernel::from_size(3));
        assert_eq!(out.get(5, 5), 64.0);
        assert_eq!(out.get(4, 5), out.get(6, 5));
        assert_eq!(out.get(5, 4), out.get(5, 6));
        assert_eq!(out.get(0, 0), 0.0);
    }

    #[test]
    fn kernel_one_is_identity() {
        let mut img = ImageF32::new(4, 4);
        img.set(1, 2, 13.0);
        assert_eq!(gaussian_blur(&img, 1), img);
    }
}
