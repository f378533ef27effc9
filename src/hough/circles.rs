//! Hough gradient circle detection.
//!
//! 1. Canny on the input with thresholds `(param1 / 2, param1)`.
//! 2. Every edge pixel votes along both senses of its gradient direction for
//!    each radius in range, into an accumulator downscaled by `dp`.
//! 3. Local maxima with more than `param2` votes become candidate centers,
//!    strongest first.
//! 4. Each candidate's radius is the best-supported distance among edge
//!    pixels inside `[min_radius, max_radius]`; candidates closer than
//!    `min_dist` to an accepted circle are dropped.
//!
//! The input is expected to be pre-smoothed (see [`presmooth`]); `detect`
//! itself only runs the edge and voting passes.
use crate::edges::blur::{blur_separable, GaussianKernel};
use crate::edges::canny_with_gradients;
use crate::image::ImageF32;
use crate::params::sanitize::SanitizedParameterVector;
use crate::params::spec::circles;
use crate::types::{Circle, CircleSet};

/// Kernel size of the startup smoothing pass.
pub const PRESMOOTH_KERNEL: usize = 9;
/// Sigma of the startup smoothing pass.
pub const PRESMOOTH_SIGMA: f64 = 1.5;

/// Sanitized inputs of the circle view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleParams {
    /// Inverse accumulator resolution (>= 1.0).
    pub dp: f64,
    /// Minimum distance between reported centers (>= 1).
    pub min_dist: f64,
    /// Upper Canny threshold; the lower one is half of it.
    pub param1: i32,
    /// Center votes a candidate must exceed, and radius support it must reach.
    pub param2: u32,
    pub min_radius: u32,
    /// Zero means no upper bound.
    pub max_radius: u32,
}

impl CircleParams {
    /// `values` must have been sanitized against [`circles::spec`].
    pub fn from_sanitized(values: &SanitizedParameterVector) -> Self {
        debug_assert_eq!(values.len(), circles::MAX_RADIUS + 1, "not a circle-view vector");
        Self {
            dp: values.get(circles::DP),
            min_dist: values.get(circles::MIN_DIST),
            param1: values.int(circles::PARAM1),
            param2: values.int(circles::PARAM2) as u32,
            min_radius: values.int(circles::MIN_RADIUS) as u32,
            max_radius: values.int(circles::MAX_RADIUS) as u32,
        }
    }

    /// Inclusive radius search range for an image of the given size.
    pub fn radius_range(&self, width: usize, height: usize) -> (u32, u32) {
        let upper = if self.max_radius == 0 {
            width.max(height) as u32
        } else {
            self.max_radius
        };
        (self.min_radius, upper)
    }
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            dp: 1.0,
            min_dist: 50.0,
            param1: 200,
            param2: 17,
            min_radius: 10,
            max_radius: 200,
        }
    }
}

/// Fixed 9×9, σ = 1.5 smoothing applied once to the source.
pub fn presmooth(gray: &ImageF32) -> ImageF32 {
    blur_separable(
        gray,
        &GaussianKernel::with_sigma(PRESMOOTH_KERNEL, PRESMOOTH_SIGMA),
    )
}

struct Accumulator {
    cols: usize,
    rows: usize,
    votes: Vec<u32>,
}

impl Accumulator {
    fn new(width: usize, height: usize, dp: f64) -> Self {
        let cols = (width as f64 / dp).ceil() as usize + 1;
        let rows = (height as f64 / dp).ceil() as usize + 1;
        Self {
            cols,
            rows,
            votes: vec![0; (cols + 2) * (rows + 2)],
        }
    }

    #[inline]
    fn stride(&self) -> usize {
        self.cols + 2
    }

    /// Add a vote at accumulator cell `(ax, ay)`; false when outside.
    #[inline]
    fn vote(&mut self, ax: f64, ay: f64) -> bool {
        let (ix, iy) = (ax.round(), ay.round());
        if ix < 0.0 || iy < 0.0 || ix >= self.cols as f64 || iy >= self.rows as f64 {
            return false;
        }
        let stride = self.stride();
        self.votes[(iy as usize + 1) * stride + ix as usize + 1] += 1;
        true
    }

    /// `(votes, col, row)` of local maxima above `threshold`, strongest first.
    fn peaks(&self, threshold: u32) -> Vec<(u32, usize, usize)> {
        let stride = self.stride();
        let mut peaks = Vec::new();
        for y in 0..self.rows {
            for x in 0..self.cols {
                let base = (y + 1) * stride + x + 1;
                let v = self.votes[base];
                if v > threshold
                    && v > self.votes[base - 1]
                    && v >= self.votes[base + 1]
                    && v > self.votes[base - stride]
                    && v >= self.votes[base + stride]
                {
                    peaks.push((v, x, y));
                }
            }
        }
        peaks.sort_by(|a, b| b.0.cmp(&a.0).then((a.2, a.1).cmp(&(b.2, b.1))));
        peaks
    }
}

/// Detect circles in a pre-smoothed grayscale image.
///
/// Every returned radius lies inside the (sanitized) radius range.
pub fn detect_circles(gray: &ImageF32, params: &CircleParams) -> CircleSet {
    let (w, h) = (gray.w, gray.h);
    let (min_r, max_r) = params.radius_range(w, h);
    if w < 3 || h < 3 || max_r < min_r {
        return Vec::new();
    }

    let high = params.param1 as f32;
    let low = (params.param1 / 2).max(1) as f32;
    let (mask, grad) = canny_with_gradients(gray, low, high);

    let dp = params.dp;
    let mut accum = Accumulator::new(w, h, dp);
    let mut points: Vec<(f64, f64)> = Vec::new();
    let r_start = (min_r as f64).max(1.0);

    for (x, y) in mask.points() {
        let (xf, yf) = (x as f64, y as f64);
        points.push((xf, yf));
        let gx = grad.gx.get(x as usize, y as usize) as f64;
        let gy = grad.gy.get(x as usize, y as usize) as f64;
        let norm = (gx * gx + gy * gy).sqrt();
        if norm <= f64::EPSILON {
            continue;
        }
        let (dx, dy) = (gx / norm, gy / norm);
        for sign in [1.0, -1.0] {
            let mut r = r_start;
            while r <= max_r as f64 {
                let ax = (xf + sign * dx * r) / dp;
                let ay = (yf + sign * dy * r) / dp;
                if !accum.vote(ax, ay) {
                    break;
                }
                r += dp;
            }
        }
    }
    if points.is_empty() {
        return Vec::new();
    }

    let min_dist_sq = params.min_dist * params.min_dist;
    let mut found: CircleSet = Vec::new();
    for (votes, col, row) in accum.peaks(params.param2) {
        let (cx, cy) = (col as f64 * dp, row as f64 * dp);
        let too_close = found.iter().any(|c| {
            let (ddx, ddy) = (c.x as f64 - cx, c.y as f64 - cy);
            ddx * ddx + ddy * ddy < min_dist_sq
        });
        if too_close {
            continue;
        }
        if let Some(radius) = estimate_radius(&points, cx, cy, min_r, max_r, params.param2) {
            found.push(Circle {
                x: cx as f32,
                y: cy as f32,
                radius: radius as f32,
                votes,
            });
        }
    }
    found
}

/// Best-supported radius around `(cx, cy)` within `[min_r, max_r]`.
///
/// Distances within half a pixel of the range are binned to whole pixels; a
/// candidate radius collects the support of its bin and both neighbours, and
/// the estimate is the mean of those distances clamped into the range. Ties
/// keep the smaller radius.
fn estimate_radius(
    points: &[(f64, f64)],
    cx: f64,
    cy: f64,
    min_r: u32,
    max_r: u32,
    min_support: u32,
) -> Option<f64> {
    let (lo, hi) = (min_r as f64, max_r as f64);
    let mut distances: Vec<f64> = points
        .iter()
        .map(|&(x, y)| ((x - cx).powi(2) + (y - cy).powi(2)).sqrt())
        .filter(|&d| d >= lo - 0.5 && d <= hi + 0.5)
        .collect();
    if distances.is_empty() {
        return None;
    }
    distances.sort_by(|a, b| a.total_cmp(b));

    // Bins past the farthest edge pixel would stay empty.
    let first_bin = min_r as usize;
    let farthest = distances[distances.len() - 1].round() as usize;
    let last_bin = farthest.clamp(first_bin, max_r as usize);
    let bins = last_bin - first_bin + 1;
    let mut counts = vec![0u32; bins];
    for &d in &distances {
        let bin = (d.round() as usize).clamp(first_bin, last_bin);
        counts[bin - first_bin] += 1;
    }

    let support = |i: usize| -> u32 {
        let mut total = counts[i];
        if i > 0 {
            total += counts[i - 1];
        }
        if i + 1 < bins {
            total += counts[i + 1];
        }
        total
    };
    let (best, best_support) = (0..bins)
        .map(|i| (i, support(i)))
        .fold((0, 0), |acc, cur| if cur.1 > acc.1 { cur } else { acc });
    if best_support < min_support || best_support == 0 {
        return None;
    }

    let centre = (first_bin + best) as f64;
    let window: Vec<f64> = distances
        .iter()
        .copied()
        .filter(|d| (d.round() - centre).abs() <= 1.0)
        .collect();
    let mean = window.iter().sum::<f64>() / window.len() as f64;
    Some(mean.clamp(lo, hi))
}
