//! Hough line transform over a binary edge mask.
//!
//! Every edge pixel votes once per angle bin for the distance bin of the
//! line through it. A bin is reported when its votes exceed the threshold
//! and it is a local maximum among its four accumulator neighbours.
//! Results are ordered by decreasing votes, ties by bin index, so identical
//! input always yields the identical sequence.
//!
//! With `srn`/`stn` set, each reported bin is re-voted on a finer grid
//! restricted to its own cell and the best fine bin replaces the estimate.
use crate::params::sanitize::SanitizedParameterVector;
use crate::params::spec::lines;
use crate::types::{EdgeMask, Line, LineSet};
use std::f64::consts::PI;

/// Sanitized inputs of the line view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineParams {
    /// Distance resolution in pixels (>= 1).
    pub rho: f64,
    /// Angle resolution in radians (> 0).
    pub theta: f64,
    /// Votes a bin must exceed (>= 1).
    pub threshold: u32,
    /// Divisor of `rho` for the refinement pass; 0 disables it.
    pub srn: u32,
    /// Divisor of `theta` for the refinement pass; 0 disables it.
    pub stn: u32,
}

impl LineParams {
    /// `values` must have been sanitized against [`lines::spec`].
    pub fn from_sanitized(values: &SanitizedParameterVector) -> Self {
        debug_assert_eq!(values.len(), lines::STN + 1, "not a line-view vector");
        Self {
            rho: values.get(lines::RHO),
            theta: values.get(lines::THETA_DEG).to_radians(),
            threshold: values.int(lines::THRESHOLD) as u32,
            srn: values.int(lines::SRN) as u32,
            stn: values.int(lines::STN) as u32,
        }
    }

    pub fn is_multi_scale(&self) -> bool {
        self.srn > 0 || self.stn > 0
    }
}

impl Default for LineParams {
    fn default() -> Self {
        Self {
            rho: 1.0,
            theta: PI / 180.0,
            threshold: 100,
            srn: 0,
            stn: 0,
        }
    }
}

/// Accumulator geometry for one image size and resolution pair.
struct Grid {
    num_angle: usize,
    num_rho: usize,
    rho_offset: i64,
    cos: Vec<f64>,
    sin: Vec<f64>,
}

impl Grid {
    fn new(width: u32, height: u32, params: &LineParams) -> Self {
        let num_angle = ((PI / params.theta).round() as usize).max(1);
        let num_rho =
            ((((width + height) as f64 * 2.0 + 1.0) / params.rho).round() as usize).max(1);
        let (sin, cos): (Vec<f64>, Vec<f64>) = (0..num_angle)
            .map(|n| {
                let angle = n as f64 * params.theta;
                (angle.sin() / params.rho, angle.cos() / params.rho)
            })
            .unzip();
        Self {
            num_angle,
            num_rho,
            rho_offset: (num_rho as i64 - 1) / 2,
            cos,
            sin,
        }
    }

    /// Accumulator stride; one padding cell on each side of every row.
    #[inline]
    fn stride(&self) -> usize {
        self.num_rho + 2
    }

    fn accumulate(&self, points: &[(f64, f64)]) -> Vec<u32> {
        let stride = self.stride();
        let mut accum = vec![0u32; (self.num_angle + 2) * stride];
        for &(x, y) in points {
            for n in 0..self.num_angle {
                let r = (x * self.cos[n] + y * self.sin[n]).round() as i64 + self.rho_offset;
                if r < 0 || r >= self.num_rho as i64 {
                    continue;
                }
                accum[(n + 1) * stride + r as usize + 1] += 1;
            }
        }
        accum
    }

    /// `(votes, angle bin, rho bin)` of every local maximum above `threshold`.
    fn peaks(&self, accum: &[u32], threshold: u32) -> Vec<(u32, usize, usize)> {
        let stride = self.stride();
        let mut peaks = Vec::new();
        for n in 0..self.num_angle {
            for r in 0..self.num_rho {
                let base = (n + 1) * stride + r + 1;
                let v = accum[base];
                if v > threshold
                    && v > accum[base - 1]
                    && v >= accum[base + 1]
                    && v > accum[base - stride]
                    && v >= accum[base + stride]
                {
                    peaks.push((v, n, r));
                }
            }
        }
        peaks.sort_by(|a, b| b.0.cmp(&a.0).then((a.1, a.2).cmp(&(b.1, b.2))));
        peaks
    }
}

/// Detect lines in `mask`. An empty mask yields an empty set.
pub fn detect_lines(mask: &EdgeMask, params: &LineParams) -> LineSet {
    let points: Vec<(f64, f64)> = mask.points().map(|(x, y)| (x as f64, y as f64)).collect();
    if points.is_empty() {
        return Vec::new();
    }

    let grid = Grid::new(mask.width(), mask.height(), params);
    let accum = grid.accumulate(&points);
    grid.peaks(&accum, params.threshold)
        .into_iter()
        .map(|(votes, n, r)| {
            let rho = (r as i64 - grid.rho_offset) as f64 * params.rho;
            let theta = n as f64 * params.theta;
            let (rho, theta) = if params.is_multi_scale() {
                refine_cell(&points, rho, theta, params)
            } else {
                (rho, theta)
            };
            Line {
                rho: rho as f32,
                theta: theta as f32,
                votes,
            }
        })
        .collect()
}

/// Re-vote one coarse cell on a `srn × stn` grid and return the best fine bin.
fn refine_cell(points: &[(f64, f64)], rho: f64, theta: f64, params: &LineParams) -> (f64, f64) {
    let srn = params.srn.max(1) as usize;
    let stn = params.stn.max(1) as usize;
    let fine_rho = params.rho / srn as f64;
    let fine_theta = params.theta / stn as f64;
    let rho_lo = rho - params.rho * 0.5;
    let theta_lo = theta - params.theta * 0.5;

    let mut best = (0u32, rho, theta);
    let mut counts = vec![0u32; srn];
    for j in 0..stn {
        let angle = theta_lo + (j as f64 + 0.5) * fine_theta;
        let (s, c) = angle.sin_cos();
        counts.iter_mut().for_each(|v| *v = 0);
        for &(x, y) in points {
            let offset = x * c + y * s - rho_lo;
            if offset < 0.0 || offset >= params.rho {
                continue;
            }
            let i = ((offset / fine_rho) as usize).min(srn - 1);
            counts[i] += 1;
        }
        for (i, &count) in counts.iter().enumerate() {
            if count > best.0 {
                best = (count, rho_lo + (i as f64 + 0.5) * fine_rho, angle);
            }
        }
    }

    normalize(best.1, best.2)
}

/// Map `(rho, theta)` so that theta lies in [0, π).
fn normalize(rho: f64, theta: f64) -> (f64, f64) {
    if theta < 0.0 {
        (-rho, theta + PI)
    } else if theta >= PI {
        (-rho, theta - PI)
    } else {
        (rho, theta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_mask(w: u32, h: u32, x: u32, y0: u32, y1: u32) -> EdgeMask {
        let mut mask = EdgeMask::empty(w, h);
        for y in y0..y1 {
            mask.set_edge(x, y);
        }
        mask
    }

    #[test]
    fn empty_mask_yields_no_lines() {
        let mask = EdgeMask::empty(100, 100);
        let params = LineParams {
            threshold: 1,
            ..Default::default()
        };
        assert!(detect_lines(&mask, &params).is_empty());
    }

    #[test]
    fn vertical_column_is_found_at_theta_zero() {
        let mask = column_mask(64, 64, 20, 4, 60);
        let params = LineParams {
            threshold: 30,
            ..Default::default()
        };
        let lines = detect_lines(&mask, &params);
        let best = lines.first().expect("one line");
        assert_eq!(best.theta, 0.0);
        assert!((best.rho - 20.0).abs() < 1e-6);
        assert_eq!(best.votes, 56);
    }

    #[test]
    fn horizontal_row_is_found_at_half_pi() {
        let mut mask = EdgeMask::empty(50, 40);
        for x in 5..45 {
            mask.set_edge(x, 12);
        }
        let params = LineParams {
            threshold: 20,
            ..Default::default()
        };
        let best = detect_lines(&mask, &params)[0];
        assert!((best.theta as f64 - PI / 2.0).abs() < 1e-6);
        assert!((best.rho - 12.0).abs() < 1e-3);
    }

    #[test]
    fn results_are_ordered_by_votes() {
        let mut mask = column_mask(80, 80, 10, 0, 70);
        for y in 0..40 {
            mask.set_edge(60, y);
        }
        let params = LineParams {
            threshold: 20,
            ..Default::default()
        };
        let lines = detect_lines(&mask, &params);
        assert!(lines.len() >= 2);
        assert!(lines.windows(2).all(|w| w[0].votes >= w[1].votes));
        assert!((lines[0].rho - 10.0).abs() < 1e-6);
        assert_eq!(detect_lines(&mask, &params), lines);
    }

    #[test]
    fn threshold_is_exclusive() {
        let mask = column_mask(40, 40, 7, 0, 25);
        let at = LineParams {
            threshold: 25,
            ..Default::default()
        };
        assert!(detect_lines(&mask, &at).is_empty());
        let below = LineParams {
            threshold: 24,
            ..Default::default()
        };
        assert!(!detect_lines(&mask, &below).is_empty());
    }

    #[test]
    fn refinement_stays_inside_the_coarse_cell() {
        let mask = column_mask(64, 64, 31, 2, 62);
        let coarse = LineParams {
            rho: 4.0,
            theta: 4f64.to_radians(),
            threshold: 30,
            srn: 0,
            stn: 0,
        };
        let fine = LineParams {
            srn: 4,
            stn: 4,
            ..coarse
        };
        let a = detect_lines(&mask, &coarse)[0];
        let b = detect_lines(&mask, &fine)[0];
        assert_eq!(a.votes, b.votes);

        let residual = |l: Line| (31.0 * l.theta.cos() + 32.0 * l.theta.sin() - l.rho).abs();
        assert!(residual(b) < residual(a), "{b:?} vs {a:?}");
        assert!(residual(b) <= 0.5);
        assert!(b.theta >= 0.0 && b.theta < std::f32::consts::PI);
    }

    #[test]
    fn sanitized_degrees_become_radians() {
        use crate::params::{sanitize, ParameterVector};
        let raw = ParameterVector::new(vec![0, 0, 0, 2, 3]);
        let params = LineParams::from_sanitized(&sanitize(&raw, &lines::spec()));
        assert_eq!(params.rho, 1.0);
        assert!((params.theta - PI / 180.0).abs() < 1e-12);
        assert_eq!(params.threshold, 1);
        assert!(params.is_multi_scale());
    }

    #[test]
    fn oversized_refinement_sliders_are_capped() {
        use crate::params::{sanitize, ParameterVector};
        let raw = ParameterVector::new(vec![1, 1, 3, i32::MAX, i32::MAX]);
        let params = LineParams::from_sanitized(&sanitize(&raw, &lines::spec()));
        assert_eq!((params.srn, params.stn), (10, 10));

        let lines = detect_lines(&column_mask(20, 20, 7, 2, 17), &params);
        assert!(!lines.is_empty());
    }
}
