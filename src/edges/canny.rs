//! Canny edge operator: Sobel gradients, direction-aligned non‑maximum
//! suppression, and two-threshold hysteresis.
//!
//! Suppression compares each pixel with its two neighbours along the
//! quantized gradient direction (0°, 45°, 90°, 135°). On the axis-aligned
//! directions the comparison is strict on the leading side only, so a
//! plateau two pixels wide still yields a one-pixel edge.
//!
//! The outermost 1‑pixel frame never holds an edge, which avoids bounds
//! checks in the neighbour lookup.
use super::grad::{sobel_gradients, Grad};
use crate::image::{ImageF32, ImageView};
use crate::types::EdgeMask;
use image::GrayImage;

const TAN_22_5_DEG: f32 = 0.41421356237;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Cell {
    Suppressed,
    Weak,
    Strong,
}

/// Edge mask of `l` for thresholds given in either order.
pub fn canny(l: &ImageF32, threshold1: f32, threshold2: f32) -> EdgeMask {
    canny_with_gradients(l, threshold1, threshold2).0
}

/// Like [`canny`], also returning the gradients it computed.
pub fn canny_with_gradients(l: &ImageF32, threshold1: f32, threshold2: f32) -> (EdgeMask, Grad) {
    let (low, high) = if threshold1 <= threshold2 {
        (threshold1, threshold2)
    } else {
        (threshold2, threshold1)
    };
    let grad = sobel_gradients(l);
    let cells = suppress_non_maxima(&grad, low, high);
    let mask = hysteresis(&cells, l.w, l.h);
    (mask, grad)
}

fn suppress_non_maxima(grad: &Grad, low: f32, high: f32) -> Vec<Cell> {
    let w = grad.gx.w;
    let h = grad.gx.h;
    let mut cells = vec![Cell::Suppressed; w * h];
    if w < 3 || h < 3 {
        return cells;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag <= low {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();

            let is_max = if abs_gy <= abs_gx * TAN_22_5_DEG {
                mag > mag_row[x - 1] && mag >= mag_row[x + 1]
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                mag > mag_prev[x] && mag >= mag_next[x]
            } else if (gx >= 0.0) == (gy >= 0.0) {
                mag > mag_prev[x - 1] && mag > mag_next[x + 1]
            } else {
                mag > mag_prev[x + 1] && mag > mag_next[x - 1]
            };

            if is_max {
                cells[y * w + x] = if mag > high { Cell::Strong } else { Cell::Weak };
            }
        }
    }
    cells
}

/// Keep strong pixels and every weak pixel 8-connected to one.
fn hysteresis(cells: &[Cell], w: usize, h: usize) -> EdgeMask {
    let mut out = vec![0u8; w * h];
    let mut stack: Vec<usize> = Vec::new();
    for (idx, cell) in cells.iter().enumerate() {
        if *cell == Cell::Strong && out[idx] == 0 {
            out[idx] = 255;
            stack.push(idx);
            while let Some(i) = stack.pop() {
                let (x, y) = ((i % w) as isize, (i / w) as isize);
                for dy in -1..=1isize {
                    for dx in -1..=1isize {
                        let (nx, ny) = (x + dx, y + dy);
                        if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                            continue;
                        }
                        let n = ny as usize * w + nx as usize;
                        if out[n] == 0 && cells[n] != Cell::Suppressed {
                            out[n] = 255;
                            stack.push(n);
                        }
                    }
                }
            }
        }
    }
    let image = GrayImage::from_raw(w as u32, h as u32, out)
        .unwrap_or_else(|| GrayImage::new(w as u32, h as u32));
    EdgeMask::new(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bright_square(size: usize, lo: usize, hi: usize) -> ImageF32 {
        let mut img = ImageF32::new(size, size);
        for y in lo..hi {
            for x in lo..hi {
                img.set(x, y, 255.0);
            }
        }
        img
    }

    #[test]
    fn step_edge_is_one_pixel_wide() {
        let mut img = ImageF32::new(20, 10);
        for y in 0..10 {
            for x in 10..20 {
                img.set(x, y, 200.0);
            }
        }
        let mask = canny(&img, 50.0, 150.0);
        for y in 1..9 {
            let row: Vec<u32> = (0..20).filter(|&x| mask.is_edge(x, y)).collect();
            assert_eq!(row, vec![9], "row {y}");
        }
    }

    #[test]
    fn flat_image_has_no_edges() {
        let mut img = ImageF32::new(16, 16);
        img.data.iter_mut().for_each(|v| *v = 120.0);
        assert_eq!(canny(&img, 10.0, 20.0).count(), 0);
    }

    #[test]
    fn threshold_order_does_not_matter() {
        let img = bright_square(32, 8, 24);
        assert_eq!(canny(&img, 40.0, 300.0), canny(&img, 300.0, 40.0));
    }

    #[test]
    fn weak_pixels_need_a_strong_neighbour() {
        // Left step is strong, right step is weak; they are not connected.
        let mut img = ImageF32::new(30, 12);
        for y in 0..12 {
            for x in 5..30 {
                img.set(x, y, 250.0);
            }
            for x in 20..30 {
                img.set(x, y, 280.0);
            }
        }
        let mask = canny(&img, 100.0, 500.0);
        assert!(mask.is_edge(4, 5));
        assert!(!mask.is_edge(19, 5));

        let permissive = canny(&img, 100.0, 110.0);
        assert!(permissive.is_edge(19, 5));
    }

    #[test]
    fn border_frame_stays_empty() {
        let img = bright_square(12, 0, 6);
        let mask = canny(&img, 10.0, 20.0);
        for i in 0..12 {
            assert!(!mask.is_edge(i, 0) && !mask.is_edge(0, i));
            assert!(!mask.is_edge(i, 11) && !mask.is_edge(11, i));
        }
    }
}
