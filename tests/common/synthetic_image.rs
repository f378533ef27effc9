use image::{GrayImage, Luma};

const INK: Luma<u8> = Luma([255]);

/// Filled axis-aligned rectangle `x0..=x1 × y0..=y1` on a black canvas.
pub fn stripe(width: u32, height: u32, x0: u32, x1: u32, y0: u32, y1: u32) -> GrayImage {
    assert!(x0 <= x1 && x1 < width, "stripe must fit horizontally");
    assert!(y0 <= y1 && y1 < height, "stripe must fit vertically");

    let mut img = GrayImage::new(width, height);
    for y in y0..=y1 {
        for x in x0..=x1 {
            img.put_pixel(x, y, INK);
        }
    }
    img
}

/// Filled disk of radius `r` centred at `(cx, cy)` on a square black canvas.
pub fn disk(size: u32, cx: f64, cy: f64, r: f64) -> GrayImage {
    let mut img = GrayImage::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let (dx, dy) = (x as f64 - cx, y as f64 - cy);
            if dx * dx + dy * dy <= r * r {
                img.put_pixel(x, y, INK);
            }
        }
    }
    img
}

/// Three-pixel wide segment through `(cx, cy)` along `angle_deg`, sampled at
/// unit steps for `half_len` pixels either side of the centre.
pub fn thick_segment(size: u32, cx: f64, cy: f64, angle_deg: f64, half_len: i32) -> GrayImage {
    let (s, c) = angle_deg.to_radians().sin_cos();
    let mut img = GrayImage::new(size, size);
    for t in -half_len..=half_len {
        for off in [-1.0, 0.0, 1.0] {
            let x = (cx + t as f64 * c - off * s).round();
            let y = (cy + t as f64 * s + off * c).round();
            if x >= 0.0 && y >= 0.0 && x < size as f64 && y < size as f64 {
                img.put_pixel(x as u32, y as u32, INK);
            }
        }
    }
    img
}
