//! Drawing detection results onto a copy of the source image.
//!
//! Colors follow the classic overlay scheme: lines and circle outlines in
//! blue, circle centers in red. The base image is only ever read.
use crate::types::{Circle, DetectionResult, DisplayFrame, EdgeMask, Line};
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_antialiased_line_segment_mut, draw_filled_circle_mut, draw_hollow_circle_mut,
};
use imageproc::pixelops::interpolate;
use nalgebra::Vector2;

pub const LINE_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
pub const CIRCLE_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
pub const CENTER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Half-length of a drawn line, in pixels, on each side of its foot point.
pub const LINE_EXTENT: f32 = 1000.0;
/// Outline thickness of a circle.
pub const CIRCLE_THICKNESS: i32 = 2;
/// Radius of the filled center marker.
pub const CENTER_MARKER_RADIUS: i32 = 3;

/// Produce the frame for `result` without touching `base`.
pub fn render(base: &RgbImage, result: &DetectionResult) -> DisplayFrame {
    match result {
        DetectionResult::Edges(mask) => render_mask(mask),
        DetectionResult::Lines(lines) => {
            let mut canvas = base.clone();
            for line in lines {
                draw_line(&mut canvas, line);
            }
            DisplayFrame::new(canvas)
        }
        DetectionResult::Circles(circles) => {
            let mut canvas = base.clone();
            for circle in circles {
                draw_circle(&mut canvas, circle);
            }
            DisplayFrame::new(canvas)
        }
    }
}

/// The mask itself, shown as a grayscale frame.
pub fn render_mask(mask: &EdgeMask) -> DisplayFrame {
    let image = RgbImage::from_fn(mask.width(), mask.height(), |x, y| {
        let v = mask.image().get_pixel(x, y)[0];
        Rgb([v, v, v])
    });
    DisplayFrame::new(image)
}

/// Segment endpoints ±[`LINE_EXTENT`] along the line from its foot point,
/// truncated toward zero.
pub fn line_endpoints(line: &Line) -> ((i32, i32), (i32, i32)) {
    let (sin, cos) = line.theta.sin_cos();
    let foot = Vector2::new(cos, sin) * line.rho;
    let along = Vector2::new(-sin, cos) * LINE_EXTENT;
    let a = foot + along;
    let b = foot - along;
    ((a.x as i32, a.y as i32), (b.x as i32, b.y as i32))
}

fn draw_line(canvas: &mut RgbImage, line: &Line) {
    let (start, end) = line_endpoints(line);
    draw_antialiased_line_segment_mut(canvas, start, end, LINE_COLOR, interpolate);
}

fn draw_circle(canvas: &mut RgbImage, circle: &Circle) {
    let center = (circle.x.round() as i32, circle.y.round() as i32);
    let radius = circle.radius.round() as i32;
    for offset in 0..CIRCLE_THICKNESS {
        let r = radius - CIRCLE_THICKNESS / 2 + offset;
        if r > 0 {
            draw_hollow_circle_mut(canvas, center, r, CIRCLE_COLOR);
        }
    }
    draw_filled_circle_mut(canvas, center, CENTER_MARKER_RADIUS, CENTER_COLOR);
}
