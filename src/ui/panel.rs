//! Trackbar panel drawn under the frame.
//!
//! One row per control, stacked top to bottom in declaration order. Each row
//! holds a horizontal track with a filled part up to the current value and
//! a knob. Pure geometry and drawing; the window only feeds it mouse
//! coordinates.

use crate::params::ControlSpec;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

const MARGIN: u32 = 8;
const TRACK_THICKNESS: u32 = 4;
const KNOB_WIDTH: u32 = 6;

const BACKGROUND: Rgb<u8> = Rgb([40, 40, 40]);
const TRACK: Rgb<u8> = Rgb([90, 90, 90]);
const FILL: Rgb<u8> = Rgb([70, 130, 200]);
const KNOB: Rgb<u8> = Rgb([235, 235, 235]);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Panel {
    width: u32,
    row_height: u32,
    rows: usize,
}

impl Panel {
    pub fn new(width: u32, row_height: usize, rows: usize) -> Self {
        Self {
            width,
            row_height: (row_height as u32).max(TRACK_THICKNESS + 2),
            rows,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.row_height * self.rows as u32
    }

    fn track_span(&self) -> (f32, f32) {
        let left = MARGIN.min(self.width / 2) as f32;
        let right = (self.width as f32 - left).max(left + 1.0);
        (left, right)
    }

    /// Row under panel-local `(x, y)`, if any.
    pub fn hit(&self, x: f32, y: f32) -> Option<usize> {
        if x < 0.0 || y < 0.0 || x >= self.width as f32 {
            return None;
        }
        let row = (y / self.row_height as f32) as usize;
        (row < self.rows).then_some(row)
    }

    /// Slider value for a pointer at panel-local `x`; clamped to the range.
    pub fn value_at(&self, control: &ControlSpec, x: f32) -> i32 {
        let (left, right) = self.track_span();
        let t = ((x - left) / (right - left)).clamp(0.0, 1.0);
        let span = (control.max - control.min) as f32;
        control.clamp(control.min + (t * span).round() as i32)
    }

    /// Track x coordinate of `value`.
    pub fn knob_x(&self, control: &ControlSpec, value: i32) -> f32 {
        let (left, right) = self.track_span();
        let span = (control.max - control.min).max(1) as f32;
        let t = (control.clamp(value) - control.min) as f32 / span;
        left + t * (right - left)
    }

    /// Render all rows for `values`.
    pub fn draw(&self, controls: &[ControlSpec], values: &[i32]) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(self.width.max(1), self.height().max(1), BACKGROUND);
        let (left, right) = self.track_span();
        for (row, (control, &value)) in controls.iter().zip(values).take(self.rows).enumerate() {
            let mid = row as u32 * self.row_height + self.row_height / 2;
            let track_top = mid.saturating_sub(TRACK_THICKNESS / 2) as i32;
            let track_len = (right - left).round().max(1.0) as u32;
            draw_filled_rect_mut(
                &mut canvas,
                Rect::at(left as i32, track_top).of_size(track_len, TRACK_THICKNESS),
                TRACK,
            );

            let knob = self.knob_x(control, value);
            let filled = (knob - left).round() as u32;
            if filled > 0 {
                draw_filled_rect_mut(
                    &mut canvas,
                    Rect::at(left as i32, track_top).of_size(filled, TRACK_THICKNESS),
                    FILL,
                );
            }

            let knob_top = (row as u32 * self.row_height + 2) as i32;
            draw_filled_rect_mut(
                &mut canvas,
                Rect::at(knob.round() as i32 - (KNOB_WIDTH / 2) as i32, knob_top)
                    .of_size(KNOB_WIDTH, self.row_height.saturating_sub(4).max(1)),
                KNOB,
            );
        }
        canvas
    }
}
