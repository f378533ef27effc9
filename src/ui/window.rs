//! `minifb` window implementing [`ControlSurface`].
//!
//! The framebuffer is the detector frame with the trackbar panel stacked
//! beneath it. Dragging with the left button moves the slider under the
//! pointer; the title carries every label and value. Any key press or
//! closing the window ends the session.

use super::panel::Panel;
use crate::error::{Result, TunerError};
use crate::params::{ParameterStore, ParameterVector};
use crate::session::ControlSurface;
use crate::types::DisplayFrame;
use log::debug;
use minifb::{KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use std::thread;
use std::time::{Duration, Instant};

/// Sleep between event pumps while waiting out the cadence.
const POLL_STEP: Duration = Duration::from_millis(2);

pub struct WindowSurface {
    window: Window,
    title: String,
    store: ParameterStore,
    panel: Panel,
    frame_width: usize,
    frame_height: usize,
    /// Last presented frame, `0RGB`.
    frame: Vec<u32>,
    buffer: Vec<u32>,
}

impl WindowSurface {
    /// Open a window sized for `width × height` frames plus the panel.
    pub fn open(
        title: &str,
        width: u32,
        height: u32,
        store: ParameterStore,
        row_height: usize,
    ) -> Result<Self> {
        let panel = Panel::new(width, row_height, store.spec().len());
        let total_height = height as usize + panel.height() as usize;
        let mut window = Window::new(title, width as usize, total_height, WindowOptions::default())
            .map_err(|e| TunerError::Window(e.to_string()))?;
        window.set_target_fps(0);

        let frame_len = width as usize * height as usize;
        let mut surface = Self {
            window,
            title: title.to_string(),
            store,
            panel,
            frame_width: width as usize,
            frame_height: height as usize,
            frame: vec![0; frame_len],
            buffer: Vec::with_capacity(frame_len),
        };
        surface.refresh_title();
        Ok(surface)
    }

    fn refresh_title(&mut self) {
        let title = format!("{} | {}", self.title, self.store.describe());
        self.window.set_title(&title);
    }

    fn blit(&mut self) -> Result<()> {
        let panel = self
            .panel
            .draw(self.store.spec().controls(), &self.store.snapshot().values);
        self.buffer.clear();
        self.buffer.extend_from_slice(&self.frame);
        self.buffer
            .extend_from_slice(&DisplayFrame::new(panel).to_0rgb());
        let height = self.frame_height + self.panel.height() as usize;
        self.window
            .update_with_buffer(&self.buffer, self.frame_width, height)
            .map_err(|e| TunerError::Window(e.to_string()))
    }

    /// Apply a left-button drag over the panel. Returns whether a value moved.
    fn handle_mouse(&mut self) -> bool {
        if !self.window.get_mouse_down(MouseButton::Left) {
            return false;
        }
        let Some((x, y)) = self.window.get_mouse_pos(MouseMode::Discard) else {
            return false;
        };
        let local_y = y - self.frame_height as f32;
        let Some(row) = self.panel.hit(x, local_y) else {
            return false;
        };
        let control = &self.store.spec().controls()[row];
        let value = self.panel.value_at(control, x);
        if self.store.get_index(row) == Some(value) {
            return false;
        }
        debug!("{} -> {value}", control.name);
        self.store.set_index(row, value);
        true
    }
}

impl ControlSurface for WindowSurface {
    fn snapshot(&self) -> ParameterVector {
        self.store.snapshot()
    }

    fn present(&mut self, frame: &DisplayFrame) -> Result<()> {
        if frame.width() as usize != self.frame_width || frame.height() as usize != self.frame_height
        {
            return Err(TunerError::Window(format!(
                "frame is {}x{}, window expects {}x{}",
                frame.width(),
                frame.height(),
                self.frame_width,
                self.frame_height
            )));
        }
        self.frame = frame.to_0rgb();
        self.blit()
    }

    fn poll_termination(&mut self, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            self.window.update();
            if !self.window.is_open() {
                return Ok(true);
            }
            if !self.window.get_keys_pressed(KeyRepeat::No).is_empty() {
                return Ok(true);
            }
            if self.handle_mouse() {
                self.refresh_title();
                self.blit()?;
                // New values are picked up by the next tick.
                return Ok(false);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            thread::sleep(POLL_STEP);
        }
    }
}
