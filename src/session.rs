//! The interactive tick loop.
//!
//! Each tick takes an immutable snapshot of the controls from a
//! [`ControlSurface`], runs it through the [`Pipeline`], presents the frame,
//! and waits at most the cadence for a termination signal. The loop holds
//! no parameter state of its own between ticks.

use crate::detector::{Mode, Pipeline};
use crate::error::Result;
use crate::params::ParameterVector;
use crate::types::DisplayFrame;
use log::{debug, info};
use std::time::Duration;

/// Boundary to whatever UI shows frames and owns the sliders.
pub trait ControlSurface {
    /// Current raw slider positions, in declaration order.
    fn snapshot(&self) -> ParameterVector;

    /// Show `frame`.
    fn present(&mut self, frame: &DisplayFrame) -> Result<()>;

    /// Wait at most `timeout` for an operator signal; `true` ends the loop.
    fn poll_termination(&mut self, timeout: Duration) -> Result<bool>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

pub struct InteractionLoop {
    pipeline: Pipeline,
    cadence: Duration,
    state: LoopState,
    ticks: u64,
}

impl InteractionLoop {
    pub fn new(pipeline: Pipeline) -> Self {
        let cadence = pipeline.mode().cadence();
        Self {
            pipeline,
            cadence,
            state: LoopState::Running,
            ticks: 0,
        }
    }

    pub fn with_cadence(mut self, cadence: Duration) -> Self {
        self.cadence = cadence;
        self
    }

    pub fn mode(&self) -> Mode {
        self.pipeline.mode()
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Completed ticks so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One full pass: snapshot → sanitize → detect → render → present → poll.
    ///
    /// A terminated loop stays terminated and performs no further work.
    pub fn tick<S: ControlSurface + ?Sized>(&mut self, surface: &mut S) -> Result<LoopState> {
        if self.state == LoopState::Terminated {
            return Ok(self.state);
        }

        let raw = surface.snapshot();
        let out = self.pipeline.process(&raw);
        debug!(
            "tick {} mode={} raw={:?} sanitized={:?} detections={} detect_ms={:.3} render_ms={:.3}",
            self.ticks,
            self.pipeline.mode(),
            raw.values,
            out.sanitized.values(),
            out.detections,
            out.detect_ms,
            out.render_ms
        );

        surface.present(&out.frame)?;
        if surface.poll_termination(self.cadence)? {
            self.state = LoopState::Terminated;
        }
        self.ticks += 1;
        Ok(self.state)
    }

    /// Tick until the surface signals termination; returns the tick count.
    pub fn run<S: ControlSurface + ?Sized>(&mut self, surface: &mut S) -> Result<u64> {
        let source = self.pipeline.source();
        info!(
            "{} session on {}x{} image, cadence {:?}",
            self.pipeline.mode(),
            source.width(),
            source.height(),
            self.cadence
        );
        while self.tick(surface)? == LoopState::Running {}
        info!("terminated after {} ticks", self.ticks);
        Ok(self.ticks)
    }
}
