//! Per-mode pipeline: sanitize → detect → render.
//!
//! A [`Pipeline`] owns the source image plus whatever the mode precomputes
//! once at startup (grayscale working copy, the line view's edge mask, or
//! the circle view's smoothed image). [`Pipeline::process`] is a pure
//! function of the raw control snapshot.

use crate::edges::{detect_edges, EdgeParams};
use crate::hough::{detect_circles, detect_lines, line_edge_mask, presmooth};
use crate::hough::{CircleParams, LineParams};
use crate::image::{ImageF32, SourceImage};
use crate::params::spec::{circles, edge, lines};
use crate::params::{sanitize, ParameterSpec, ParameterVector, SanitizedParameterVector};
use crate::render::render;
use crate::types::{DetectionResult, DisplayFrame, EdgeMask};
use std::fmt;
use std::time::{Duration, Instant};

/// Which detector the session drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Edges,
    Lines,
    Circles,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Edges, Mode::Lines, Mode::Circles];

    /// Slider declarations of this mode.
    pub fn spec(self) -> ParameterSpec {
        match self {
            Mode::Edges => edge::spec(),
            Mode::Lines => lines::spec(),
            Mode::Circles => circles::spec(),
        }
    }

    /// Window title.
    pub fn title(self) -> &'static str {
        match self {
            Mode::Edges => "Edge Image",
            Mode::Lines => "HoughLines Interactive",
            Mode::Circles => "HoughCircles Interactive",
        }
    }

    /// Upper bound of the per-tick wait for an operator signal.
    pub fn cadence(self) -> Duration {
        match self {
            Mode::Edges => Duration::from_millis(1),
            Mode::Lines | Mode::Circles => Duration::from_millis(30),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Edges => "edges",
            Mode::Lines => "lines",
            Mode::Circles => "circles",
        };
        f.write_str(name)
    }
}

/// Mode-specific detector input computed once.
#[derive(Clone, Debug)]
enum Prepared {
    Gray(ImageF32),
    Mask(EdgeMask),
    Smoothed(ImageF32),
}

/// Output of one pass through the pipeline.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub frame: DisplayFrame,
    pub sanitized: SanitizedParameterVector,
    /// Edge pixels, lines, or circles found.
    pub detections: usize,
    pub detect_ms: f64,
    pub render_ms: f64,
}

#[derive(Clone, Debug)]
pub struct Pipeline {
    mode: Mode,
    spec: ParameterSpec,
    source: SourceImage,
    prepared: Prepared,
}

impl Pipeline {
    pub fn new(mode: Mode, source: SourceImage) -> Self {
        let gray = ImageF32::from_luma(source.gray());
        let prepared = match mode {
            Mode::Edges => Prepared::Gray(gray),
            Mode::Lines => Prepared::Mask(line_edge_mask(&gray)),
            Mode::Circles => Prepared::Smoothed(presmooth(&gray)),
        };
        Self {
            mode,
            spec: mode.spec(),
            source,
            prepared,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn spec(&self) -> &ParameterSpec {
        &self.spec
    }

    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    /// Run the mode's detector on already sanitized values.
    pub fn detect(&self, values: &SanitizedParameterVector) -> DetectionResult {
        match &self.prepared {
            Prepared::Gray(gray) => {
                DetectionResult::Edges(detect_edges(gray, &EdgeParams::from_sanitized(values)))
            }
            Prepared::Mask(mask) => {
                DetectionResult::Lines(detect_lines(mask, &LineParams::from_sanitized(values)))
            }
            Prepared::Smoothed(smoothed) => DetectionResult::Circles(detect_circles(
                smoothed,
                &CircleParams::from_sanitized(values),
            )),
        }
    }

    /// Sanitize `raw`, detect, and render onto a copy of the source.
    pub fn process(&self, raw: &ParameterVector) -> FrameOutput {
        let sanitized = sanitize(raw, &self.spec);

        let detect_start = Instant::now();
        let result = self.detect(&sanitized);
        let detect_ms = detect_start.elapsed().as_secs_f64() * 1000.0;

        let render_start = Instant::now();
        let frame = render(self.source.color(), &result);
        let render_ms = render_start.elapsed().as_secs_f64() * 1000.0;

        FrameOutput {
            frame,
            sanitized,
            detections: result.len(),
            detect_ms,
            render_ms,
        }
    }
}
