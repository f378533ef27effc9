#![doc = include_str!("../README.md")]

// Public modules
pub mod config;
pub mod detector;
pub mod edges;
pub mod error;
pub mod hough;
pub mod image;
pub mod params;
pub mod render;
pub mod session;
pub mod types;
pub mod ui;

#[cfg(feature = "gui")]
pub mod app;

// --- High-level re-exports -------------------------------------------------

pub use crate::detector::{FrameOutput, Mode, Pipeline};
pub use crate::error::{Result, TunerError};
pub use crate::params::{sanitize, ParameterStore, ParameterVector, SanitizedParameterVector};
pub use crate::session::{ControlSurface, InteractionLoop, LoopState};
pub use crate::types::{Circle, DetectionResult, DisplayFrame, EdgeMask, Line};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for driving a pipeline without a window.
///
/// ```no_run
/// use shape_tuner::prelude::*;
///
/// # fn main() -> shape_tuner::Result<()> {
/// let source = load_source_image(std::path::Path::new("coins.png"))?;
/// let pipeline = Pipeline::new(Mode::Circles, source);
/// let store = ParameterStore::new(Mode::Circles.spec());
///
/// let out = pipeline.process(&store.snapshot());
/// println!("circles={} detect_ms={:.3}", out.detections, out.detect_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::load_source_image;
    pub use crate::{Mode, ParameterStore, ParameterVector, Pipeline};
}
