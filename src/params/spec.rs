//! Static control declarations.
//!
//! Each detector exposes an ordered list of integer sliders. A control's
//! [`Constraint`] describes how its raw slider position is coerced into a
//! value the detector accepts; see [`super::sanitize`].

/// Domain rule applied to one control during sanitization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Constraint {
    /// Passed through unchanged.
    None,
    /// Kernel sizes: capped at the slider maximum, then even values are
    /// bumped to the next odd value, floor 1.
    Odd,
    /// Votes, thresholds, counts and resolutions: floored at the given value.
    AtLeast(i32),
    /// Clamped into `[min, max]`.
    Within { min: i32, max: i32 },
    /// Integer slider standing for a fraction: `max(raw / divisor, floor)`.
    Scaled { divisor: f64, floor: f64 },
    /// Upper bound paired with the control at index `lower`.
    ///
    /// Zero means unbounded and is kept. A positive value below the
    /// sanitized lower bound becomes `lower + 1`.
    UpperBound { lower: usize },
}

/// One slider: label shown to the operator, range, and initial position.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlSpec {
    pub name: &'static str,
    pub min: i32,
    pub max: i32,
    pub default: i32,
    pub constraint: Constraint,
}

impl ControlSpec {
    pub const fn new(name: &'static str, min: i32, max: i32, default: i32) -> Self {
        Self {
            name,
            min,
            max,
            default,
            constraint: Constraint::None,
        }
    }

    pub const fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = constraint;
        self
    }

    /// Clamp a slider position into `[min, max]`.
    #[inline]
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

/// Ordered set of controls belonging to one detector.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSpec {
    controls: Vec<ControlSpec>,
}

impl ParameterSpec {
    pub fn new(controls: Vec<ControlSpec>) -> Self {
        Self { controls }
    }

    pub fn controls(&self) -> &[ControlSpec] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.controls.iter().position(|c| c.name == name)
    }

    pub fn defaults(&self) -> Vec<i32> {
        self.controls.iter().map(|c| c.default).collect()
    }
}

/// Edge view: Canny thresholds plus the pre-blur kernel.
pub mod edge {
    use super::{Constraint, ControlSpec, ParameterSpec};

    pub const MIN_THRESHOLD: usize = 0;
    pub const MAX_THRESHOLD: usize = 1;
    pub const BLUR_KERNEL: usize = 2;

    pub fn spec() -> ParameterSpec {
        ParameterSpec::new(vec![
            ControlSpec::new("Min Threshold", 0, 255, 50),
            ControlSpec::new("Max Threshold", 0, 255, 150),
            ControlSpec::new("Blur Kernel", 1, 31, 7).with_constraint(Constraint::Odd),
        ])
    }
}

/// Standard / multi-scale Hough lines.
pub mod lines {
    use super::{Constraint, ControlSpec, ParameterSpec};

    pub const RHO: usize = 0;
    pub const THETA_DEG: usize = 1;
    pub const THRESHOLD: usize = 2;
    pub const SRN: usize = 3;
    pub const STN: usize = 4;

    pub fn spec() -> ParameterSpec {
        ParameterSpec::new(vec![
            ControlSpec::new("rho", 1, 10, 1).with_constraint(Constraint::AtLeast(1)),
            ControlSpec::new("theta (deg)", 1, 180, 1).with_constraint(Constraint::AtLeast(1)),
            ControlSpec::new("threshold", 1, 300, 100).with_constraint(Constraint::AtLeast(1)),
            ControlSpec::new("srn", 0, 10, 0)
                .with_constraint(Constraint::Within { min: 0, max: 10 }),
            ControlSpec::new("stn", 0, 10, 0)
                .with_constraint(Constraint::Within { min: 0, max: 10 }),
        ])
    }
}

/// Hough gradient circles.
pub mod circles {
    use super::{Constraint, ControlSpec, ParameterSpec};

    pub const DP: usize = 0;
    pub const MIN_DIST: usize = 1;
    pub const PARAM1: usize = 2;
    pub const PARAM2: usize = 3;
    pub const MIN_RADIUS: usize = 4;
    pub const MAX_RADIUS: usize = 5;

    pub fn spec() -> ParameterSpec {
        ParameterSpec::new(vec![
            ControlSpec::new("dp x10", 1, 30, 1).with_constraint(Constraint::Scaled {
                divisor: 10.0,
                floor: 1.0,
            }),
            ControlSpec::new("minDist", 1, 300, 50).with_constraint(Constraint::AtLeast(1)),
            ControlSpec::new("param1 (Canny)", 1, 300, 200)
                .with_constraint(Constraint::AtLeast(1)),
            ControlSpec::new("param2 (vote)", 1, 150, 17).with_constraint(Constraint::AtLeast(1)),
            ControlSpec::new("minRadius", 0, 100, 10).with_constraint(Constraint::AtLeast(0)),
            ControlSpec::new("maxRadius", 0, 300, 200)
                .with_constraint(Constraint::UpperBound { lower: MIN_RADIUS }),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_defaults_sit_inside_their_ranges() {
        for spec in [edge::spec(), lines::spec(), circles::spec()] {
            for control in spec.controls() {
                assert!(
                    control.min <= control.default && control.default <= control.max,
                    "{} default {} outside [{}, {}]",
                    control.name,
                    control.default,
                    control.min,
                    control.max
                );
            }
        }
    }

    #[test]
    fn index_constants_match_names() {
        let spec = circles::spec();
        assert_eq!(spec.index_of("minRadius"), Some(circles::MIN_RADIUS));
        assert_eq!(spec.index_of("maxRadius"), Some(circles::MAX_RADIUS));
        assert_eq!(lines::spec().index_of("stn"), Some(lines::STN));
        assert_eq!(edge::spec().index_of("Blur Kernel"), Some(edge::BLUR_KERNEL));
        assert_eq!(spec.index_of("missing"), None);
    }
}
