//! Raw slider vector → values every detector can accept.
//!
//! `sanitize` is total and pure: it never fails, never reads outside its
//! arguments, and identical inputs always produce identical outputs.
use super::spec::{Constraint, ParameterSpec};
use super::store::ParameterVector;

/// Sanitized values in declaration order.
///
/// Only [`sanitize`] builds this type, so its length always equals the
/// length of the [`ParameterSpec`] it was produced from.
#[derive(Clone, Debug, PartialEq)]
pub struct SanitizedParameterVector {
    values: Vec<f64>,
}

impl SanitizedParameterVector {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the control at `index`, as a float.
    ///
    /// `index` must come from the [`ParameterSpec`] this vector was
    /// sanitized against; other indices panic.
    #[inline]
    pub fn get(&self, index: usize) -> f64 {
        self.values[index]
    }

    /// Value of the control at `index`, truncated to an integer.
    #[inline]
    pub fn int(&self, index: usize) -> i32 {
        self.values[index] as i32
    }
}

/// Force a kernel size odd and at least 1.
#[inline]
pub fn odd_kernel(k: i32) -> i32 {
    let k = if k % 2 == 0 { k + 1 } else { k };
    k.max(1)
}

/// Upper bound of a dependent pair; `0` keeps its "unbounded" meaning.
#[inline]
pub fn upper_bound(upper: i32, lower: i32) -> i32 {
    if upper > 0 && upper < lower {
        lower.saturating_add(1)
    } else {
        upper
    }
}

/// Apply every constraint of `spec` to `raw`.
///
/// Missing trailing entries fall back to the control defaults and surplus
/// entries are ignored. Dependent pairs read the already-sanitized sibling.
pub fn sanitize(raw: &ParameterVector, spec: &ParameterSpec) -> SanitizedParameterVector {
    let controls = spec.controls();
    let mut values: Vec<f64> = controls
        .iter()
        .enumerate()
        .map(|(i, control)| {
            let v = raw.values.get(i).copied().unwrap_or(control.default);
            match control.constraint {
                Constraint::None | Constraint::UpperBound { .. } => v as f64,
                Constraint::Odd => odd_kernel(v.min(control.max)) as f64,
                Constraint::AtLeast(floor) => v.max(floor) as f64,
                Constraint::Within { min, max } => v.clamp(min, max) as f64,
                Constraint::Scaled { divisor, floor } => (v as f64 / divisor).max(floor),
            }
        })
        .collect();

    for (i, control) in controls.iter().enumerate() {
        if let Constraint::UpperBound { lower } = control.constraint {
            if let Some(&lower_value) = values.get(lower) {
                values[i] = upper_bound(values[i] as i32, lower_value as i32) as f64;
            }
        }
    }

    SanitizedParameterVector { values }
}
