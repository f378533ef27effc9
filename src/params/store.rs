//! Current slider positions, independent of how they are changed.
use super::spec::ParameterSpec;

/// Raw slider values in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterVector {
    pub values: Vec<i32>,
}

impl ParameterVector {
    pub fn new(values: Vec<i32>) -> Self {
        Self { values }
    }
}

impl From<Vec<i32>> for ParameterVector {
    fn from(values: Vec<i32>) -> Self {
        Self::new(values)
    }
}

/// Holds the live value of every control of one detector.
///
/// `set` clamps into the control's slider range, mirroring what a trackbar
/// can represent. Domain rules beyond the range are left to sanitization.
#[derive(Clone, Debug)]
pub struct ParameterStore {
    spec: ParameterSpec,
    values: Vec<i32>,
}

impl ParameterStore {
    pub fn new(spec: ParameterSpec) -> Self {
        let values = spec.defaults();
        Self { spec, values }
    }

    pub fn spec(&self) -> &ParameterSpec {
        &self.spec
    }

    pub fn get(&self, name: &str) -> Option<i32> {
        self.spec.index_of(name).map(|i| self.values[i])
    }

    pub fn get_index(&self, index: usize) -> Option<i32> {
        self.values.get(index).copied()
    }

    /// Set a control by name. Returns the stored (clamped) value, or `None`
    /// for unknown names.
    pub fn set(&mut self, name: &str, value: i32) -> Option<i32> {
        let index = self.spec.index_of(name)?;
        self.set_index(index, value)
    }

    pub fn set_index(&mut self, index: usize, value: i32) -> Option<i32> {
        let control = self.spec.controls().get(index)?;
        let clamped = control.clamp(value);
        self.values[index] = clamped;
        Some(clamped)
    }

    /// Immutable copy of the current values, handed to the tick function.
    pub fn snapshot(&self) -> ParameterVector {
        ParameterVector::new(self.values.clone())
    }

    /// `label=value` pairs, e.g. for a window title.
    pub fn describe(&self) -> String {
        self.spec
            .controls()
            .iter()
            .zip(&self.values)
            .map(|(c, v)| format!("{}={v}", c.name))
            .collect::<Vec<_>>()
            .join("  ")
    }
}
