//! Control declarations, live values, and sanitization.
//!
//! - [`spec`]: static per-detector slider declarations and their rules.
//! - [`store`]: the mutable slider state owned by the UI side.
//! - [`sanitize`]: pure coercion of a raw snapshot into detector-safe values.

pub mod sanitize;
pub mod spec;
pub mod store;

pub use sanitize::{sanitize, SanitizedParameterVector};
pub use spec::{Constraint, ControlSpec, ParameterSpec};
pub use store::{ParameterStore, ParameterVector};
