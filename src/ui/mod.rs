//! Operator-facing surface.
//!
//! [`panel`] is plain geometry and drawing; [`window`] wires it to a
//! `minifb` window and is only built with the `gui` feature.

pub mod panel;
#[cfg(feature = "gui")]
pub mod window;

pub use panel::Panel;
#[cfg(feature = "gui")]
pub use window::WindowSurface;
