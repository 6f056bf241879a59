//! Camera input handling
//!
//! This crate provides orbit-style camera controls driven by mouse and
//! keyboard events.

mod orbit_controls;

pub use orbit_controls::{OrbitCamera, OrbitControls};
