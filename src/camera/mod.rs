//! Camera system for 3D scene viewing.
//!
//! Provides an orbital camera with rotation, panning, zoom, inertial
//! damping, and pointer-ray unprojection for hit-testing.

/// Orbital camera controller managing rotation, pan, and zoom.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;

pub use controller::OrbitController;
pub use core::{Camera, CameraUniform};
