use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera projection and orbit control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Rotation sensitivity multiplier.
    pub rotate_speed: f32,
    /// Pan sensitivity multiplier.
    pub pan_speed: f32,
    /// Zoom sensitivity multiplier.
    pub zoom_speed: f32,
    /// Inertial damping factor for orbit rotation. Residual velocity decays
    /// by `exp(-damping * dt)` each frame; 0 disables inertia.
    pub damping: f32,
    /// Closest allowed orbit distance.
    pub min_distance: f32,
    /// Farthest allowed orbit distance.
    pub max_distance: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 100.0,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 0.1,
            damping: 10.0,
            min_distance: 0.5,
            max_distance: 50.0,
        }
    }
}
