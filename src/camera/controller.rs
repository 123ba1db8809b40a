use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Vec2, Vec3};

use crate::camera::core::Camera;
use crate::options::CameraOptions;
use crate::util::MAX_DT;

/// Pitch limit just short of the poles, keeping the view basis stable.
const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;

/// Velocity impulse per pixel of drag, per unit `rotate_speed`. The
/// damped integral of one impulse works out to roughly
/// [`ROTATE_DIRECT`] radians at the default damping.
const ROTATE_IMPULSE: f32 = 0.05;

/// Radians per pixel when damping is disabled.
const ROTATE_DIRECT: f32 = 0.005;

/// World units of pan per pixel at distance 1, per unit `pan_speed`.
const PAN_SENSITIVITY: f32 = 0.001;

/// Default eye position: slightly above and to the side of the scene.
const DEFAULT_EYE: Vec3 = Vec3::new(2.0, 2.0, 5.0);

/// Default orbit target: roughly eye height inside the scene.
const DEFAULT_TARGET: Vec3 = Vec3::new(0.0, 0.75, 0.0);

/// Orbit camera: yaw/pitch/distance around a pannable target, with
/// inertial damping on rotation.
///
/// Purely CPU-side state; the renderer reads [`camera`](Self::camera) and
/// owns the GPU uniform. Drag deltas arrive in physical pixels.
pub struct OrbitController {
    /// Derived perspective camera, recomputed on [`update`](Self::update).
    pub camera: Camera,

    yaw: f32,
    pitch: f32,
    distance: f32,
    target: Vec3,

    yaw_velocity: f32,
    pitch_velocity: f32,

    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    damping: f32,
    min_distance: f32,
    max_distance: f32,
}

impl OrbitController {
    /// Controller at the default pose, looking into the scene.
    #[must_use]
    pub fn new(aspect: f32, options: &CameraOptions) -> Self {
        let offset = DEFAULT_EYE - DEFAULT_TARGET;
        let distance = offset.length();
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / distance).asin();

        let camera = Camera {
            eye: DEFAULT_EYE,
            target: DEFAULT_TARGET,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        Self {
            camera,
            yaw,
            pitch,
            distance,
            target: DEFAULT_TARGET,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            damping: options.damping,
            min_distance: options.min_distance,
            max_distance: options.max_distance,
        }
    }

    /// Feed a rotation drag delta in pixels. With damping enabled the
    /// delta becomes angular velocity that [`update`](Self::update) decays;
    /// without damping it applies immediately.
    pub fn rotate(&mut self, delta: Vec2) {
        if self.damping > 0.0 {
            let step = delta * self.rotate_speed * ROTATE_IMPULSE;
            self.yaw_velocity -= step.x;
            self.pitch_velocity += step.y;
        } else {
            let step = delta * self.rotate_speed * ROTATE_DIRECT;
            self.yaw -= step.x;
            self.pitch =
                (self.pitch + step.y).clamp(-MAX_PITCH, MAX_PITCH);
        }
    }

    /// Pan the orbit target across the view plane, in pixels. Pan distance
    /// scales with orbit distance so screen-space speed feels constant.
    pub fn pan(&mut self, delta: Vec2) {
        let forward = (self.camera.target - self.camera.eye).normalize();
        let right = forward.cross(self.camera.up).normalize();
        let up = right.cross(forward);
        let scale = self.distance * self.pan_speed * PAN_SENSITIVITY;
        self.target += right * (-delta.x * scale) + up * (delta.y * scale);
    }

    /// Dolly toward (positive steps) or away from the target.
    pub fn zoom(&mut self, steps: f32) {
        self.distance = (self.distance * (1.0 - steps * self.zoom_speed))
            .clamp(self.min_distance, self.max_distance);
    }

    /// Integrate rotation velocity, decay it, and recompute the camera.
    ///
    /// `dt` is clamped to [`MAX_DT`] so a stalled frame (window drag,
    /// debugger pause) cannot spin the orbit through a huge arc.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.min(MAX_DT);
        if self.damping > 0.0 {
            self.yaw += self.yaw_velocity * dt;
            self.pitch = (self.pitch + self.pitch_velocity * dt)
                .clamp(-MAX_PITCH, MAX_PITCH);

            let decay = (-self.damping * dt).exp();
            self.yaw_velocity *= decay;
            self.pitch_velocity *= decay;
        }
        self.yaw = self.yaw.rem_euclid(2.0 * PI);

        let dir = Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        );
        self.camera.eye = self.target + dir * self.distance;
        self.camera.target = self.target;
    }

    /// Track a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.aspect = width as f32 / height.max(1) as f32;
    }

    /// Current orbit distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> OrbitController {
        OrbitController::new(1.5, &CameraOptions::default())
    }

    #[test]
    fn starts_at_default_pose() {
        let mut ctl = controller();
        ctl.update(0.016);
        assert!((ctl.camera.eye - DEFAULT_EYE).length() < 1e-4);
        assert!((ctl.camera.target - DEFAULT_TARGET).length() < 1e-6);
        assert_eq!(ctl.camera.fovy, 75.0);
    }

    #[test]
    fn rotation_keeps_orbit_distance() {
        let mut ctl = controller();
        ctl.rotate(Vec2::new(120.0, 40.0));
        for _ in 0..30 {
            ctl.update(0.016);
        }
        let dist = (ctl.camera.eye - ctl.camera.target).length();
        assert!((dist - ctl.distance()).abs() < 1e-4);
    }

    #[test]
    fn damping_decays_rotation_velocity() {
        let mut ctl = controller();
        ctl.rotate(Vec2::new(200.0, 0.0));
        ctl.update(0.016);
        let early_eye = ctl.camera.eye;

        // Half a second of coasting: still moving, but slowing.
        for _ in 0..30 {
            ctl.update(0.016);
        }
        let mid_eye = ctl.camera.eye;
        assert!((mid_eye - early_eye).length() > 1e-4);

        // After several damping time constants the orbit has settled.
        for _ in 0..600 {
            ctl.update(0.016);
        }
        let settled = ctl.camera.eye;
        ctl.update(0.016);
        assert!((ctl.camera.eye - settled).length() < 1e-5);
    }

    #[test]
    fn stalled_frame_dt_is_clamped() {
        // A five-second frame gap integrates no further than the clamp
        // ceiling.
        let mut stalled = controller();
        let mut steady = controller();
        stalled.rotate(Vec2::new(200.0, 0.0));
        steady.rotate(Vec2::new(200.0, 0.0));

        stalled.update(5.0);
        steady.update(MAX_DT);

        assert!((stalled.camera.eye - steady.camera.eye).length() < 1e-6);
    }

    #[test]
    fn pitch_clamps_short_of_the_poles() {
        let mut ctl = controller();
        // Enormous upward drag.
        ctl.rotate(Vec2::new(0.0, 1e5));
        for _ in 0..120 {
            ctl.update(0.016);
        }
        let offset = ctl.camera.eye - ctl.camera.target;
        let pitch = (offset.y / offset.length()).asin();
        assert!(pitch <= MAX_PITCH + 1e-4);
        // Looking nearly straight down at the target still has a basis.
        assert!(ctl.camera.build_matrix().is_finite());
    }

    #[test]
    fn zoom_clamps_to_distance_limits() {
        let mut ctl = controller();
        ctl.zoom(1e4);
        ctl.update(0.016);
        assert!((ctl.distance() - 0.5).abs() < 1e-6);

        ctl.zoom(-1e6);
        ctl.update(0.016);
        assert!((ctl.distance() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn pan_moves_target_across_view_plane() {
        let mut ctl = controller();
        ctl.update(0.016);
        let before = ctl.camera.target;
        ctl.pan(Vec2::new(300.0, 0.0));
        ctl.update(0.016);
        let moved = ctl.camera.target - before;
        assert!(moved.length() > 1e-4);
        // Pan never changes orbit distance.
        let dist = (ctl.camera.eye - ctl.camera.target).length();
        assert!((dist - ctl.distance()).abs() < 1e-4);
    }
}
