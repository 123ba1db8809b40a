use glam::{Mat4, Vec2, Vec3};

use crate::picking::Ray;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Camera {
    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }

    /// World-space ray through a normalized device coordinate.
    ///
    /// `ndc` is (-1, -1) at the bottom-left of the viewport and (1, 1) at
    /// the top-right. The direction is unit length, so triangle hits along
    /// it measure world distance from the eye.
    #[must_use]
    pub fn pick_ray(&self, ndc: Vec2) -> Ray {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward);
        let t = (self.fovy.to_radians() * 0.5).tan();
        let dir = (forward
            + right * (ndc.x * t * self.aspect)
            + up * (ndc.y * t))
            .normalize();
        Ray::new(self.eye, dir)
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self { view_proj: Mat4::IDENTITY.to_cols_array_2d() }
    }

    /// Update the matrix from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 2.0,
            fovy: 90.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    #[test]
    fn center_ray_looks_at_target() {
        let ray = camera().pick_ray(Vec2::ZERO);
        assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 5.0));
        assert!((ray.dir - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn corner_rays_spread_with_fov_and_aspect() {
        let cam = camera();
        // fovy 90° -> tan = 1; top edge ndc (0, 1) tilts 45° upward.
        let top = cam.pick_ray(Vec2::new(0.0, 1.0));
        assert!((top.dir.y - (2.0f32.sqrt() / 2.0)).abs() < 1e-5);

        // Right edge picks up the 2x aspect: direction x/|z| == 2.
        let right = cam.pick_ray(Vec2::new(1.0, 0.0));
        assert!((right.dir.x / -right.dir.z - 2.0).abs() < 1e-5);

        // All pick directions are unit length.
        let corner = cam.pick_ray(Vec2::new(-1.0, -1.0));
        assert!((corner.dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn pick_ray_hits_what_the_projection_shows() {
        // Unproject an NDC, march along the ray, reproject: the clip-space
        // position must land on the same NDC.
        let cam = camera();
        let ndc = Vec2::new(0.4, -0.7);
        let ray = cam.pick_ray(ndc);
        let world = ray.at(3.0);

        let clip = cam.build_matrix() * world.extend(1.0);
        let reprojected = Vec2::new(clip.x / clip.w, clip.y / clip.w);
        assert!((reprojected - ndc).length() < 1e-4);
    }
}
