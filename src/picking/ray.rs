//! World-space rays and the intersection primitives behind hit-testing.

use glam::{Mat4, Vec3};

use crate::scene::Aabb;

/// Rejection threshold for near-parallel rays and near-zero hit distances.
const EPSILON: f32 = 1e-7;

/// A ray with an origin and direction.
///
/// Directions from [`Camera::pick_ray`](crate::camera::Camera::pick_ray)
/// are unit length, so intersection `t` values are world distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Direction. Unit length in world space.
    pub dir: Vec3,
}

impl Ray {
    /// Construct a ray.
    #[must_use]
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    /// Point at parameter `t`.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Map this ray through an affine transform.
    ///
    /// The direction is deliberately not renormalized: with the inverse of
    /// a surface transform, parameter `t` against local-space triangles
    /// stays commensurable with world-space distance along the original
    /// ray, even under non-uniform scale.
    #[must_use]
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            origin: matrix.transform_point3(self.origin),
            dir: matrix.transform_vector3(self.dir),
        }
    }

    /// Möller–Trumbore ray/triangle intersection.
    ///
    /// Double-sided: winding does not matter, matching how the hover test
    /// treats thin scenery visible from both sides. Returns the ray
    /// parameter of the hit, or `None` for misses, near-parallel rays, and
    /// intersections at or behind the origin.
    #[must_use]
    pub fn intersect_triangle(
        &self,
        a: Vec3,
        b: Vec3,
        c: Vec3,
    ) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.dir.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(edge1);
        let v = self.dir.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = edge2.dot(q) * inv_det;
        (t > EPSILON).then_some(t)
    }

    /// Slab test against an axis-aligned box. True when any part of the
    /// box lies on the forward side of the ray.
    #[must_use]
    pub fn intersects_aabb(&self, bounds: &Aabb) -> bool {
        let inv = self.dir.recip();
        let t1 = (bounds.min - self.origin) * inv;
        let t2 = (bounds.max - self.origin) * inv;
        let t_enter = t1.min(t2).max_element();
        let t_exit = t1.max(t2).min_element();
        t_exit >= t_enter.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward_ray() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::Z)
    }

    fn facing_triangle(z: f32) -> [Vec3; 3] {
        [
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(0.0, 1.0, z),
        ]
    }

    #[test]
    fn hits_triangle_at_distance() {
        let [a, b, c] = facing_triangle(5.0);
        let t = forward_ray().intersect_triangle(a, b, c).unwrap();
        assert!((t - 5.0).abs() < 1e-6);
        assert!((forward_ray().at(t).z - 5.0).abs() < 1e-6);
    }

    #[test]
    fn misses_outside_barycentric_range() {
        let [a, b, c] = facing_triangle(5.0);
        let off = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::Z);
        assert_eq!(off.intersect_triangle(a, b, c), None);
    }

    #[test]
    fn parallel_ray_is_rejected() {
        let [a, b, c] = facing_triangle(5.0);
        let sideways = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(sideways.intersect_triangle(a, b, c), None);
    }

    #[test]
    fn triangle_behind_origin_is_rejected() {
        let [a, b, c] = facing_triangle(-5.0);
        assert_eq!(forward_ray().intersect_triangle(a, b, c), None);
    }

    #[test]
    fn backfaces_are_hit() {
        // Reversed winding; hover treats geometry as double-sided.
        let [a, b, c] = facing_triangle(5.0);
        let t = forward_ray().intersect_triangle(c, b, a).unwrap();
        assert!((t - 5.0).abs() < 1e-6);
    }

    #[test]
    fn transform_keeps_t_commensurable() {
        // A surface scaled 2x: casting in local space through the inverse
        // transform must report the same t as the world-space hit.
        let scale = Mat4::from_scale(Vec3::splat(2.0));
        let [a, b, c] = facing_triangle(5.0); // local z=5 -> world z=10
        let world = forward_ray();
        let local = world.transformed(&scale.inverse());
        let t = local.intersect_triangle(a, b, c).unwrap();
        assert!((t - 10.0).abs() < 1e-5);
    }

    #[test]
    fn aabb_slab_test() {
        let bounds = Aabb {
            min: Vec3::new(-1.0, -1.0, 4.0),
            max: Vec3::new(1.0, 1.0, 6.0),
        };
        assert!(forward_ray().intersects_aabb(&bounds));
        // Offset past the box in x.
        let off = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::Z);
        assert!(!off.intersects_aabb(&bounds));
        // Box behind the ray.
        let away = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(!away.intersects_aabb(&bounds));
        // Origin inside the box.
        let inside = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::X);
        assert!(inside.intersects_aabb(&bounds));
    }
}
