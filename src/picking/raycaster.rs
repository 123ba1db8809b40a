//! Whole-scene ray queries.

use super::ray::Ray;
use crate::scene::{Scene, SurfaceId};

/// A raycast intersection with one surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// The surface that was struck.
    pub surface: SurfaceId,
    /// World distance from the ray origin to the nearest struck triangle
    /// of that surface.
    pub distance: f32,
}

/// Cast a ray against every surface, nearest hit first.
///
/// Each surface contributes at most one [`Hit`], carrying its closest
/// triangle intersection. Surfaces whose world bounds the ray cannot
/// touch are skipped before any triangle work. The sort is stable, so
/// equidistant surfaces resolve in scene traversal order.
#[must_use]
pub fn cast(scene: &Scene, ray: &Ray) -> Vec<Hit> {
    let mut hits = Vec::new();
    for surface in scene.surfaces() {
        if !ray.intersects_aabb(&surface.world_aabb()) {
            continue;
        }
        let local = ray.transformed(&surface.inv_transform());
        let mut nearest: Option<f32> = None;
        for [a, b, c] in surface.mesh().triangles() {
            if let Some(t) = local.intersect_triangle(a, b, c) {
                nearest = Some(nearest.map_or(t, |n| n.min(t)));
            }
        }
        if let Some(distance) = nearest {
            hits.push(Hit { surface: surface.id(), distance });
        }
    }
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec2, Vec3};

    use super::*;
    use crate::scene::{MaterialRole, TriangleMesh};

    /// 2x2 quad in the XY plane at local z = 0.
    fn quad() -> TriangleMesh {
        TriangleMesh {
            positions: vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
            ],
            uvs: vec![Vec2::ZERO; 4],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    fn quad_wall_scene(depths: &[(&str, f32)]) -> Scene {
        let mut builder = Scene::builder();
        for (name, z) in depths {
            let _ = builder.surface(
                *name,
                quad(),
                MaterialRole::Baked,
                Mat4::from_translation(Vec3::new(0.0, 0.0, *z)),
            );
        }
        builder.build().unwrap()
    }

    #[test]
    fn hits_come_back_nearest_first() {
        // Walls at 5, 2, 8 units along the ray; the one at 2 must win.
        let scene = quad_wall_scene(&[("far", 5.0), ("near", 2.0), ("farther", 8.0)]);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let hits = cast(&scene, &ray);
        assert_eq!(hits.len(), 3);
        let names: Vec<&str> = hits
            .iter()
            .map(|h| scene.surface(h.surface).name())
            .collect();
        assert_eq!(names, ["near", "far", "farther"]);
        assert!((hits[0].distance - 2.0).abs() < 1e-6);
    }

    #[test]
    fn equidistant_surfaces_resolve_in_scene_order() {
        let scene = quad_wall_scene(&[("first", 3.0), ("second", 3.0)]);
        let hits = cast(&scene, &Ray::new(Vec3::ZERO, Vec3::Z));
        assert_eq!(hits.len(), 2);
        assert_eq!(scene.surface(hits[0].surface).name(), "first");
    }

    #[test]
    fn surfaces_behind_the_ray_are_culled() {
        let scene = quad_wall_scene(&[("behind", -4.0), ("ahead", 4.0)]);
        let hits = cast(&scene, &Ray::new(Vec3::ZERO, Vec3::Z));
        assert_eq!(hits.len(), 1);
        assert_eq!(scene.surface(hits[0].surface).name(), "ahead");
    }

    #[test]
    fn miss_returns_no_hits() {
        let scene = quad_wall_scene(&[("wall", 5.0)]);
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::Z);
        assert!(cast(&scene, &ray).is_empty());
    }

    #[test]
    fn surface_reports_its_closest_triangle() {
        // One surface, two parallel quads merged into a single mesh; its
        // hit distance must be the nearer face.
        let mut mesh = quad();
        let far_offset = mesh.positions.len() as u32;
        let far: Vec<Vec3> = quad()
            .positions
            .iter()
            .map(|p| *p + Vec3::new(0.0, 0.0, 3.0))
            .collect();
        mesh.positions.extend_from_slice(&far);
        mesh.uvs.extend_from_slice(&vec![Vec2::ZERO; 4]);
        let far_indices: Vec<u32> =
            quad().indices.iter().map(|i| i + far_offset).collect();
        mesh.indices.extend_from_slice(&far_indices);

        let mut builder = Scene::builder();
        let _ = builder.surface(
            "slab",
            mesh,
            MaterialRole::Baked,
            Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0)),
        );
        let scene = builder.build().unwrap();

        let hits = cast(&scene, &Ray::new(Vec3::ZERO, Vec3::Z));
        assert_eq!(hits.len(), 1);
        assert!((hits[0].distance - 2.0).abs() < 1e-6);
    }

    #[test]
    fn scaled_surface_reports_world_distance() {
        // Quad scaled 3x and pushed to z = 6: local t must still come back
        // as the 6-unit world distance.
        let mut builder = Scene::builder();
        let _ = builder.surface(
            "big",
            quad(),
            MaterialRole::Baked,
            Mat4::from_scale_rotation_translation(
                Vec3::splat(3.0),
                glam::Quat::IDENTITY,
                Vec3::new(0.0, 0.0, 6.0),
            ),
        );
        let scene = builder.build().unwrap();

        let hits = cast(&scene, &Ray::new(Vec3::ZERO, Vec3::Z));
        assert!((hits[0].distance - 6.0).abs() < 1e-5);
    }
}
