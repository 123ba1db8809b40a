//! Triangle mesh geometry shared by rendering and picking.

use glam::{Mat4, Vec2, Vec3};
use rustc_hash::FxHashSet;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Tight bounds around a point set. Returns `None` for an empty set.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let mut bounds = Self { min: first, max: first };
        for p in &points[1..] {
            bounds.min = bounds.min.min(*p);
            bounds.max = bounds.max.max(*p);
        }
        Some(bounds)
    }

    /// Bounds of this box under an affine transform, computed from the
    /// eight transformed corners.
    #[must_use]
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let mut corners = [Vec3::ZERO; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            let pick = |bit: usize, lo: f32, hi: f32| {
                if i & bit == 0 {
                    lo
                } else {
                    hi
                }
            };
            *corner = matrix.transform_point3(Vec3::new(
                pick(1, self.min.x, self.max.x),
                pick(2, self.min.y, self.max.y),
                pick(4, self.min.z, self.max.z),
            ));
        }
        let mut bounds = Self { min: corners[0], max: corners[0] };
        for c in &corners[1..] {
            bounds.min = bounds.min.min(*c);
            bounds.max = bounds.max.max(*c);
        }
        bounds
    }
}

/// Indexed triangle geometry in surface-local space.
///
/// Positions and UVs are parallel arrays; indices reference both. The
/// renderer consumes UVs for the baked lightmap, the raycaster walks the
/// triangles, and the highlight overlay derives its line list from the
/// unique edges.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Lightmap texture coordinates, one per position.
    pub uvs: Vec<Vec2>,
    /// Triangle indices, three per face.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangle corner positions.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }

    /// Local-space bounds. `None` if the mesh has no vertices.
    #[must_use]
    pub fn local_aabb(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }

    /// Undirected unique edges over the index buffer, for wireframe line
    /// lists. Shared edges between adjacent triangles appear once.
    #[must_use]
    pub fn unique_edges(&self) -> Vec<[u32; 2]> {
        let mut seen = FxHashSet::default();
        let mut edges = Vec::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in
                [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])]
            {
                let key = if a < b { (a, b) } else { (b, a) };
                if seen.insert(key) {
                    edges.push([key.0, key.1]);
                }
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> TriangleMesh {
        // Unit quad in the XY plane, two triangles sharing the 0-2 diagonal.
        TriangleMesh {
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            uvs: vec![Vec2::ZERO; 4],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    #[test]
    fn quad_has_five_unique_edges() {
        let edges = quad().unique_edges();
        assert_eq!(edges.len(), 5);
        // The shared diagonal appears exactly once.
        let diagonals =
            edges.iter().filter(|e| **e == [0, 2]).count();
        assert_eq!(diagonals, 1);
    }

    #[test]
    fn aabb_bounds_points() {
        let bounds = quad().local_aabb().unwrap();
        assert_eq!(bounds.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 1.0, 0.0));
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn aabb_transform_rebounds_corners() {
        let bounds = quad().local_aabb().unwrap();
        let moved = bounds
            .transformed(&Mat4::from_translation(Vec3::new(2.0, 0.0, -1.0)));
        assert_eq!(moved.min, Vec3::new(2.0, 0.0, -1.0));
        assert_eq!(moved.max, Vec3::new(3.0, 1.0, -1.0));

        // 90° about Z maps +X to +Y; bounds stay axis-aligned.
        let spun = bounds
            .transformed(&Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2));
        assert!((spun.min.x - -1.0).abs() < 1e-6);
        assert!((spun.max.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn triangles_reads_indexed_corners() {
        let mesh = quad();
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris.len(), 2);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(tris[0][1], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(tris[1][2], Vec3::new(0.0, 1.0, 0.0));
    }
}
