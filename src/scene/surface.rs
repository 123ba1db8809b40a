// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

use glam::Mat4;

use super::mesh::{Aabb, TriangleMesh};

/// Scene-assigned identifier for a surface. Stable for the lifetime of the
/// [`Scene`](super::Scene) that issued it; indexes into its surface list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(u32);

impl SurfaceId {
    pub(crate) fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position of this surface in scene traversal order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which pipeline shades a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialRole {
    /// Sample the shared baked lightmap through the surface's UVs.
    Baked,
    /// Flat emissive color, no texture. Used for light fixtures.
    Emissive,
}

/// A named, hit-testable mesh instance in the scene.
///
/// The world transform is fixed at build time; its inverse and the
/// world-space bounds are cached for the raycaster's per-frame queries.
#[derive(Debug, Clone)]
pub struct Surface {
    id: SurfaceId,
    name: String,
    mesh: TriangleMesh,
    material: MaterialRole,
    transform: Mat4,
    inv_transform: Mat4,
    world_aabb: Aabb,
}

impl Surface {
    pub(super) fn new(
        id: SurfaceId,
        name: String,
        mesh: TriangleMesh,
        material: MaterialRole,
        transform: Mat4,
        world_aabb: Aabb,
    ) -> Self {
        Self {
            id,
            name,
            mesh,
            material,
            transform,
            inv_transform: transform.inverse(),
            world_aabb,
        }
    }

    /// Scene-assigned identifier.
    #[must_use]
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Authoring name, unique within the scene.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local-space geometry.
    #[must_use]
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Which pipeline shades this surface.
    #[must_use]
    pub fn material(&self) -> MaterialRole {
        self.material
    }

    /// Local-to-world transform.
    #[must_use]
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// World-to-local transform, cached at build time.
    #[must_use]
    pub fn inv_transform(&self) -> Mat4 {
        self.inv_transform
    }

    /// World-space bounds, cached at build time.
    #[must_use]
    pub fn world_aabb(&self) -> Aabb {
        self.world_aabb
    }
}
