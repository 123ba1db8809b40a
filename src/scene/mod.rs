//! Authoritative scene: flat surface storage with validated identity.
//!
//! Everything hit-testable is a [`Surface`]: a named triangle mesh with a
//! fixed world transform and a material role. Surfaces enter the scene only
//! through [`SceneBuilder`], which rejects unnamed or duplicate names up
//! front so every raycast hit maps to exactly one well-defined identity.

mod loader;
mod mesh;
mod surface;

use std::fmt;

use glam::Mat4;
pub use loader::load_gltf;
pub use mesh::{Aabb, TriangleMesh};
use rustc_hash::FxHashMap;
pub use surface::{MaterialRole, Surface, SurfaceId};

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Why a surface definition was rejected at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneValidationError {
    /// A surface was added with an empty name.
    EmptyName {
        /// Insertion index of the offending surface.
        index: usize,
    },
    /// Two surfaces share a name.
    DuplicateName {
        /// The name that appeared twice.
        name: String,
    },
    /// A surface mesh has no triangles.
    EmptyMesh {
        /// Name of the offending surface.
        name: String,
    },
    /// A triangle index points past the vertex arrays.
    IndexOutOfBounds {
        /// Name of the offending surface.
        name: String,
    },
    /// UV count does not match position count.
    UvCountMismatch {
        /// Name of the offending surface.
        name: String,
    },
    /// A baked surface lacks texture coordinates.
    MissingUvs {
        /// Name of the offending surface.
        name: String,
    },
}

impl fmt::Display for SceneValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName { index } => {
                write!(f, "surface #{index} has an empty name")
            }
            Self::DuplicateName { name } => {
                write!(f, "surface name {name:?} is not unique")
            }
            Self::EmptyMesh { name } => {
                write!(f, "surface {name:?} has no triangles")
            }
            Self::IndexOutOfBounds { name } => {
                write!(f, "surface {name:?} has out-of-range triangle indices")
            }
            Self::UvCountMismatch { name } => {
                write!(f, "surface {name:?} UV count != position count")
            }
            Self::MissingUvs { name } => {
                write!(
                    f,
                    "baked surface {name:?} has no texture coordinates"
                )
            }
        }
    }
}

impl std::error::Error for SceneValidationError {}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// The authoritative scene. Owns all surfaces in a flat list, in glTF
/// traversal order; that order is the tie-break for equidistant raycast
/// hits and the draw order of the renderer.
#[derive(Debug)]
pub struct Scene {
    surfaces: Vec<Surface>,
    by_name: FxHashMap<String, SurfaceId>,
}

impl Scene {
    /// Start building a scene.
    #[must_use]
    pub fn builder() -> SceneBuilder {
        SceneBuilder { pending: Vec::new() }
    }

    /// All surfaces in traversal order.
    #[must_use]
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Look up a surface by its scene-assigned id.
    #[must_use]
    pub fn surface(&self, id: SurfaceId) -> &Surface {
        &self.surfaces[id.index()]
    }

    /// Look up a surface by its authoring name.
    #[must_use]
    pub fn surface_by_name(&self, name: &str) -> Option<&Surface> {
        self.by_name.get(name).map(|id| self.surface(*id))
    }

    /// Number of surfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether the scene has no surfaces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SceneBuilder
// ---------------------------------------------------------------------------

/// Collects surface definitions and validates them into a [`Scene`].
pub struct SceneBuilder {
    pending: Vec<(String, TriangleMesh, MaterialRole, Mat4)>,
}

impl SceneBuilder {
    /// Queue a surface. Identity and geometry are checked at
    /// [`build`](Self::build), not here.
    pub fn surface(
        &mut self,
        name: impl Into<String>,
        mesh: TriangleMesh,
        material: MaterialRole,
        transform: Mat4,
    ) -> &mut Self {
        self.pending.push((name.into(), mesh, material, transform));
        self
    }

    /// Validate every queued surface and assemble the scene.
    ///
    /// # Errors
    /// Rejects empty or duplicate names, meshes without triangles,
    /// out-of-range indices, and mismatched UV counts.
    pub fn build(self) -> Result<Scene, SceneValidationError> {
        let mut surfaces = Vec::with_capacity(self.pending.len());
        let mut by_name = FxHashMap::default();

        for (index, (name, mesh, material, transform)) in
            self.pending.into_iter().enumerate()
        {
            if name.is_empty() {
                return Err(SceneValidationError::EmptyName { index });
            }
            if mesh.indices.is_empty() || mesh.indices.len() % 3 != 0 {
                return Err(SceneValidationError::EmptyMesh { name });
            }
            let vertex_count = mesh.positions.len() as u32;
            if mesh.indices.iter().any(|i| *i >= vertex_count) {
                return Err(SceneValidationError::IndexOutOfBounds { name });
            }
            if mesh.uvs.len() != mesh.positions.len() {
                return Err(SceneValidationError::UvCountMismatch { name });
            }
            // Non-empty index buffer implies at least one vertex, so the
            // local bounds always exist here.
            let Some(local) = mesh.local_aabb() else {
                return Err(SceneValidationError::EmptyMesh { name });
            };

            let id = SurfaceId::new(index as u32);
            if by_name.insert(name.clone(), id).is_some() {
                return Err(SceneValidationError::DuplicateName { name });
            }
            surfaces.push(Surface::new(
                id,
                name,
                mesh,
                material,
                transform,
                local.transformed(&transform),
            ));
        }

        Ok(Scene { surfaces, by_name })
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use super::*;

    fn tri_mesh() -> TriangleMesh {
        TriangleMesh {
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            uvs: vec![Vec2::ZERO; 3],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn build_assigns_ids_in_traversal_order() {
        let mut builder = Scene::builder();
        let _ = builder
            .surface("floor", tri_mesh(), MaterialRole::Baked, Mat4::IDENTITY)
            .surface(
                "Circle",
                tri_mesh(),
                MaterialRole::Emissive,
                Mat4::IDENTITY,
            );
        let scene = builder.build().unwrap();

        assert_eq!(scene.len(), 2);
        assert_eq!(scene.surfaces()[0].name(), "floor");
        assert_eq!(scene.surfaces()[1].id().index(), 1);
        let circle = scene.surface_by_name("Circle").unwrap();
        assert_eq!(circle.material(), MaterialRole::Emissive);
        assert!(scene.surface_by_name("missing").is_none());
    }

    #[test]
    fn scene_debug_format_names_surfaces() {
        let mut builder = Scene::builder();
        let _ = builder.surface(
            "floor",
            tri_mesh(),
            MaterialRole::Baked,
            Mat4::IDENTITY,
        );
        let scene = builder.build().unwrap();
        assert!(format!("{scene:?}").contains("floor"));
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut builder = Scene::builder();
        let _ = builder.surface(
            "",
            tri_mesh(),
            MaterialRole::Baked,
            Mat4::IDENTITY,
        );
        assert_eq!(
            builder.build().unwrap_err(),
            SceneValidationError::EmptyName { index: 0 }
        );
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut builder = Scene::builder();
        let _ = builder
            .surface("wall", tri_mesh(), MaterialRole::Baked, Mat4::IDENTITY)
            .surface("wall", tri_mesh(), MaterialRole::Baked, Mat4::IDENTITY);
        assert_eq!(
            builder.build().unwrap_err(),
            SceneValidationError::DuplicateName { name: "wall".to_owned() }
        );
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        let mut empty = tri_mesh();
        empty.indices.clear();
        let mut builder = Scene::builder();
        let _ = builder.surface(
            "ghost",
            empty,
            MaterialRole::Baked,
            Mat4::IDENTITY,
        );
        assert!(matches!(
            builder.build().unwrap_err(),
            SceneValidationError::EmptyMesh { .. }
        ));

        let mut bad_index = tri_mesh();
        bad_index.indices[2] = 9;
        let mut builder = Scene::builder();
        let _ = builder.surface(
            "torn",
            bad_index,
            MaterialRole::Baked,
            Mat4::IDENTITY,
        );
        assert!(matches!(
            builder.build().unwrap_err(),
            SceneValidationError::IndexOutOfBounds { .. }
        ));
    }

    #[test]
    fn world_aabb_reflects_transform() {
        let mut builder = Scene::builder();
        let _ = builder.surface(
            "lifted",
            tri_mesh(),
            MaterialRole::Baked,
            Mat4::from_translation(Vec3::new(0.0, 3.0, 0.0)),
        );
        let scene = builder.build().unwrap();
        let bounds = scene.surfaces()[0].world_aabb();
        assert_eq!(bounds.min.y, 3.0);
        assert_eq!(bounds.max.y, 4.0);
    }
}
