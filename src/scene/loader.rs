//! glTF scene loading.
//!
//! Walks the default scene's node tree, flattens node transforms, and
//! turns every mesh-bearing node into one [`Surface`]. Material roles are
//! assigned by name: nodes listed in
//! [`DisplayOptions::emissive_names`](crate::options::DisplayOptions)
//! become emissive fixtures, everything else samples the baked lightmap.

use std::path::Path;

use glam::{Mat4, Vec2, Vec3};

use super::mesh::TriangleMesh;
use super::surface::MaterialRole;
use super::{Scene, SceneBuilder, SceneValidationError};
use crate::error::GlintError;
use crate::options::DisplayOptions;

/// Load a `.glb`/`.gltf` file into a validated [`Scene`].
///
/// Node names must be present and unique; the loader surfaces violations
/// as [`GlintError::SceneValidation`] rather than inventing identities.
///
/// # Errors
/// [`GlintError::SceneLoad`] for unreadable or malformed files,
/// [`GlintError::SceneValidation`] when the node tree fails identity or
/// geometry checks.
pub fn load_gltf(
    path: &Path,
    display: &DisplayOptions,
) -> Result<Scene, GlintError> {
    let (document, buffers, _images) = gltf::import(path)
        .map_err(|e| GlintError::SceneLoad(e.to_string()))?;

    let mut builder = Scene::builder();
    let roots: Vec<gltf::Node> = document.default_scene().map_or_else(
        || document.scenes().flat_map(|s| s.nodes()).collect(),
        |scene| scene.nodes().collect(),
    );
    for node in roots {
        collect_node(&node, Mat4::IDENTITY, &buffers, display, &mut builder)?;
    }

    let scene = builder.build()?;
    log::info!(
        "loaded {}: {} surfaces, {} triangles",
        path.display(),
        scene.len(),
        scene
            .surfaces()
            .iter()
            .map(|s| s.mesh().triangle_count())
            .sum::<usize>()
    );
    Ok(scene)
}

/// Recursively queue surfaces for a node and its children, accumulating
/// the parent transform chain.
fn collect_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    display: &DisplayOptions,
    builder: &mut SceneBuilder,
) -> Result<(), GlintError> {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let world = parent * local;

    if let Some(mesh) = node.mesh() {
        // Object name over mesh-data name; Blender exports keep the
        // object's "Cylinder.004"-style suffixes on the node.
        let name = node
            .name()
            .or_else(|| mesh.name())
            .unwrap_or_default()
            .to_owned();
        let material = if display.is_emissive(&name) {
            MaterialRole::Emissive
        } else {
            MaterialRole::Baked
        };
        let geometry = merge_primitives(&mesh, buffers, &name, material)?;
        let _ = builder.surface(name, geometry, material, world);
    }

    for child in node.children() {
        collect_node(&child, world, buffers, display, builder)?;
    }
    Ok(())
}

/// Concatenate all primitives of a glTF mesh into one indexed triangle
/// mesh. A node is one pickable identity regardless of how the exporter
/// split its primitives.
///
/// The baked material samples the lightmap by UV, so a baked surface
/// with any UV-less primitive is rejected; emissive surfaces get UVs
/// zero-filled since their shader never reads them.
fn merge_primitives(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    name: &str,
    material: MaterialRole,
) -> Result<TriangleMesh, GlintError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut uvs: Vec<Vec2> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            continue;
        }
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
        let base = positions.len() as u32;

        let prim_positions: Vec<Vec3> = reader
            .read_positions()
            .ok_or_else(|| {
                GlintError::SceneLoad(format!(
                    "mesh {name:?} primitive has no positions"
                ))
            })?
            .map(Vec3::from_array)
            .collect();

        let prim_uvs: Vec<Vec2> = match reader.read_tex_coords(0) {
            Some(tc) => tc.into_f32().map(Vec2::from_array).collect(),
            None if material == MaterialRole::Baked => {
                return Err(GlintError::SceneValidation(
                    SceneValidationError::MissingUvs {
                        name: name.to_owned(),
                    },
                ));
            }
            None => vec![Vec2::ZERO; prim_positions.len()],
        };

        let prim_indices: Vec<u32> = reader.read_indices().map_or_else(
            || (0..prim_positions.len() as u32).collect(),
            |idx| idx.into_u32().collect(),
        );

        positions.extend_from_slice(&prim_positions);
        uvs.extend_from_slice(&prim_uvs);
        indices.extend(prim_indices.iter().map(|i| base + i));
    }

    Ok(TriangleMesh { positions, uvs, indices })
}
