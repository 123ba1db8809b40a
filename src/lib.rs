//! GPU-accelerated viewer for baked glTF scenes with hover
//! highlighting, built on wgpu.
//!
//! Glint renders a glTF scene whose lighting is pre-baked into a single
//! texture: every surface samples the shared lightmap except a handful
//! of named light fixtures, which are filled with a flat emissive
//! color. An orbit camera with inertial damping frames the scene, and
//! a per-frame raycast outlines whichever surface sits under the
//! pointer.
//!
//! # Key entry points
//!
//! - [`SceneRenderEngine`] - the rendering engine
//! - [`viewer::Viewer`] - standalone winit window shell (feature
//!   `viewer`)
//! - [`scene::Scene`] - validated surface storage
//! - [`options::Options`] - runtime configuration (camera, display,
//!   highlight)
//!
//! # Architecture
//!
//! Picking is CPU-side. Each frame the pointer position is unprojected
//! into a world-space ray ([`camera::Camera::pick_ray`]) and cast
//! against every scene surface ([`picking::cast`]); the nearest hit
//! feeds [`picking::HoverState`], which retargets the wireframe
//! highlight overlay only when the hovered surface actually changes.
//! Surface transforms are baked into the GPU vertex buffers at upload,
//! so the geometry the raycaster walks is exactly what the GPU draws.

pub mod camera;
pub mod engine;
pub mod error;
pub mod input;
pub mod options;
pub mod picking;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::SceneRenderEngine;
pub use error::GlintError;
pub use input::{InputEvent, MouseButton};
