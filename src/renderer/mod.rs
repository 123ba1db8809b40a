//! Rendering subsystems for the baked-scene viewer.
//!
//! Contains the GPU context, the baked/emissive surface pass, the hover
//! highlight overlay pass, and the baked lightmap texture.

/// GPU device, queue, surface, and configuration.
pub mod context;
/// Baked and emissive scene passes.
pub mod mesh_pass;
/// Wireframe highlight pass for the hovered surface.
pub mod overlay_pass;
/// Baked lightmap decode, upload, and sampling resources.
pub mod texture;

pub use context::{RenderContext, RenderContextError};
pub use mesh_pass::MeshPass;
pub use overlay_pass::OverlayPass;
pub use texture::BakedTexture;
