//! Baked lightmap texture: decode, upload, and sampling resources.

use std::path::Path;

use super::context::RenderContext;
use crate::error::GlintError;

/// The scene's baked lightmap on the GPU.
///
/// Authored in sRGB; uploaded as `Rgba8UnormSrgb` so samples arrive in
/// linear space and the sRGB swapchain re-encodes on present. glTF UVs
/// are y-down like wgpu texture space, so rows upload in file order with
/// no vertical flip.
pub struct BakedTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
    /// Bilinear clamp-to-edge sampler.
    pub sampler: wgpu::Sampler,
}

impl BakedTexture {
    /// Decode an image file and upload it.
    ///
    /// # Errors
    /// [`GlintError::Texture`] if the file cannot be read or decoded.
    pub fn load(
        context: &RenderContext,
        path: &Path,
    ) -> Result<Self, GlintError> {
        let image = image::open(path)
            .map_err(|e| {
                GlintError::Texture(format!("{}: {e}", path.display()))
            })?
            .to_rgba8();
        let (width, height) = image.dimensions();

        let texture =
            context.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Baked Lightmap"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING
                    | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });

        context.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
        );

        let view =
            texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler =
            context.device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("Baked Lightmap Sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                ..Default::default()
            });

        log::info!(
            "baked lightmap {}: {width}x{height}",
            path.display()
        );
        Ok(Self { texture, view, sampler })
    }
}
