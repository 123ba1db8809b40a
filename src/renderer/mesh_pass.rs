//! Baked and emissive scene passes.
//!
//! One pipeline samples the shared baked lightmap, the other fills light
//! fixtures with a flat emissive color; both are unlit. Surface
//! transforms are baked into the vertex buffers at upload, so what the
//! GPU rasterizes is exactly the world-space geometry the raycaster
//! walks.

use wgpu::util::DeviceExt;

use super::context::RenderContext;
use super::texture::BakedTexture;
use crate::camera::CameraUniform;
use crate::options::DisplayOptions;
use crate::scene::{MaterialRole, Scene};

const BAKED_SHADER: &str = include_str!("shaders/baked.wgsl");
const EMISSIVE_SHADER: &str = include_str!("shaders/emissive.wgsl");

/// Depth buffer format shared with the overlay pass.
pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat =
    wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MeshVertex {
    position: [f32; 3],
    uv: [f32; 2],
}

fn mesh_vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<MeshVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0, // position
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 12,
                shader_location: 1, // uv
            },
        ],
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct EmissiveUniform {
    color: [f32; 3],
    _pad: f32,
}

/// Per-surface GPU geometry, in scene traversal order.
struct GpuSurface {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    material: MaterialRole,
}

/// Draws every scene surface with its material role.
pub struct MeshPass {
    camera_buffer: wgpu::Buffer,
    camera_layout: wgpu::BindGroupLayout,
    camera_bind_group: wgpu::BindGroup,
    baked_pipeline: wgpu::RenderPipeline,
    emissive_pipeline: wgpu::RenderPipeline,
    texture_bind_group: wgpu::BindGroup,
    emissive_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    surfaces: Vec<GpuSurface>,
}

impl MeshPass {
    /// Upload the scene and build both pipelines.
    pub fn new(
        context: &RenderContext,
        scene: &Scene,
        texture: &BakedTexture,
        display: &DisplayOptions,
    ) -> Self {
        let device = &context.device;

        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[CameraUniform::new()]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let camera_layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );
        let camera_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &camera_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                }],
            });

        let texture_layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Baked Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float {
                                filterable: true,
                            },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(
                            wgpu::SamplerBindingType::Filtering,
                        ),
                        count: None,
                    },
                ],
            },
        );
        let texture_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Baked Texture Bind Group"),
                layout: &texture_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(
                            &texture.view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(
                            &texture.sampler,
                        ),
                    },
                ],
            });

        let emissive_uniform = EmissiveUniform {
            color: display.emissive_color,
            _pad: 0.0,
        };
        let emissive_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Emissive Color Buffer"),
                contents: bytemuck::cast_slice(&[emissive_uniform]),
                usage: wgpu::BufferUsages::UNIFORM,
            });
        let emissive_layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Emissive Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );
        let emissive_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Emissive Bind Group"),
                layout: &emissive_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: emissive_buffer.as_entire_binding(),
                }],
            });

        let baked_pipeline = create_surface_pipeline(
            context,
            "Baked Pipeline",
            BAKED_SHADER,
            &[&camera_layout, &texture_layout],
        );
        let emissive_pipeline = create_surface_pipeline(
            context,
            "Emissive Pipeline",
            EMISSIVE_SHADER,
            &[&camera_layout, &emissive_layout],
        );

        let surfaces = upload_surfaces(device, scene);
        let depth_view = create_depth_view(context);

        Self {
            camera_buffer,
            camera_layout,
            camera_bind_group,
            baked_pipeline,
            emissive_pipeline,
            texture_bind_group,
            emissive_bind_group,
            depth_view,
            surfaces,
        }
    }

    /// Push the current camera matrix to the GPU.
    pub fn write_camera(
        &self,
        queue: &wgpu::Queue,
        uniform: &CameraUniform,
    ) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[*uniform]),
        );
    }

    /// Recreate the depth buffer after a surface resize.
    pub fn resize(&mut self, context: &RenderContext) {
        self.depth_view = create_depth_view(context);
    }

    /// Layout for the shared camera uniform; the overlay pipeline reuses
    /// it so both passes read the same matrix.
    #[must_use]
    pub fn camera_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.camera_layout
    }

    /// Bind group for the shared camera uniform.
    #[must_use]
    pub fn camera_bind_group(&self) -> &wgpu::BindGroup {
        &self.camera_bind_group
    }

    /// Depth attachment view, shared with the overlay pass.
    #[must_use]
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Record draws for every surface, grouped by pipeline.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        render_pass.set_pipeline(&self.baked_pipeline);
        render_pass.set_bind_group(1, &self.texture_bind_group, &[]);
        self.draw_role(render_pass, MaterialRole::Baked);

        render_pass.set_pipeline(&self.emissive_pipeline);
        render_pass.set_bind_group(1, &self.emissive_bind_group, &[]);
        self.draw_role(render_pass, MaterialRole::Emissive);
    }

    fn draw_role<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        role: MaterialRole,
    ) {
        for surface in
            self.surfaces.iter().filter(|s| s.material == role)
        {
            render_pass
                .set_vertex_buffer(0, surface.vertex_buffer.slice(..));
            render_pass.set_index_buffer(
                surface.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            render_pass.draw_indexed(0..surface.index_count, 0, 0..1);
        }
    }
}

fn upload_surfaces(
    device: &wgpu::Device,
    scene: &Scene,
) -> Vec<GpuSurface> {
    scene
        .surfaces()
        .iter()
        .map(|surface| {
            let transform = surface.transform();
            let mesh = surface.mesh();
            let vertices: Vec<MeshVertex> = mesh
                .positions
                .iter()
                .zip(&mesh.uvs)
                .map(|(p, uv)| MeshVertex {
                    position: transform.transform_point3(*p).to_array(),
                    uv: uv.to_array(),
                })
                .collect();

            let vertex_buffer = device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some(surface.name()),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                },
            );
            let index_buffer = device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some(surface.name()),
                    contents: bytemuck::cast_slice(&mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                },
            );

            GpuSurface {
                vertex_buffer,
                index_buffer,
                index_count: mesh.indices.len() as u32,
                material: surface.material(),
            }
        })
        .collect()
}

fn create_depth_view(context: &RenderContext) -> wgpu::TextureView {
    let texture = context.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Buffer"),
        size: wgpu::Extent3d {
            width: context.config.width.max(1),
            height: context.config.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Create a standard opaque surface pipeline.
fn create_surface_pipeline(
    context: &RenderContext,
    label: &str,
    shader_source: &str,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> wgpu::RenderPipeline {
    let shader =
        context.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

    let pipeline_layout = context.device.create_pipeline_layout(
        &wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} Layout")),
            bind_group_layouts,
            immediate_size: 0,
        },
    );

    context.device.create_render_pipeline(
        &wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[mesh_vertex_buffer_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.format(),
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        },
    )
}
